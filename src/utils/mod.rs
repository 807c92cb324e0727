//! Utility modules for the SupplyDesk API.
//!
//! - [`password`]: Password hashing and verification

pub mod password;
