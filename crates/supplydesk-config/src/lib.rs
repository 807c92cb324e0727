//! # SupplyDesk Config
//!
//! Configuration types for the SupplyDesk API.
//!
//! Configuration is loaded once at startup and shared read-only afterwards:
//!
//! - [`jwt`]: token signing settings (secret, lifetime, issuer, audience)
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! A missing signing secret is a deployment defect, so [`JwtConfig::load`]
//! returns a [`ConfigError`] that the binary treats as fatal.
//!
//! # Example
//!
//! ```ignore
//! use supplydesk_config::{CorsConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::load()?;
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::{ConfigError, JwtConfig};
