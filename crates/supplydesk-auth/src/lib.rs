//! # SupplyDesk Auth
//!
//! Authentication and authorization primitives for the SupplyDesk API.
//!
//! This crate provides:
//!
//! - [`claims`]: the request [`Principal`] and its `(type, value)` [`Claim`]s
//! - [`authorization`]: [`ClaimRequirement`] guards evaluated before a handler runs
//! - [`jwt`]: [`TokenIssuer`] for minting bearer tokens and [`TokenValidator`]
//!   for turning them back into principals
//!
//! Nothing here performs I/O; every operation is synchronous and CPU-bound.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use supplydesk_auth::{ClaimRequirement, Principal, TokenIssuer};
//! use supplydesk_config::JwtConfig;
//!
//! let config = Arc::new(JwtConfig::load()?);
//! let issuer = TokenIssuer::new(config)?;
//!
//! let principal = Principal::authenticated(user_id, "ana@example.com")
//!     .with_claim("Fornecedor", "Adicionar,Atualizar");
//! let token = issuer.issue(&principal, &["Admin".to_string()])?;
//!
//! ClaimRequirement::new("Fornecedor", "Adicionar").authorize(&principal)?;
//! ```

pub mod authorization;
pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use authorization::{AuthorizationError, AuthorizationOutcome, ClaimRequirement};
pub use claims::{Claim, Principal};
pub use jwt::{
    Clock, FixedClock, IssuedToken, SystemClock, TokenError, TokenIdSource, TokenIssuer,
    TokenValidator, UserToken, UuidTokenIds,
};
