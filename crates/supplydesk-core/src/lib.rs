//! # SupplyDesk Core
//!
//! Request-scoped bookkeeping and response shaping for the SupplyDesk API.
//!
//! This crate provides the types every handler touches:
//!
//! - [`notification`]: the per-request [`Notifier`] that collects business and
//!   validation failures instead of raising errors
//! - [`response`]: the uniform success/failure [`Envelope`] built from a
//!   notifier's state
//! - [`errors`]: [`AppError`] for failures that bypass the envelope
//!   (authorization, not found, internal faults)
//! - [`permissions`]: claim types and values used by the authorization guards
//!
//! # Example
//!
//! ```ignore
//! use supplydesk_core::{Notifier, response::shape};
//!
//! let mut notifier = Notifier::new();
//! if dto.id != route_id {
//!     notifier.record("The route id does not match the supplier id in the body.");
//! }
//!
//! // `{"success": false, "errors": [...]}` because a notification was recorded
//! let envelope = shape(&notifier, Some(dto));
//! ```

pub mod errors;
pub mod notification;
pub mod permissions;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::{AppError, UNEXPECTED_ERROR};
pub use notification::{Notification, Notifier};
pub use response::{Envelope, FieldError, FieldErrors, shape, shape_from_validation};
