//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Principal resolution and claim-based guards
//! - [`panic`]: Outermost boundary turning handler panics into a generic failure
//!
//! # Authorization Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `CurrentUser` validates the token, falling back to an anonymous principal
//! 3. A claim guard (`CanAddSupplier`, ...) evaluates its requirement:
//!    anonymous callers get 401, callers without the claim get 403
//! 4. Handler executes only if the guard passed
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::CanAddSupplier;
//!
//! // Only runs for principals holding a "Fornecedor" claim containing "Adicionar"
//! async fn create_supplier(
//!     CanAddSupplier(principal): CanAddSupplier,
//!     mut notifier: Notifier,
//!     ValidatedJson(dto): ValidatedJson<SupplierDto>,
//! ) -> Envelope<Supplier> {
//!     // ...
//! }
//! ```

pub mod auth;
pub mod panic;
