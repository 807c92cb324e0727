//! Claim constants for the SupplyDesk API.
//!
//! Claim types name a resource and claim values list the operations granted
//! on it. A single claim value may carry several operations joined by commas
//! (`"Adicionar,Atualizar"`), which is why guards match values by
//! containment rather than equality.
//!
//! The literal values are shared with tokens minted by earlier deployments,
//! so they must not be renamed.
//!
//! # Example
//!
//! ```ignore
//! use supplydesk_core::permissions;
//!
//! require_claim!(CanAddSupplier, permissions::SUPPLIER, permissions::ADD);
//! ```

// =============================================================================
// Resources (claim types)
// =============================================================================

/// Claim type guarding supplier management
pub const SUPPLIER: &str = "Fornecedor";
/// Claim type guarding product management
pub const PRODUCT: &str = "Produto";

// =============================================================================
// Operations (claim values)
// =============================================================================

/// Permission to create records
pub const ADD: &str = "Adicionar";
/// Permission to update records
pub const UPDATE: &str = "Atualizar";
/// Permission to delete records
pub const DELETE: &str = "Excluir";

/// Claim value granting every operation, as assigned to seeded administrators
pub const ALL_OPERATIONS: &str = "Adicionar,Atualizar,Excluir";

// =============================================================================
// Registered claim types
// =============================================================================

/// Claim type carrying one role name per claim
pub const ROLE_CLAIM: &str = "role";
