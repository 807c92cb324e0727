//! Claim-based request guards.
//!
//! A [`ClaimRequirement`] names one resource (the claim type) and one
//! permission. It is satisfied when the principal is authenticated and holds
//! a claim of that type whose value *contains* the permission, so a claim
//! value of `"Adicionar,Atualizar"` grants both `Adicionar` and `Atualizar`.
//!
//! Evaluation is a three-state machine:
//!
//! ```text
//! not authenticated            -> Unauthenticated            (401)
//! authenticated, no match      -> AuthenticatedUnprivileged  (403)
//! authenticated, claim matches -> Authorized
//! ```
//!
//! The authentication flag is always checked first; claims of an
//! unauthenticated principal are never looked at.

use tracing::debug;

use crate::claims::Principal;

/// Terminal state of one guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Unauthenticated,
    AuthenticatedUnprivileged,
    Authorized,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Access denied. Missing required claim: {resource} ({permission})")]
    Forbidden {
        resource: String,
        permission: String,
    },
}

impl AuthorizationError {
    /// HTTP-equivalent status of the rejection.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthorizationError::Unauthenticated => 401,
            AuthorizationError::Forbidden { .. } => 403,
        }
    }
}

/// A single `(resource, permission)` pair attached to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimRequirement<'a> {
    resource: &'a str,
    permission: &'a str,
}

impl<'a> ClaimRequirement<'a> {
    pub const fn new(resource: &'a str, permission: &'a str) -> Self {
        Self {
            resource,
            permission,
        }
    }

    pub fn resource(&self) -> &str {
        self.resource
    }

    pub fn permission(&self) -> &str {
        self.permission
    }

    /// Whether any claim of the required type contains the permission.
    pub fn matches_claims(&self, principal: &Principal) -> bool {
        principal
            .claim_values(self.resource)
            .any(|value| value.contains(self.permission))
    }

    pub fn evaluate(&self, principal: &Principal) -> AuthorizationOutcome {
        if !principal.is_authenticated() {
            return AuthorizationOutcome::Unauthenticated;
        }

        if !self.matches_claims(principal) {
            return AuthorizationOutcome::AuthenticatedUnprivileged;
        }

        AuthorizationOutcome::Authorized
    }

    pub fn authorize(&self, principal: &Principal) -> Result<(), AuthorizationError> {
        match self.evaluate(principal) {
            AuthorizationOutcome::Authorized => Ok(()),
            AuthorizationOutcome::Unauthenticated => {
                debug!(resource = %self.resource, permission = %self.permission, "Rejected unauthenticated request");
                Err(AuthorizationError::Unauthenticated)
            }
            AuthorizationOutcome::AuthenticatedUnprivileged => {
                debug!(
                    user_id = %principal.id(),
                    resource = %self.resource,
                    permission = %self.permission,
                    "Rejected request lacking claim"
                );
                Err(AuthorizationError::Forbidden {
                    resource: self.resource.to_string(),
                    permission: self.permission.to_string(),
                })
            }
        }
    }

    /// Runs `handler` only when the principal is authorized.
    pub fn guard<T, F>(&self, principal: &Principal, handler: F) -> Result<T, AuthorizationError>
    where
        F: FnOnce() -> T,
    {
        self.authorize(principal)?;
        Ok(handler())
    }
}
