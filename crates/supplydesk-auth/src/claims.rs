//! The authenticated caller and the claims it carries.
//!
//! A [`Principal`] is built once per request, either from a validated bearer
//! token or as [`Principal::anonymous`] when no usable token was sent. Claim
//! values are free-form strings and a principal may hold several claims of
//! the same type.

use serde::{Deserialize, Serialize};
use supplydesk_core::permissions::ROLE_CLAIM;

/// A `(type, value)` attribute of a principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// The identity associated with the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    id: String,
    email: String,
    authenticated: bool,
    claims: Vec<Claim>,
}

impl Principal {
    /// A caller that presented no valid credential.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            authenticated: true,
            claims: Vec::new(),
        }
    }

    pub fn with_claim(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(claim_type, value));
        self
    }

    pub fn with_claims(mut self, claims: impl IntoIterator<Item = Claim>) -> Self {
        self.claims.extend(claims);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Values of every claim with the given type, in insertion order.
    pub fn claim_values<'a>(&'a self, claim_type: &'a str) -> impl Iterator<Item = &'a str> {
        self.claims
            .iter()
            .filter(move |c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.claim_values(ROLE_CLAIM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_not_authenticated() {
        let principal = Principal::anonymous();
        assert!(!principal.is_authenticated());
        assert!(principal.claims().is_empty());
    }

    #[test]
    fn test_authenticated_carries_identity() {
        let principal = Principal::authenticated("user-1", "ana@example.com");
        assert!(principal.is_authenticated());
        assert_eq!(principal.id(), "user-1");
        assert_eq!(principal.email(), "ana@example.com");
    }

    #[test]
    fn test_multiple_claims_of_same_type() {
        let principal = Principal::authenticated("user-1", "ana@example.com")
            .with_claim("Fornecedor", "Adicionar")
            .with_claim("Fornecedor", "Excluir")
            .with_claim("Produto", "Adicionar");

        let values: Vec<_> = principal.claim_values("Fornecedor").collect();
        assert_eq!(values, vec!["Adicionar", "Excluir"]);
    }

    #[test]
    fn test_roles_reads_role_claims() {
        let principal = Principal::authenticated("user-1", "ana@example.com")
            .with_claims([Claim::new("role", "Admin"), Claim::new("role", "Auditor")]);

        let roles: Vec<_> = principal.roles().collect();
        assert_eq!(roles, vec!["Admin", "Auditor"]);
    }

    #[test]
    fn test_claim_serializes_type_field() {
        let claim = Claim::new("Fornecedor", "Adicionar");
        let json = serde_json::to_string(&claim).unwrap();
        assert_eq!(json, r#"{"type":"Fornecedor","value":"Adicionar"}"#);
    }
}
