//! Bearer token issuance and validation.
//!
//! [`TokenIssuer::issue`] mints an HS256-signed JWT carrying, in order:
//!
//! 1. the principal's own claims,
//! 2. `sub` (user id), `email`, a fresh `jti`, `nbf` and `iat` (epoch seconds),
//! 3. one `role` claim per role,
//!
//! plus `iss`, `aud` and `exp = now + expiry_hours` from [`JwtConfig`].
//! Claim types that occur once are encoded as strings; repeated types
//! (several roles, several grants for one resource) become arrays.
//!
//! The wall clock and the token id source are injectable so that tests can
//! pin both.
//!
//! [`TokenValidator::validate`] reverses the process for incoming requests,
//! checking signature, issuer, audience and lifetime before rebuilding an
//! authenticated [`Principal`].

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde_json::{Map, Value};
use supplydesk_config::JwtConfig;
use supplydesk_core::permissions::ROLE_CLAIM;
use uuid::Uuid;

use crate::claims::{Claim, Principal};

const SUB: &str = "sub";
const EMAIL: &str = "email";
const JTI: &str = "jti";
const NBF: &str = "nbf";
const IAT: &str = "iat";
const EXP: &str = "exp";
const ISS: &str = "iss";
const AUD: &str = "aud";

/// Claims managed by the token itself; never re-exposed as principal claims.
const REGISTERED: [&str; 8] = [SUB, EMAIL, JTI, NBF, IAT, EXP, ISS, AUD];

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing secret is missing or empty")]
    MissingSecret,
    #[error("cannot issue a token for an unauthenticated principal")]
    AnonymousPrincipal,
    #[error("failed to encode token: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
    #[error("token is missing the {0} claim")]
    MissingClaim(&'static str),
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Source of unique token identifiers (`jti`).
pub trait TokenIdSource: Send + Sync {
    fn next_id(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenIds;

impl TokenIdSource for UuidTokenIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Public view of the token owner, returned alongside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserToken {
    pub id: String,
    pub email: String,
    pub claims: Vec<Claim>,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user_token: UserToken,
}

pub struct TokenIssuer {
    config: Arc<JwtConfig>,
    key: EncodingKey,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn TokenIdSource>,
}

impl TokenIssuer {
    /// Fails when the secret is empty; call this at startup.
    pub fn new(config: Arc<JwtConfig>) -> Result<Self, TokenError> {
        if config.secret.trim().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            key: EncodingKey::from_secret(config.secret.as_bytes()),
            config,
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidTokenIds),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_id_source(mut self, ids: impl TokenIdSource + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn issue(&self, principal: &Principal, roles: &[String]) -> Result<IssuedToken, TokenError> {
        if !principal.is_authenticated() {
            return Err(TokenError::AnonymousPrincipal);
        }

        let now = self.clock.now().timestamp();
        let expires_in = self.config.expires_in();

        // Registered names are owned by the token; a principal claim must not shadow them.
        let mut claims: Vec<Claim> = principal
            .claims()
            .iter()
            .filter(|claim| !REGISTERED.contains(&claim.claim_type.as_str()))
            .cloned()
            .collect();
        claims.push(Claim::new(SUB, principal.id()));
        claims.push(Claim::new(EMAIL, principal.email()));
        claims.push(Claim::new(JTI, self.ids.next_id()));
        claims.push(Claim::new(NBF, now.to_string()));
        claims.push(Claim::new(IAT, now.to_string()));
        claims.extend(roles.iter().map(|role| Claim::new(ROLE_CLAIM, role.as_str())));

        let mut payload = claims_to_payload(&claims);
        payload.insert(NBF.to_string(), Value::from(now));
        payload.insert(IAT.to_string(), Value::from(now));
        payload.insert(EXP.to_string(), Value::from(now + expires_in));
        payload.insert(ISS.to_string(), Value::from(self.config.issuer.as_str()));
        payload.insert(AUD.to_string(), Value::from(self.config.audience.as_str()));

        let access_token = encode(&Header::new(Algorithm::HS256), &payload, &self.key)
            .map_err(TokenError::Encoding)?;

        tracing::debug!(user_id = %principal.id(), roles = roles.len(), "Issued access token");

        Ok(IssuedToken {
            access_token,
            expires_in,
            user_token: UserToken {
                id: principal.id().to_string(),
                email: principal.email().to_string(),
                claims,
            },
        })
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Groups claims by type: one value becomes a string, several an array.
fn claims_to_payload(claims: &[Claim]) -> Map<String, Value> {
    let mut payload = Map::new();
    for claim in claims {
        let value = Value::from(claim.value.as_str());
        match payload.get_mut(&claim.claim_type) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                payload.insert(claim.claim_type.clone(), value);
            }
        }
    }
    payload
}

pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(config: Arc<JwtConfig>) -> Result<Self, TokenError> {
        if config.secret.trim().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_nbf = true;

        Ok(Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Verifies `token` and rebuilds the principal it was issued for.
    pub fn validate(&self, token: &str) -> Result<Principal, TokenError> {
        let payload = decode::<Map<String, Value>>(token, &self.key, &self.validation)
            .map_err(TokenError::Invalid)?
            .claims;

        let id = payload
            .get(SUB)
            .and_then(Value::as_str)
            .ok_or(TokenError::MissingClaim(SUB))?;
        let email = payload
            .get(EMAIL)
            .and_then(Value::as_str)
            .ok_or(TokenError::MissingClaim(EMAIL))?;

        let claims = payload
            .iter()
            .filter(|(claim_type, _)| !REGISTERED.contains(&claim_type.as_str()))
            .flat_map(|(claim_type, value)| {
                claim_values(value)
                    .into_iter()
                    .map(move |v| Claim::new(claim_type.as_str(), v))
            })
            .collect::<Vec<_>>();

        Ok(Principal::authenticated(id, email).with_claims(claims))
    }
}

impl fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenValidator")
            .field("issuer", &self.validation.iss)
            .field("audience", &self.validation.aud)
            .finish_non_exhaustive()
    }
}

fn claim_values(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(values) => values.iter().flat_map(claim_values).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}
