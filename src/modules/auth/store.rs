//! In-memory identity store.
//!
//! Stands in for the user database: accounts, password hashes, the claims
//! and roles granted to each user, and failed-login lockout. Emails are
//! matched case-insensitively.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use supplydesk_auth::{Claim, Principal};
use supplydesk_core::{AppError, permissions};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::utils::password::{hash_password_async, verify_password_async};

/// Consecutive failures before an account is locked.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;
/// How long a locked account stays locked.
pub const LOCKOUT_MINUTES: i64 = 5;

#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    password_hash: String,
    pub claims: Vec<Claim>,
    pub roles: Vec<String>,
    failed_attempts: u32,
    locked_until: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// The principal a token is issued for.
    pub fn principal(&self) -> Principal {
        Principal::authenticated(self.id.to_string(), self.email.clone())
            .with_claims(self.claims.iter().cloned())
    }

    fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

#[derive(Debug)]
pub enum SignInResult {
    Succeeded(UserAccount),
    LockedOut,
    Failed,
}

#[derive(Debug)]
pub struct IdentityStore {
    users: RwLock<HashMap<String, UserAccount>>,
    hash_cost: u32,
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::with_hash_cost(bcrypt::DEFAULT_COST)
    }

    pub fn with_hash_cost(hash_cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            hash_cost,
        }
    }

    fn key(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Creates an account. `Ok(Err(messages))` carries store-level rejections
    /// (such as a duplicate email) meant for the caller's notifier.
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        claims: Vec<Claim>,
        roles: Vec<String>,
    ) -> Result<Result<UserAccount, Vec<String>>, AppError> {
        let key = Self::key(email);
        if self.users.read().await.contains_key(&key) {
            return Ok(Err(vec![format!("Email '{}' is already registered.", email)]));
        }

        let password_hash = hash_password_async(password.to_string(), self.hash_cost).await?;
        let account = UserAccount {
            id: Uuid::new_v4(),
            email: email.trim().to_string(),
            password_hash,
            claims,
            roles,
            failed_attempts: 0,
            locked_until: None,
        };

        let mut users = self.users.write().await;
        // Checked again: another registration may have won the race while hashing.
        if users.contains_key(&key) {
            return Ok(Err(vec![format!("Email '{}' is already registered.", email)]));
        }
        users.insert(key, account.clone());

        Ok(Ok(account))
    }

    /// Creates an administrator holding every supplier and product operation.
    pub async fn seed_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        let claims = vec![
            Claim::new(permissions::SUPPLIER, permissions::ALL_OPERATIONS),
            Claim::new(permissions::PRODUCT, permissions::ALL_OPERATIONS),
        ];

        match self
            .create(email, password, claims, vec!["Admin".to_string()])
            .await?
        {
            Ok(account) => info!(email = %account.email, "Seeded administrator account"),
            Err(messages) => warn!(email = %email, reasons = ?messages, "Administrator not seeded"),
        }
        Ok(())
    }

    /// Verifies credentials, counting failures towards a lockout.
    ///
    /// The hash is checked with no lock held; the write guard is taken only
    /// to record the outcome.
    pub async fn password_sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInResult, AppError> {
        let key = Self::key(email);

        let password_hash = {
            let users = self.users.read().await;
            let Some(account) = users.get(&key) else {
                return Ok(SignInResult::Failed);
            };
            if account.is_locked(Utc::now()) {
                return Ok(SignInResult::LockedOut);
            }
            account.password_hash.clone()
        };

        let verified = verify_password_async(password.to_string(), password_hash).await?;

        let now = Utc::now();
        let mut users = self.users.write().await;
        let Some(account) = users.get_mut(&key) else {
            return Ok(SignInResult::Failed);
        };

        // Concurrent failures may have locked the account while verifying.
        if account.is_locked(now) {
            return Ok(SignInResult::LockedOut);
        }

        if verified {
            account.failed_attempts = 0;
            account.locked_until = None;
            return Ok(SignInResult::Succeeded(account.clone()));
        }

        account.failed_attempts += 1;
        if account.failed_attempts >= MAX_FAILED_ATTEMPTS {
            account.failed_attempts = 0;
            account.locked_until = Some(now + Duration::minutes(LOCKOUT_MINUTES));
            warn!(email = %account.email, "Account locked after repeated login failures");
            return Ok(SignInResult::LockedOut);
        }

        Ok(SignInResult::Failed)
    }
}
