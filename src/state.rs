use std::sync::Arc;

use anyhow::Context;
use supplydesk_auth::{TokenError, TokenIssuer, TokenValidator};
use supplydesk_config::{CorsConfig, JwtConfig};

use crate::db::Database;
use crate::modules::auth::IdentityStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub jwt_config: Arc<JwtConfig>,
    pub cors_config: CorsConfig,
    pub token_issuer: Arc<TokenIssuer>,
    pub token_validator: Arc<TokenValidator>,
    pub identities: Arc<IdentityStore>,
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(jwt_config: JwtConfig, cors_config: CorsConfig) -> Result<Self, TokenError> {
        let jwt_config = Arc::new(jwt_config);

        Ok(Self {
            token_issuer: Arc::new(TokenIssuer::new(jwt_config.clone())?),
            token_validator: Arc::new(TokenValidator::new(jwt_config.clone())?),
            jwt_config,
            cors_config,
            identities: Arc::new(IdentityStore::new()),
            db: Arc::new(Database::new()),
        })
    }

    pub fn with_identity_store(mut self, identities: IdentityStore) -> Self {
        self.identities = Arc::new(identities);
        self
    }
}

pub fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::load().context("Invalid JWT configuration")?;

    AppState::new(jwt_config, CorsConfig::from_env()).context("Failed to build token services")
}
