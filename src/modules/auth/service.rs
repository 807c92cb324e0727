use anyhow::anyhow;
use supplydesk_core::{AppError, Notifier};
use tracing::{info, instrument, warn};

use crate::state::AppState;

use super::model::{IssuedToken, LoginUserDto, RegisterUserDto};
use super::store::{SignInResult, UserAccount};

pub const LOGIN_ERROR: &str = "Login error";
pub const LOCKED_OUT: &str = "User temporarily locked out after invalid login attempts.";

pub struct AuthService;

impl AuthService {
    /// Registers a new account and signs it in. Store rejections are recorded
    /// on `notifier` and no token is issued.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn register(
        state: &AppState,
        notifier: &mut Notifier,
        dto: RegisterUserDto,
    ) -> Result<Option<IssuedToken>, AppError> {
        let created = state
            .identities
            .create(&dto.email, &dto.password, Vec::new(), Vec::new())
            .await?;

        match created {
            Ok(account) => {
                info!(user_id = %account.id, "User registered");
                Self::issue_token(state, &account).map(Some)
            }
            Err(messages) => {
                for message in messages {
                    notifier.record(message);
                }
                Ok(None)
            }
        }
    }

    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login(
        state: &AppState,
        notifier: &mut Notifier,
        dto: LoginUserDto,
    ) -> Result<Option<IssuedToken>, AppError> {
        match state
            .identities
            .password_sign_in(&dto.email, &dto.password)
            .await?
        {
            SignInResult::Succeeded(account) => {
                info!(user_id = %account.id, "User {} logged in", account.email);
                Self::issue_token(state, &account).map(Some)
            }
            SignInResult::LockedOut => {
                warn!("Login refused for locked account");
                notifier.record(LOCKED_OUT);
                Ok(None)
            }
            SignInResult::Failed => {
                notifier.record(LOGIN_ERROR);
                Ok(None)
            }
        }
    }

    fn issue_token(state: &AppState, account: &UserAccount) -> Result<IssuedToken, AppError> {
        state
            .token_issuer
            .issue(&account.principal(), &account.roles)
            .map_err(|e| AppError::internal(anyhow!("Failed to issue token: {}", e)))
    }
}
