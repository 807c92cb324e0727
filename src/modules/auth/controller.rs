use axum::extract::State;
use supplydesk_core::{AppError, Envelope, Notifier, shape};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{IssuedToken, LoginUserDto, RegisterUserDto};
use super::service::AuthService;

/// Register a new account and receive a token
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    mut notifier: Notifier,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<Envelope<IssuedToken>, AppError> {
    let token = AuthService::register(&state, &mut notifier, dto).await?;
    Ok(shape(&notifier, token))
}

/// Login and receive a token
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    mut notifier: Notifier,
    ValidatedJson(dto): ValidatedJson<LoginUserDto>,
) -> Result<Envelope<IssuedToken>, AppError> {
    let token = AuthService::login(&state, &mut notifier, dto).await?;
    Ok(shape(&notifier, token))
}
