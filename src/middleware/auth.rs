use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use supplydesk_auth::{AuthorizationError, Principal};
use supplydesk_core::{AppError, permissions};
use tracing::debug;

use crate::state::AppState;

/// Extractor resolving the caller's [`Principal`] from the bearer token.
///
/// Never rejects: a missing, malformed or invalid token yields an anonymous
/// principal, and the guards decide what that means. The principal is cached
/// in the request extensions so several extractors validate the token once.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl CurrentUser {
    fn from_headers(parts: &Parts, state: &AppState) -> Principal {
        let Some(auth_header) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
        else {
            return Principal::anonymous();
        };

        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            debug!("Ignoring authorization header without Bearer scheme");
            return Principal::anonymous();
        };

        match state.token_validator.validate(token.trim()) {
            Ok(principal) => principal,
            Err(e) => {
                debug!(error = %e, "Rejected bearer token");
                Principal::anonymous()
            }
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(CurrentUser(principal.clone()));
        }

        let principal = Self::from_headers(parts, state);
        parts.extensions.insert(principal.clone());
        Ok(CurrentUser(principal))
    }
}

/// Maps a guard rejection to its 401/403 response.
pub fn authorization_rejection(err: AuthorizationError) -> AppError {
    match err {
        AuthorizationError::Unauthenticated => AppError::unauthorized(err),
        AuthorizationError::Forbidden { .. } => AppError::forbidden(err),
    }
}

/// Extractor for handlers that only need an authenticated caller.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(CurrentUser(principal)) = CurrentUser::from_request_parts(parts, state).await;

        if !principal.is_authenticated() {
            return Err(authorization_rejection(AuthorizationError::Unauthenticated));
        }

        Ok(Authenticated(principal))
    }
}

/// Declares an extractor that runs a [`supplydesk_auth::ClaimRequirement`]
/// before the handler body. Rejections short-circuit with 401 or 403.
#[macro_export]
macro_rules! require_claim {
    ($name:ident, $resource:expr, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::supplydesk_auth::Principal);

        impl $name {
            pub const REQUIREMENT: $crate::supplydesk_auth::ClaimRequirement<'static> =
                $crate::supplydesk_auth::ClaimRequirement::new($resource, $permission);
        }

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::supplydesk_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let Ok($crate::middleware::auth::CurrentUser(principal)) =
                    <$crate::middleware::auth::CurrentUser as axum::extract::FromRequestParts<
                        $crate::state::AppState,
                    >>::from_request_parts(parts, state)
                    .await;

                Self::REQUIREMENT
                    .authorize(&principal)
                    .map_err($crate::middleware::auth::authorization_rejection)?;

                Ok($name(principal))
            }
        }
    };
}

// Supplier guards
require_claim!(CanAddSupplier, permissions::SUPPLIER, permissions::ADD);
require_claim!(CanUpdateSupplier, permissions::SUPPLIER, permissions::UPDATE);
require_claim!(CanDeleteSupplier, permissions::SUPPLIER, permissions::DELETE);

// Product guards
require_claim!(CanAddProduct, permissions::PRODUCT, permissions::ADD);
require_claim!(CanUpdateProduct, permissions::PRODUCT, permissions::UPDATE);
require_claim!(CanDeleteProduct, permissions::PRODUCT, permissions::DELETE);
