use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::response::Envelope;

/// The only message a client sees for a server-side fault.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Failures that do not go through the notification envelope: rejected
/// authorization, missing resources and unexpected faults.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server faults share the failure envelope; detail stays in the logs.
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            let envelope: Envelope<()> = Envelope::Failure {
                errors: vec![UNEXPECTED_ERROR.to_string()],
            };
            return (self.status, Json(envelope)).into_response();
        }

        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_exposes_message() {
        let response = AppError::forbidden(anyhow!("Access denied")).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"], "Access denied");
    }

    #[tokio::test]
    async fn test_server_error_hides_detail() {
        let response =
            AppError::internal(anyhow!("connection refused at 10.0.0.3:5432")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "errors": [UNEXPECTED_ERROR]})
        );
    }

    #[test]
    fn test_from_any_error_is_internal() {
        let err: AppError = std::io::Error::other("disk full").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_constructors() {
        assert_eq!(
            AppError::unauthorized(anyhow!("x")).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::not_found(anyhow!("x")).status, StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::bad_request(anyhow!("x")).status,
            StatusCode::BAD_REQUEST
        );
    }
}
