use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use supplydesk_core::{Envelope, UNEXPECTED_ERROR};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

/// Layer mapping a panicking handler to a 500 failure envelope.
pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic as fn(Box<dyn Any + Send + 'static>) -> Response)
}

pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "Unhandled panic in request handler");

    let body: Envelope<()> = Envelope::Failure {
        errors: vec![UNEXPECTED_ERROR.to_string()],
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("database password is hunter2");
    }

    #[tokio::test]
    async fn test_panic_becomes_generic_failure() {
        let app = Router::new()
            .route("/boom", get(explode))
            .layer(catch_panic_layer());

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "errors": [UNEXPECTED_ERROR]})
        );
    }
}
