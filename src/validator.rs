//! Validated JSON request bodies.
//!
//! [`ValidatedJson`] parses the body and runs its `validator` rules. Any
//! failure, whether the body is unparseable or a field breaks a rule, is
//! funnelled through [`shape_from_validation`] so the caller gets the same
//! failure envelope a business-rule error would produce.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use supplydesk_core::{Envelope, FieldErrors, Notifier, shape_from_validation};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Envelope<()>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut notifier = Notifier::new();

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                shape_from_validation(&mut notifier, &FieldErrors::from(&rejection))
            })?;

        value
            .validate()
            .map_err(|errors| shape_from_validation(&mut notifier, &FieldErrors::from(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header, response::IntoResponse};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::{Value, json};

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 2, message = "Name is too short"))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn rejection_json(rejection: Envelope<()>) -> Value {
        let body = rejection
            .into_response()
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(payload) =
            ValidatedJson::<Payload>::from_request(json_request(r#"{"name":"Alpha"}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.name, "Alpha");
    }

    #[tokio::test]
    async fn test_rule_violation_is_failure_envelope() {
        let rejection =
            ValidatedJson::<Payload>::from_request(json_request(r#"{"name":"A"}"#), &())
                .await
                .unwrap_err();

        assert_eq!(
            rejection_json(rejection).await,
            json!({"success": false, "errors": ["Name is too short"]})
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_reported_by_name() {
        let rejection = ValidatedJson::<Payload>::from_request(json_request("{}"), &())
            .await
            .unwrap_err();

        assert_eq!(rejection.errors(), ["name is required"]);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_failure_envelope() {
        let req = Request::builder()
            .method("POST")
            .body(Body::from(r#"{"name":"Alpha"}"#))
            .unwrap();

        let rejection = ValidatedJson::<Payload>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(
            rejection.errors(),
            ["Missing 'Content-Type: application/json' header"]
        );
    }
}
