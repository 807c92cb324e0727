use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use supplydesk::modules::auth::IdentityStore;
use supplydesk::router::init_router;
use supplydesk::state::AppState;
use supplydesk::utils::password::MIN_HASH_COST;
use supplydesk::supplydesk_auth::Principal;
use supplydesk::supplydesk_config::{CorsConfig, JwtConfig};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiry_hours: 1,
        issuer: "SupplyDesk".to_string(),
        audience: "https://localhost".to_string(),
    }
}

#[derive(Clone)]
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(
            test_jwt_config(),
            CorsConfig::from_origins("http://localhost:4200"),
        )
        .unwrap()
        .with_identity_store(IdentityStore::with_hash_cost(MIN_HASH_COST));

        Self {
            router: init_router(state.clone()),
            state,
        }
    }

    /// Bearer token for a principal holding the given `(type, value)` claims.
    #[allow(dead_code)]
    pub fn token_with_claims(&self, claims: &[(&str, &str)]) -> String {
        let principal = claims.iter().fold(
            Principal::authenticated("user-1", "ana@example.com"),
            |principal, (claim_type, value)| principal.with_claim(*claim_type, *value),
        );
        self.state
            .token_issuer
            .issue(&principal, &[])
            .unwrap()
            .access_token
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }
}
