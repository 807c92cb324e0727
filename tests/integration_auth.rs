mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use supplydesk::modules::auth::store::MAX_FAILED_ATTEMPTS;

#[tokio::test]
async fn test_register_returns_token_envelope() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/register",
            None,
            Some(json!({
                "email": "ana@example.com",
                "password": "s3cret!",
                "confirmPassword": "s3cret!"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["accessToken"].as_str().is_some());
    assert_eq!(body["data"]["expiresIn"], 3600);
    assert_eq!(body["data"]["userToken"]["email"], "ana@example.com");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_register_validation_errors_are_flattened() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/register",
            None,
            Some(json!({
                "email": "not-an-email",
                "password": "s3cret!",
                "confirmPassword": "different"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["errors"],
        json!(["Passwords do not match", "Email must be a valid address"])
    );
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_is_failure() {
    let app = TestApp::new();
    let payload = json!({
        "email": "ana@example.com",
        "password": "s3cret!",
        "confirmPassword": "s3cret!"
    });

    app.send("POST", "/api/v1/register", None, Some(payload.clone()))
        .await;
    let (status, body) = app
        .send("POST", "/api/v1/register", None, Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.state
        .identities
        .seed_admin("admin@example.com", "admin123")
        .await
        .unwrap();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/login",
            None,
            Some(json!({"email": "admin@example.com", "password": "admin123"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let claims = body["data"]["userToken"]["claims"].as_array().unwrap();
    assert!(claims.contains(&json!({"type": "Fornecedor", "value": "Adicionar,Atualizar,Excluir"})));
    assert!(claims.contains(&json!({"type": "role", "value": "Admin"})));
}

#[tokio::test]
async fn test_login_token_authorizes_supplier_writes() {
    let app = TestApp::new();
    app.state
        .identities
        .seed_admin("admin@example.com", "admin123")
        .await
        .unwrap();

    let (_, body) = app
        .send(
            "POST",
            "/api/v1/login",
            None,
            Some(json!({"email": "admin@example.com", "password": "admin123"})),
        )
        .await;
    let token = body["data"]["accessToken"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "POST",
            "/api/suppliers",
            Some(&token),
            Some(json!({"name": "Acme", "document": "12345678000199", "kind": "company"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Acme");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "wrongpass"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "errors": ["Login error"]}));
}

#[tokio::test]
async fn test_login_lockout_after_repeated_failures() {
    let app = TestApp::new();
    app.state
        .identities
        .seed_admin("admin@example.com", "admin123")
        .await
        .unwrap();

    let wrong = json!({"email": "admin@example.com", "password": "wrongpass"});
    for _ in 0..MAX_FAILED_ATTEMPTS - 1 {
        app.send("POST", "/api/v1/login", None, Some(wrong.clone()))
            .await;
    }

    let (status, body) = app
        .send("POST", "/api/v1/login", None, Some(wrong))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!(["User temporarily locked out after invalid login attempts."])
    );
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = TestApp::new();

    let (status, body) = app
        .send("POST", "/api/v1/login", None, Some(json!({"email": "a@example.com"})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "errors": ["password is required"]}));
}
