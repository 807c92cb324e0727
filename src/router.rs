use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::logging::logging_middleware;
use crate::middleware::panic::catch_panic_layer;
use crate::modules::auth::init_auth_router;
use crate::modules::products::init_products_router;
use crate::modules::suppliers::init_suppliers_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    Router::new()
        .nest("/api/v1", init_auth_router())
        .nest("/api/suppliers", init_suppliers_router())
        .nest("/api/products", init_products_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .layer(catch_panic_layer())
}
