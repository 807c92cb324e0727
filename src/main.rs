use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use supplydesk::logging::init_tracing;
use supplydesk::router::init_router;
use supplydesk::state::init_app_state;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let state = match init_app_state() {
        Ok(state) => state,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Refusing to start");
            return Err(e);
        }
    };

    if let (Ok(email), Ok(password)) = (
        std::env::var("SEED_ADMIN_EMAIL"),
        std::env::var("SEED_ADMIN_PASSWORD"),
    ) {
        state
            .identities
            .seed_admin(&email, &password)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed administrator: {}", e.error))?;
    }

    let addr: SocketAddr = std::env::var("SERVER_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()
        .context("SERVER_ADDR must be a socket address")?;

    let app = init_router(state);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
