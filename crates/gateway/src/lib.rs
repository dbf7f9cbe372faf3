//! API Gateway Library
//!
//! HTTP REST API over the embedded user service: user registration,
//! profile management and profile search.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect the user service and run the HTTP server.
pub async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (database, services) = user_service_lib::bootstrap(&config.user_service).await?;

    let addr: SocketAddr = config.address().parse()?;
    let state = AppState::new(services, database, config);
    let app = create_router(state);

    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
