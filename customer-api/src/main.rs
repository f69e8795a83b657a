//! Customer API Server Entry Point
//!
//! Bootstraps configuration, builds the repository and service, and
//! starts the Axum HTTP server.

use axum::Router;
use customer_api::telemetry::{init_tracing, TelemetryConfig};
use customer_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use customer_core::CustomerError;

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracing(&telemetry_config)?;

    let config = ApiConfig::from_env().map_err(CustomerError::from)?;
    let state = AppState::from_config(&config).await?;

    let app: Router = create_api_router(state, &config);

    let addr = config.bind_addr().map_err(CustomerError::from)?;
    tracing::info!(%addr, storage = ?config.storage, "Starting customer API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
