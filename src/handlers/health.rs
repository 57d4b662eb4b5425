use axum::{extract::State, response::Json};
use tracing::info;

use crate::handlers::AppState;
use crate::models::{HealthResponse, ServiceStatus};

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let converter = state.pipeline.converter_name();

    info!(markdown_converter = converter, "Health check completed");

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        services: ServiceStatus {
            markdown_converter: converter.to_string(),
        },
    })
}
