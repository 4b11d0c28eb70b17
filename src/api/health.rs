use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub conferencing: String,
    pub timestamp: String,
}

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let conferencing_status = match state.provisioner.bbb().probe().await {
        Ok(true) => "reachable",
        Ok(false) => "error",
        Err(e) => {
            tracing::warn!(error = %e, "Conferencing server probe failed");
            "unreachable"
        }
    };

    let overall_status = if conferencing_status == "reachable" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: overall_status.to_string(),
        conferencing: conferencing_status.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
