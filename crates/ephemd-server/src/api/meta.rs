//! Root and health endpoints (orchestrator probe surface).

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use ephemd_core::error::EphemdError;
use ephemd_core::task::epoch_seconds;

use crate::api::ApiError;
use crate::app_state::AppState;

/// Version reported by `/` and `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: f64,
    pub version: &'static str,
    pub environment: String,
}

/// Service self-description.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "ephemd demo task backend",
        "version": VERSION,
        "docs": "/docs",
        "health": "/health",
    }))
}

/// Health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: epoch_seconds(),
        version: VERSION,
        environment: state.cfg().server.environment.clone(),
    })
}

/// Readiness: every registered dependency probe must pass.
pub async fn readiness(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    for probe in state.probes() {
        if let Err(e) = probe.check().await {
            tracing::error!(probe = probe.name(), error = %e, "readiness check failed");
            return Err(EphemdError::NotReady(format!("{}: {e}", probe.name())).into());
        }
    }
    Ok(Json(json!({"status": "ready", "timestamp": epoch_seconds()})))
}

/// Liveness: the process can answer HTTP.
pub async fn liveness() -> Json<Value> {
    Json(json!({"status": "alive", "timestamp": epoch_seconds()}))
}
