//! `/health` and `/` handlers, and the probe they run.

use axum::{extract::State, response::Json};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::state::AppState;

/// Blocking database round-trip. `Err` carries a human-readable reason.
pub trait HealthProbe: Send + Sync + 'static {
    fn check(&self) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub db: String,
}

impl HealthResponse {
    pub fn connected() -> Self {
        Self {
            status: "ok".into(),
            db: "connected".into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            db: reason.into(),
        }
    }
}

/// GET /health - always 200; failures are reported in the body.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let probe = state.probe.clone();
    let outcome = tokio::task::spawn_blocking(move || probe.check())
        .await
        .unwrap_or_else(|e| Err(e.to_string()));

    match outcome {
        Ok(()) => Json(HealthResponse::connected()),
        Err(reason) => {
            warn!("Health check failed: {reason}");
            Json(HealthResponse::failed(reason))
        }
    }
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({"message": "Welcome to StatForge API"}))
}
