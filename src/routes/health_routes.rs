//! Health check endpoints.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Returns 200 with the namespace and region the reporter submits to.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "namespace": state.config.reporter.namespace,
        "region": state.config.reporter.region,
    }))
}
