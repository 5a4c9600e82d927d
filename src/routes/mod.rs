//! HTTP route definitions and handlers.
//!
//! The reporter only serves health checks and its own Prometheus metrics.

mod health_routes;
mod metrics_routes;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .with_state(state)
}
