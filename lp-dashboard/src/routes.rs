use crate::{controller, health, state::AppState};

use axum::{
    Router,
    routing::{get, post},
};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Dashboard page and actions
        .route("/", get(controller::index))
        .route("/start", post(controller::start))
        .route("/restart", post(controller::restart))
        .route("/api/status", get(controller::status))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
}
