//! API route definitions
//!
//! Organizes endpoints for the twin dashboard:
//! - /api/v1/dashboard - Full snapshot for a forecast year
//! - /api/v1/metrics, /surface, /decline, /well-log - Single views
//! - /api/v1/dataset - Active dataset (GET), upload (POST), reset (DELETE)
//! - /api/v1/controls - Slider range, accepted files, branding

use axum::{routing::get, Router};

use super::handlers::{self, DashboardState};

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/metrics", get(handlers::get_metrics))
        .route("/surface", get(handlers::get_surface))
        .route("/decline", get(handlers::get_decline))
        .route("/well-log", get(handlers::get_well_log))
        .route(
            "/dataset",
            get(handlers::get_dataset)
                .post(handlers::upload_dataset)
                .delete(handlers::reset_dataset),
        )
        .route("/controls", get(handlers::get_controls))
        .with_state(state)
}

/// Legacy health endpoint at root level
pub fn legacy_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::legacy_health_check))
        .with_state(state)
}
