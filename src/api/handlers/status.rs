//! Controls metadata and liveness endpoints

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use super::DashboardState;
use crate::api::envelope::ApiResponse;
use crate::config::{defaults, BrandingConfig};
use crate::types::{FORECAST_YEAR_MAX, FORECAST_YEAR_MIN};

// ============================================================================
// Controls
// ============================================================================

#[derive(Debug, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

/// Everything the page needs to build its sidebar.
#[derive(Debug, Serialize)]
pub struct ControlsResponse {
    pub forecast_year: YearRange,
    pub accepted_extensions: Vec<&'static str>,
    pub max_upload_bytes: usize,
    pub branding: BrandingConfig,
}

/// GET /api/v1/controls
pub async fn get_controls(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(ControlsResponse {
        forecast_year: YearRange {
            min: FORECAST_YEAR_MIN,
            max: FORECAST_YEAR_MAX,
            default: state.default_year().get(),
        },
        accepted_extensions: defaults::ACCEPTED_EXTENSIONS.to_vec(),
        max_upload_bytes: state.config.server.max_upload_bytes,
        branding: state.config.branding.clone(),
    })
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub uptime_seconds: u64,
    pub dataset_fallback: bool,
}

/// GET /api/v1/health
pub async fn get_health(State(state): State<DashboardState>) -> Response {
    ApiResponse::ok(build_health(&state).await)
}

/// GET /health - bare JSON for load balancers and uptime probes
pub async fn legacy_health_check(State(state): State<DashboardState>) -> Json<HealthResponse> {
    Json(build_health(&state).await)
}

async fn build_health(state: &DashboardState) -> HealthResponse {
    let dataset_fallback = state.datasets.read().await.active().is_fallback();
    HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        dataset_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_state;
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let Json(resp) = legacy_health_check(State(create_test_state())).await;
        assert_eq!(resp.status, "ok");
        assert!(resp.dataset_fallback);
    }

    #[tokio::test]
    async fn test_controls_range() {
        let resp = get_controls(State(create_test_state())).await;
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["data"]["forecast_year"]["min"], 2026);
        assert_eq!(v["data"]["forecast_year"]["max"], 2035);
        assert_eq!(v["data"]["forecast_year"]["default"], 2026);
        assert_eq!(v["data"]["accepted_extensions"][1], ".las");
        assert_eq!(v["data"]["branding"]["header"], "Deep-Earth Digital Twin Platform");
    }
}
