//! Rendered view endpoints. Every request recomputes from scratch.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Serialize;

use super::{resolve_year, DashboardState, YearQuery};
use crate::api::envelope::ApiResponse;
use crate::render::DashboardSnapshot;
use crate::types::DatasetOrigin;

/// Snapshot plus the provenance of the table it was rendered from.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
    pub dataset_origin: DatasetOrigin,
}

/// GET /api/v1/dashboard?year=Y
pub async fn get_dashboard(
    State(state): State<DashboardState>,
    Query(q): Query<YearQuery>,
) -> Response {
    let year = match resolve_year(&state, &q) {
        Ok(y) => y,
        Err(resp) => return resp,
    };

    let slots = state.datasets.read().await;
    let active = slots.active();
    ApiResponse::ok(DashboardResponse {
        snapshot: state.renderer.render(year, &active.dataset),
        dataset_origin: active.origin.clone(),
    })
}

/// GET /api/v1/metrics?year=Y
pub async fn get_metrics(
    State(state): State<DashboardState>,
    Query(q): Query<YearQuery>,
) -> Response {
    match resolve_year(&state, &q) {
        Ok(year) => ApiResponse::ok(state.renderer.metrics(year)),
        Err(resp) => resp,
    }
}

/// GET /api/v1/surface?year=Y
pub async fn get_surface(
    State(state): State<DashboardState>,
    Query(q): Query<YearQuery>,
) -> Response {
    match resolve_year(&state, &q) {
        Ok(year) => ApiResponse::ok(state.renderer.surface_view(year)),
        Err(resp) => resp,
    }
}

/// GET /api/v1/decline?year=Y
pub async fn get_decline(
    State(state): State<DashboardState>,
    Query(q): Query<YearQuery>,
) -> Response {
    match resolve_year(&state, &q) {
        Ok(year) => ApiResponse::ok(state.renderer.decline_view(year)),
        Err(resp) => resp,
    }
}

/// GET /api/v1/well-log
pub async fn get_well_log(State(state): State<DashboardState>) -> Response {
    let slots = state.datasets.read().await;
    ApiResponse::ok(state.renderer.well_log_view(&slots.active().dataset))
}
