//! API route handlers
//!
//! Request handling logic for all API endpoints including:
//! - Rendered views (full dashboard, metrics, surface, decline, well log)
//! - Active dataset inspection, upload and reset
//! - Controls metadata and liveness

mod dataset;
mod status;
mod views;

pub use dataset::*;
pub use status::*;
pub use views::*;

use axum::response::Response;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use super::envelope::ApiErrorResponse;
use crate::config::TwinConfig;
use crate::render::DashboardRenderer;
use crate::types::{ForecastYear, LoadedDataset};

// ============================================================================
// API State
// ============================================================================

/// The default dataset (loaded once at startup) and the optional upload
/// that replaces it until cleared.
#[derive(Debug, Clone)]
pub struct DatasetSlots {
    pub default: LoadedDataset,
    pub upload: Option<LoadedDataset>,
}

impl DatasetSlots {
    pub const fn new(default: LoadedDataset) -> Self {
        Self {
            default,
            upload: None,
        }
    }

    /// Dataset the views are rendered from.
    pub fn active(&self) -> &LoadedDataset {
        self.upload.as_ref().unwrap_or(&self.default)
    }
}

/// Shared state for API handlers
#[derive(Clone)]
pub struct DashboardState {
    pub config: Arc<TwinConfig>,
    pub renderer: Arc<DashboardRenderer>,
    pub datasets: Arc<RwLock<DatasetSlots>>,
    pub started_at: Instant,
}

impl DashboardState {
    pub fn new(config: TwinConfig, default_dataset: LoadedDataset) -> Self {
        Self {
            renderer: Arc::new(DashboardRenderer::new(config.display.clone())),
            config: Arc::new(config),
            datasets: Arc::new(RwLock::new(DatasetSlots::new(default_dataset))),
            started_at: Instant::now(),
        }
    }

    /// Configured slider position. The config is validated at load, so the
    /// fallback only applies to hand-built states.
    pub fn default_year(&self) -> ForecastYear {
        ForecastYear::new(self.config.forecast.default_year).unwrap_or_default()
    }
}

/// `?year=` query. Read as raw pairs so non-integer or repeated values get
/// an envelope error rather than axum's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct YearQuery {
    pub year: Option<String>,
    /// Number of `year` parameters seen.
    pub year_count: usize,
}

impl From<Vec<(String, String)>> for YearQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .filter(|(key, _)| key == "year")
            .fold(Self::default(), |acc, (_, value)| Self {
                year: Some(value),
                year_count: acc.year_count + 1,
            })
    }
}

/// Resolve the requested year, or the configured default when absent.
pub(crate) fn resolve_year(state: &DashboardState, query: &YearQuery) -> Result<ForecastYear, Response> {
    if query.year_count > 1 {
        return Err(ApiErrorResponse::bad_request("year may be given at most once"));
    }
    match query.year.as_deref() {
        None | Some("") => Ok(state.default_year()),
        Some(raw) => {
            ForecastYear::parse(raw).map_err(|e| ApiErrorResponse::bad_request(e.to_string()))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::{DatasetOrigin, WellDataset};
    use axum::http::StatusCode;

    pub(crate) fn sample_dataset() -> LoadedDataset {
        let rows = (0..20)
            .map(|i| vec![2000.0 + f64::from(i), 45.0 + f64::from(i % 5)])
            .collect();
        LoadedDataset::new(
            WellDataset::new(vec!["Depth".into(), "GR".into()], rows).unwrap(),
            DatasetOrigin::Synthetic {
                reason: "test".into(),
            },
        )
    }

    pub(crate) fn create_test_state() -> DashboardState {
        DashboardState::new(TwinConfig::default(), sample_dataset())
    }

    fn query(year: Option<&str>) -> YearQuery {
        YearQuery::from(
            year.map(|y| vec![("year".to_string(), y.to_string())])
                .unwrap_or_default(),
        )
    }

    #[test]
    fn test_resolve_year_default() {
        let state = create_test_state();
        assert_eq!(resolve_year(&state, &query(None)).unwrap().get(), 2026);
        assert_eq!(resolve_year(&state, &query(Some(""))).unwrap().get(), 2026);
    }

    #[test]
    fn test_resolve_year_configured_default() {
        let mut config = TwinConfig::default();
        config.forecast.default_year = 2028;
        let state = DashboardState::new(config, sample_dataset());
        assert_eq!(resolve_year(&state, &query(None)).unwrap().get(), 2028);
    }

    #[test]
    fn test_resolve_year_rejects_bad_input() {
        let state = create_test_state();
        for raw in ["2040", "2025", "soon", "2030.5"] {
            let resp = resolve_year(&state, &query(Some(raw))).unwrap_err();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{raw}");
        }
        assert_eq!(resolve_year(&state, &query(Some("2031"))).unwrap().get(), 2031);
    }

    #[test]
    fn test_year_query_from_pairs() {
        let q = YearQuery::from(vec![
            ("other".to_string(), "x".to_string()),
            ("year".to_string(), "2030".to_string()),
        ]);
        assert_eq!(q.year.as_deref(), Some("2030"));
        assert_eq!(q.year_count, 1);
    }

    #[test]
    fn test_resolve_year_rejects_repeated_parameter() {
        let state = create_test_state();
        let q = YearQuery::from(vec![
            ("year".to_string(), "2030".to_string()),
            ("year".to_string(), "2031".to_string()),
        ]);
        assert_eq!(q.year_count, 2);
        let resp = resolve_year(&state, &q).unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upload_slot_shadows_default() {
        let mut slots = DatasetSlots::new(sample_dataset());
        assert!(slots.active().is_fallback());
        slots.upload = Some(LoadedDataset::new(
            sample_dataset().dataset,
            DatasetOrigin::Uploaded {
                file_name: "a.csv".into(),
            },
        ));
        assert!(!slots.active().is_fallback());
        slots.upload = None;
        assert!(slots.active().is_fallback());
    }
}
