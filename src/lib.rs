//! Reservoir Twin: forecast-driven reservoir dashboard
//!
//! A small digital twin of a producing field, served as a web dashboard.
//!
//! ## Architecture
//!
//! - **Reservoir**: closed-form pressure depletion, pressure surface, decline curve
//! - **Ingest**: CSV/LAS well files, remote default file, synthetic fallback
//! - **Render**: plotly figure JSON for the three dashboard views
//! - **API**: axum router with JSON envelope and the embedded page

pub mod api;
pub mod config;
pub mod ingest;
pub mod render;
pub mod reservoir;
pub mod types;

// Re-export configuration
pub use config::TwinConfig;

// Re-export commonly used types
pub use types::{
    DatasetOrigin, DatasetSummary, FieldMetrics, ForecastError, ForecastYear, LoadedDataset,
    WellDataset,
};

// Re-export ingest entry points
pub use ingest::{DataLoadError, DatasetLoader};

// Re-export renderer
pub use render::{DashboardRenderer, DashboardSnapshot};
