//! Scalar metrics shown beside the 3D model.

use serde::Serialize;

use super::ForecastYear;

/// Headline field metrics for one forecast year.
///
/// The recovery factor is a display value taken from configuration, not a
/// quantity computed from the well data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMetrics {
    pub target_year: ForecastYear,
    pub field_pressure_psi: i32,
    pub pressure_delta_psi: i32,
    pub field_pressure_label: String,
    pub pressure_delta_label: String,
    pub recovery_factor: String,
    pub recovery_factor_delta: String,
    pub algorithm: String,
}
