//! Reservoir proxy model
//!
//! Closed-form derivations driven by the forecast horizon:
//! - **Pressure depletion**: linear drop from the initial field pressure
//! - **Pressure grid**: 50×50 synthetic structure map with a pressure overlay
//! - **Decline curve**: exponential production forecast and EUR
//!
//! Everything here is pure and recomputed on every render.

mod decline;
mod grid;

pub use decline::{DeclineModel, ProductionSeries};
pub use grid::{PressureGrid, GRID_EXTENT_M, GRID_POINTS};

use crate::types::ForecastYear;

/// Initial field pressure at the start of the forecast window (psi).
pub const INITIAL_FIELD_PRESSURE_PSI: i32 = 3200;

/// Depletion per forecast year (psi/year).
pub const PRESSURE_DROP_PER_YEAR_PSI: i32 = 15;

/// Pressure drop at the forecast horizon.
///
/// drop = (year − 2026) × 15
pub const fn pressure_drop_psi(year: ForecastYear) -> i32 {
    year.years_from_start() * PRESSURE_DROP_PER_YEAR_PSI
}

/// Average field pressure at the forecast horizon.
pub const fn field_pressure_psi(year: ForecastYear) -> i32 {
    INITIAL_FIELD_PRESSURE_PSI - pressure_drop_psi(year)
}

/// `n` evenly spaced samples from `start` to `end`, both inclusive.
///
/// The last sample is pinned to `end` so float accumulation never leaves
/// the grid edge short.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: i32) -> ForecastYear {
        ForecastYear::new(y).unwrap()
    }

    #[test]
    fn test_pressure_at_window_edges() {
        assert_eq!(pressure_drop_psi(year(2026)), 0);
        assert_eq!(field_pressure_psi(year(2026)), 3200);
        assert_eq!(pressure_drop_psi(year(2035)), 135);
        assert_eq!(field_pressure_psi(year(2035)), 3065);
    }

    #[test]
    fn test_pressure_formula_for_every_year() {
        for y in ForecastYear::all() {
            let drop = (y.get() - 2026) * 15;
            assert_eq!(pressure_drop_psi(y), drop);
            assert_eq!(field_pressure_psi(y), 3200 - drop);
        }
    }

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(2000.0, 3500.0, 100);
        assert_eq!(v.len(), 100);
        assert_eq!(v[0], 2000.0);
        assert_eq!(v[99], 3500.0);
        let step = 1500.0 / 99.0;
        assert!((v[1] - v[0] - step).abs() < 1e-9);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
        assert_eq!(linspace(0.0, 1.0, 2), vec![0.0, 1.0]);
    }
}
