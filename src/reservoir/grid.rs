//! Synthetic structure map and pressure overlay.

use serde::Serialize;

use super::{linspace, pressure_drop_psi, INITIAL_FIELD_PRESSURE_PSI};
use crate::types::ForecastYear;

/// Samples along each horizontal axis.
pub const GRID_POINTS: usize = 50;

/// Horizontal extent of the model in metres (both axes start at 0).
pub const GRID_EXTENT_M: f64 = 1000.0;

/// Reference depth of the reservoir top (m, negative down).
const DATUM_DEPTH_M: f64 = -3000.0;
/// Amplitude of the east-west structural undulation (m).
const STRUCTURE_AMPLITUDE_M: f64 = 40.0;
/// Amplitude of the north-south pressure variation (psi).
const PRESSURE_AMPLITUDE_PSI: f64 = 30.0;
/// Wavelength divisor shared by both sinusoids (m).
const WAVE_SCALE_M: f64 = 100.0;

/// A 50×50 surface indexed `[i][j]` with `i` along east and `j` along north.
///
/// depth(x)       = −3000 + 40·sin(x/100)
/// pressure(y, t) = 3200 − drop(t) + 30·cos(y/100)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PressureGrid {
    pub east: Vec<f64>,
    pub north: Vec<f64>,
    pub depth: Vec<Vec<f64>>,
    pub pressure: Vec<Vec<f64>>,
}

impl PressureGrid {
    pub fn compute(year: ForecastYear) -> Self {
        let east = linspace(0.0, GRID_EXTENT_M, GRID_POINTS);
        let north = linspace(0.0, GRID_EXTENT_M, GRID_POINTS);
        let base = f64::from(INITIAL_FIELD_PRESSURE_PSI - pressure_drop_psi(year));

        let depth = east
            .iter()
            .map(|&x| {
                let z = DATUM_DEPTH_M + (x / WAVE_SCALE_M).sin() * STRUCTURE_AMPLITUDE_M;
                vec![z; north.len()]
            })
            .collect();

        let pressure = east
            .iter()
            .map(|_| {
                north
                    .iter()
                    .map(|&y| base + (y / WAVE_SCALE_M).cos() * PRESSURE_AMPLITUDE_PSI)
                    .collect()
            })
            .collect();

        Self {
            east,
            north,
            depth,
            pressure,
        }
    }

    /// East coordinate repeated per row, matching the `depth` layout.
    pub fn east_matrix(&self) -> Vec<Vec<f64>> {
        self.east.iter().map(|&x| vec![x; self.north.len()]).collect()
    }

    /// North coordinate repeated per row, matching the `depth` layout.
    pub fn north_matrix(&self) -> Vec<Vec<f64>> {
        vec![self.north.clone(); self.east.len()]
    }

    /// Minimum and maximum pressure over the grid.
    pub fn pressure_range(&self) -> (f64, f64) {
        self.pressure
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                (lo.min(p), hi.max(p))
            })
    }
}
