//! Well dataset: a positional table of depth and log values.
//!
//! Column 0 is read as depth and column 1 as the log value. No unit or
//! mnemonic checks are made; every other column is carried for display only.
//! Missing cells are stored as `NaN` and serialize as JSON `null`.

use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;

/// Minimum column count for a usable well table (depth + one log).
pub const MIN_DATASET_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Dataset needs at least 2 columns, found {0}")]
    TooFewColumns(usize),

    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Tabular well data, column-named and row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellDataset {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl WellDataset {
    /// Build a dataset, checking that every row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> {
        if columns.len() < MIN_DATASET_COLUMNS {
            return Err(ShapeError::TooFewColumns(columns.len()));
        }
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(ShapeError::RowWidth {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn depth_column(&self) -> &str {
        &self.columns[0]
    }

    pub fn value_column(&self) -> &str {
        &self.columns[1]
    }

    /// First `n` rows (or all of them when the table is shorter).
    pub fn head(&self, n: usize) -> &[Vec<f64>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Column 0 for every row, `NaN` included.
    pub fn depths(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r[0])
    }

    /// Column 1 for every row, `NaN` included.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r[1])
    }

    /// `(depth, value)` pairs where both cells are finite.
    pub fn log_points(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|r| (r[0], r[1]))
            .filter(|(d, v)| d.is_finite() && v.is_finite())
            .collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        let depths: Vec<f64> = self.depths().filter(|d| d.is_finite()).collect();
        let values: Vec<f64> = self.values().filter(|v| v.is_finite()).collect();

        DatasetSummary {
            rows: self.len(),
            columns: self.columns.clone(),
            depth_range: finite_range(&depths),
            value_range: finite_range(&values),
            value_mean: (!values.is_empty()).then(|| values.iter().mean()),
            value_std: (values.len() > 1).then(|| values.iter().std_dev()),
        }
    }
}

fn finite_range(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// Quick-look statistics for the active dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub depth_range: Option<(f64, f64)>,
    pub value_range: Option<(f64, f64)>,
    pub value_mean: Option<f64>,
    /// Sample standard deviation of the log value.
    pub value_std: Option<f64>,
}

/// Where the active dataset came from.
///
/// `Synthetic` is the only fallback state; its `reason` is the load error
/// that forced the fallback, so callers can tell "fallback used" apart
/// from "load succeeded".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetOrigin {
    Uploaded { file_name: String },
    DefaultFile { path: String },
    Remote { url: String },
    Synthetic { reason: String },
}

impl DatasetOrigin {
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Synthetic { .. })
    }
}

/// A dataset together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedDataset {
    pub dataset: WellDataset,
    pub origin: DatasetOrigin,
}

impl LoadedDataset {
    pub const fn new(dataset: WellDataset, origin: DatasetOrigin) -> Self {
        Self { dataset, origin }
    }

    pub const fn is_fallback(&self) -> bool {
        self.origin.is_fallback()
    }
}
