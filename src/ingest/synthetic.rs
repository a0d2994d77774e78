//! Synthetic fallback well.
//!
//! Two columns, `Depth` evenly spaced over the configured range and
//! `Value` drawn from a normal distribution. With `seed` set the table is
//! reproducible; without it every call draws fresh values.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, NormalError};
use thiserror::Error;

use crate::config::SyntheticConfig;
use crate::reservoir::linspace;
use crate::types::{ShapeError, WellDataset};

#[derive(Debug, Error)]
pub enum SyntheticError {
    #[error("Synthetic well needs at least one row")]
    NoRows,

    #[error("Invalid synthetic value distribution: {0}")]
    Distribution(#[from] NormalError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    rows: usize,
    depth_start: f64,
    depth_end: f64,
    noise: Normal<f64>,
    seed: Option<u64>,
}

impl SyntheticGenerator {
    pub fn new(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.rows == 0 {
            return Err(SyntheticError::NoRows);
        }
        Ok(Self {
            rows: config.rows,
            depth_start: config.depth_start,
            depth_end: config.depth_end,
            noise: Normal::new(config.value_mean, config.value_std)?,
            seed: config.seed,
        })
    }

    pub fn generate(&self) -> Result<WellDataset, SyntheticError> {
        let mut rng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let rows: Vec<Vec<f64>> = linspace(self.depth_start, self.depth_end, self.rows)
            .into_iter()
            .map(|depth| vec![depth, self.noise.sample(&mut rng)])
            .collect();

        tracing::debug!(rows = rows.len(), seeded = self.seed.is_some(), "Generated synthetic well");

        Ok(WellDataset::new(
            vec!["Depth".to_string(), "Value".to_string()],
            rows,
        )?)
    }
}
