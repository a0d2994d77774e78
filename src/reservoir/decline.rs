//! Exponential decline-curve forecast.

use serde::Serialize;

/// Exponential (Arps b = 0) decline model.
///
/// q(t) = q_i · e^(−D·(t − t₀))
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeclineModel {
    /// Initial rate at `start_year` (bbl/day)
    pub initial_rate: f64,
    /// Nominal annual decline rate (1/year)
    pub decline_rate: f64,
    pub start_year: i32,
    pub end_year: i32,
}

impl Default for DeclineModel {
    fn default() -> Self {
        Self {
            initial_rate: 1000.0,
            decline_rate: 0.06,
            start_year: 2020,
            end_year: 2035,
        }
    }
}

impl DeclineModel {
    pub fn rate_at(&self, year: i32) -> f64 {
        self.initial_rate * (-self.decline_rate * f64::from(year - self.start_year)).exp()
    }

    /// One point per year over `start_year..=end_year`.
    pub fn series(&self) -> ProductionSeries {
        let years: Vec<i32> = (self.start_year..=self.end_year).collect();
        let rates = years.iter().map(|&y| self.rate_at(y)).collect();
        ProductionSeries { years, rates }
    }
}

/// Yearly production forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionSeries {
    pub years: Vec<i32>,
    pub rates: Vec<f64>,
}

impl ProductionSeries {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Estimated ultimate recovery over the window, in rate·years.
    ///
    /// Trapezoidal integration of the yearly samples.
    pub fn eur(&self) -> f64 {
        self.years
            .windows(2)
            .zip(self.rates.windows(2))
            .map(|(y, q)| f64::from(y[1] - y[0]) * (q[0] + q[1]) / 2.0)
            .sum()
    }

    pub fn is_strictly_decreasing(&self) -> bool {
        self.rates.windows(2).all(|w| w[1] < w[0])
    }
}
