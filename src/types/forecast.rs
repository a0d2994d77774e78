//! Forecast horizon: the single user-controlled parameter of the twin.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// First selectable forecast year.
pub const FORECAST_YEAR_MIN: i32 = 2026;

/// Last selectable forecast year.
pub const FORECAST_YEAR_MAX: i32 = 2035;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("Forecast year {year} is outside {min}..={max}")]
    OutOfRange { year: i32, min: i32, max: i32 },

    #[error("Forecast year '{0}' is not an integer")]
    NotAnInteger(String),
}

/// A forecast year bounded to `FORECAST_YEAR_MIN..=FORECAST_YEAR_MAX`.
///
/// Construction is the only validation point; every derived quantity
/// (pressure drop, decline marker) can assume the year is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ForecastYear(i32);

impl ForecastYear {
    pub const MIN: Self = Self(FORECAST_YEAR_MIN);
    pub const MAX: Self = Self(FORECAST_YEAR_MAX);

    pub fn new(year: i32) -> Result<Self, ForecastError> {
        if (FORECAST_YEAR_MIN..=FORECAST_YEAR_MAX).contains(&year) {
            Ok(Self(year))
        } else {
            Err(ForecastError::OutOfRange {
                year,
                min: FORECAST_YEAR_MIN,
                max: FORECAST_YEAR_MAX,
            })
        }
    }

    /// Parse a query-string value such as `"2030"`.
    pub fn parse(raw: &str) -> Result<Self, ForecastError> {
        let year = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ForecastError::NotAnInteger(raw.to_string()))?;
        Self::new(year)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// Years elapsed since the start of the forecast window.
    pub const fn years_from_start(self) -> i32 {
        self.0 - FORECAST_YEAR_MIN
    }

    /// Every selectable year in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (FORECAST_YEAR_MIN..=FORECAST_YEAR_MAX).map(Self)
    }
}

impl Default for ForecastYear {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<i32> for ForecastYear {
    type Error = ForecastError;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Self::new(year)
    }
}

impl fmt::Display for ForecastYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
