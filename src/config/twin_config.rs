//! Twin Configuration - operator-tunable TOML values
//!
//! Every section implements `Default` with the values the dashboard ships
//! with, so an absent config file yields the stock dashboard. The variant
//! differences of earlier dashboard builds (default year, preview rows,
//! recovery factor) are plain settings here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::{FORECAST_YEAR_MAX, FORECAST_YEAR_MIN};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a twin deployment.
///
/// Load with `TwinConfig::load()` which searches:
/// 1. `$TWIN_CONFIG` env var
/// 2. `./twin_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwinConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub synthetic: SyntheticConfig,

    #[serde(default)]
    pub branding: BrandingConfig,
}

impl TwinConfig {
    /// Load configuration using the standard search order:
    /// 1. `$TWIN_CONFIG` environment variable
    /// 2. `./twin_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("TWIN_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded twin config from TWIN_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from TWIN_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "TWIN_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("twin_config.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded twin config from ./twin_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./twin_config.toml, using defaults");
                }
            }
        }

        info!("No twin_config.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    ///
    /// Unknown keys are logged as warnings with a suggested correction and
    /// never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate settings for internal consistency.
    ///
    /// Rules:
    /// - Default forecast year must be selectable
    /// - Preview must show at least one row
    /// - Synthetic well needs rows, an ascending depth range and a positive spread
    /// - Timeouts and upload limit must be non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if !(FORECAST_YEAR_MIN..=FORECAST_YEAR_MAX).contains(&self.forecast.default_year) {
            errors.push(format!(
                "forecast.default_year ({}) must be within {}..={}",
                self.forecast.default_year, FORECAST_YEAR_MIN, FORECAST_YEAR_MAX
            ));
        }

        if self.display.table_preview_rows == 0 {
            errors.push("display.table_preview_rows must be > 0".to_string());
        }

        let s = &self.synthetic;
        if s.rows == 0 {
            errors.push("synthetic.rows must be > 0".to_string());
        }
        if !(s.depth_start.is_finite() && s.depth_end.is_finite()) || s.depth_start >= s.depth_end {
            errors.push(format!(
                "synthetic.depth_start ({}) must be less than synthetic.depth_end ({})",
                s.depth_start, s.depth_end
            ));
        }
        if !s.value_mean.is_finite() {
            errors.push("synthetic.value_mean must be finite".to_string());
        }
        if !(s.value_std.is_finite() && s.value_std > 0.0) {
            errors.push(format!(
                "synthetic.value_std ({}) must be a positive number",
                s.value_std
            ));
        }

        if self.data.remote_timeout_secs == 0 {
            errors.push("data.remote_timeout_secs must be > 0".to_string());
        }
        if let Some(ref template) = self.data.remote_url_template {
            if !template.contains("{file}") {
                errors.push(format!(
                    "data.remote_url_template ('{template}') must contain a {{file}} placeholder"
                ));
            }
        }

        if self.server.max_upload_bytes == 0 {
            errors.push("server.max_upload_bytes must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `TWIN_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,

    /// Largest accepted upload body (bytes).
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Cross-origin hosts allowed to call the API (empty = same-origin only).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}

const fn default_max_upload_bytes() -> usize {
    defaults::MAX_UPLOAD_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            max_upload_bytes: default_max_upload_bytes(),
            cors_origins: Vec::new(),
        }
    }
}

/// Where the default well dataset comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Local well file read at startup (CSV or LAS).
    #[serde(default = "default_data_path")]
    pub default_path: Option<PathBuf>,

    /// Public URL template tried when the local file is missing.
    /// `{file}` is replaced with the file name of `default_path`.
    #[serde(default)]
    pub remote_url_template: Option<String>,

    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
}

#[allow(clippy::unnecessary_wraps)]
fn default_data_path() -> Option<PathBuf> {
    Some(PathBuf::from(defaults::DEFAULT_DATA_PATH))
}

const fn default_remote_timeout_secs() -> u64 {
    defaults::REMOTE_TIMEOUT_SECS
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            default_path: default_data_path(),
            remote_url_template: None,
            remote_timeout_secs: default_remote_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Slider position on first load.
    #[serde(default = "default_forecast_year")]
    pub default_year: i32,
}

const fn default_forecast_year() -> i32 {
    FORECAST_YEAR_MIN
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_year: default_forecast_year(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_table_preview_rows")]
    pub table_preview_rows: usize,

    #[serde(default = "default_recovery_factor")]
    pub recovery_factor: String,

    #[serde(default = "default_recovery_factor_delta")]
    pub recovery_factor_delta: String,

    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

const fn default_table_preview_rows() -> usize {
    defaults::TABLE_PREVIEW_ROWS
}

fn default_recovery_factor() -> String {
    defaults::RECOVERY_FACTOR.to_string()
}

fn default_recovery_factor_delta() -> String {
    defaults::RECOVERY_FACTOR_DELTA.to_string()
}

fn default_algorithm() -> String {
    defaults::ALGORITHM_CAPTION.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            table_preview_rows: default_table_preview_rows(),
            recovery_factor: default_recovery_factor(),
            recovery_factor_delta: default_recovery_factor_delta(),
            algorithm: default_algorithm(),
        }
    }
}

/// Shape of the synthetic well used when no real data can be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    #[serde(default = "default_synthetic_rows")]
    pub rows: usize,

    #[serde(default = "default_depth_start")]
    pub depth_start: f64,

    #[serde(default = "default_depth_end")]
    pub depth_end: f64,

    #[serde(default = "default_value_mean")]
    pub value_mean: f64,

    #[serde(default = "default_value_std")]
    pub value_std: f64,

    /// Fixed RNG seed; unset draws fresh values on every generation.
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_synthetic_rows() -> usize {
    defaults::SYNTHETIC_ROWS
}

const fn default_depth_start() -> f64 {
    defaults::SYNTHETIC_DEPTH_START
}

const fn default_depth_end() -> f64 {
    defaults::SYNTHETIC_DEPTH_END
}

const fn default_value_mean() -> f64 {
    defaults::SYNTHETIC_VALUE_MEAN
}

const fn default_value_std() -> f64 {
    defaults::SYNTHETIC_VALUE_STD
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            rows: default_synthetic_rows(),
            depth_start: default_depth_start(),
            depth_end: default_depth_end(),
            value_mean: default_value_mean(),
            value_std: default_value_std(),
            seed: None,
        }
    }
}

/// Page text shown by the embedded dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingConfig {
    #[serde(default = "default_page_title")]
    pub page_title: String,

    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_subtitle")]
    pub subtitle: String,

    #[serde(default = "default_footer")]
    pub footer: String,
}

fn default_page_title() -> String {
    "Reservoir Digital Twin".to_string()
}

fn default_header() -> String {
    "Deep-Earth Digital Twin Platform".to_string()
}

fn default_subtitle() -> String {
    "Future Energy Solutions".to_string()
}

fn default_footer() -> String {
    "Proprietary Digital Twin Engine".to_string()
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            header: default_header(),
            subtitle: default_subtitle(),
            footer: default_footer(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
