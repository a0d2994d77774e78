//! Default dataset resolution.
//!
//! Tries, in order: the configured local file, the remote URL template
//! (when the local file fails to load), and finally the synthetic well.
//! Each failed source is logged and the last error becomes the fallback
//! reason recorded in [`DatasetOrigin::Synthetic`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use super::{
    load_file, parse_bytes, remote, DataFormat, DataLoadError, SyntheticError, SyntheticGenerator,
};
use crate::config::TwinConfig;
use crate::types::{DatasetOrigin, LoadedDataset};

#[derive(Debug, Error)]
pub enum LoaderInitError {
    #[error(transparent)]
    Synthetic(#[from] SyntheticError),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Resolves the default well dataset.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    default_path: Option<PathBuf>,
    remote_template: Option<String>,
    http: Option<reqwest::Client>,
    synthetic: SyntheticGenerator,
}

impl DatasetLoader {
    pub fn from_config(config: &TwinConfig) -> Result<Self, LoaderInitError> {
        let http = match config.data.remote_url_template {
            Some(_) => Some(
                reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.data.remote_timeout_secs))
                    .build()?,
            ),
            None => None,
        };

        Ok(Self {
            default_path: config.data.default_path.clone(),
            remote_template: config.data.remote_url_template.clone(),
            http,
            synthetic: SyntheticGenerator::new(&config.synthetic)?,
        })
    }

    /// Replace the default file path (CLI `--data`).
    #[must_use]
    pub fn with_default_path(mut self, path: Option<PathBuf>) -> Self {
        self.default_path = path;
        self
    }

    pub fn default_path(&self) -> Option<&Path> {
        self.default_path.as_deref()
    }

    /// Load an explicit file. No fallback.
    pub fn load_path(&self, path: &Path) -> Result<LoadedDataset, DataLoadError> {
        let dataset = load_file(path)?;
        Ok(LoadedDataset::new(
            dataset,
            DatasetOrigin::DefaultFile {
                path: path.display().to_string(),
            },
        ))
    }

    /// Load the default dataset, falling back to the synthetic well.
    ///
    /// Only fails if the synthetic table itself cannot be built.
    pub async fn load_default(&self) -> Result<LoadedDataset, SyntheticError> {
        let mut last_error: Option<DataLoadError> = None;

        if let Some(ref path) = self.default_path {
            match self.load_path(path) {
                Ok(loaded) => return Ok(loaded),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Default well file unavailable");
                    last_error = Some(e);

                    if let Some(loaded) = self.try_remote(path, &mut last_error).await {
                        return Ok(loaded);
                    }
                }
            }
        }

        let reason = last_error.map_or_else(
            || "no default data source configured".to_string(),
            |e| e.to_string(),
        );
        info!(reason = %reason, "Using synthetic well data");
        Ok(LoadedDataset::new(
            self.synthetic.generate()?,
            DatasetOrigin::Synthetic { reason },
        ))
    }

    async fn try_remote(
        &self,
        path: &Path,
        last_error: &mut Option<DataLoadError>,
    ) -> Option<LoadedDataset> {
        let (template, http) = match (&self.remote_template, &self.http) {
            (Some(t), Some(h)) => (t, h),
            _ => return None,
        };
        let file_name = path.file_name()?.to_string_lossy().into_owned();

        let result = async {
            DataFormat::from_file_name(&file_name)?;
            let url = remote::resolve_url(template, &file_name)?;
            let bytes = remote::fetch(http, &url).await?;
            let dataset = parse_bytes(&file_name, &bytes)?;
            Ok::<_, DataLoadError>(LoadedDataset::new(
                dataset,
                DatasetOrigin::Remote {
                    url: url.to_string(),
                },
            ))
        }
        .await;

        match result {
            Ok(loaded) => Some(loaded),
            Err(e) => {
                warn!(file = %file_name, error = %e, "Remote well file unavailable");
                *last_error = Some(e);
                None
            }
        }
    }
}
