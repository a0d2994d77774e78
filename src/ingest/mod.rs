//! Well data ingest
//!
//! Turns CSV and LAS well files into a [`WellDataset`]:
//! - `csv`: header + comma-separated rows, quote aware
//! - `las`: LAS 2.0 (`~V`, `~W`, `~C`, `~A` sections), wrapped or not
//! - `synthetic`: fallback table when no real file can be loaded
//! - `remote`: optional fetch of the default file from a public URL
//! - `loader`: source resolution for the default dataset
//!
//! Failures are reported as [`DataLoadError`]. Only the default source falls
//! back to synthetic data; uploads and explicit files surface their error.

pub mod csv;
pub mod las;
mod loader;
pub mod remote;
pub mod synthetic;

pub use loader::{DatasetLoader, LoaderInitError};
pub use synthetic::{SyntheticError, SyntheticGenerator};

use std::path::Path;
use thiserror::Error;

use crate::types::{DatasetOrigin, LoadedDataset, ShapeError, WellDataset};

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Data source not found: {0}")]
    NotFound(String),

    #[error("Failed to parse {source_name}: {message}")]
    ParseError { source_name: String, message: String },

    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Remote fetch failed for {url}: {message}")]
    Remote { url: String, message: String },
}

impl DataLoadError {
    pub(crate) fn parse(source_name: &str, message: impl Into<String>) -> Self {
        Self::ParseError {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for API responses.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::ParseError { .. } => "PARSE_ERROR",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Io { .. } => "IO_ERROR",
            Self::Remote { .. } => "REMOTE_ERROR",
        }
    }
}

/// Well file formats the twin can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Las,
}

impl DataFormat {
    /// Pick a format from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Result<Self, DataLoadError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("las") => Ok(Self::Las),
            Some(other) => Err(DataLoadError::UnsupportedFormat(format!(
                "'.{other}' files are not supported (expected .csv or .las)"
            ))),
            None => Err(DataLoadError::UnsupportedFormat(format!(
                "'{name}' has no file extension (expected .csv or .las)"
            ))),
        }
    }
}

/// Decode raw file bytes named `file_name`.
pub fn parse_bytes(file_name: &str, bytes: &[u8]) -> Result<WellDataset, DataLoadError> {
    let format = DataFormat::from_file_name(file_name)?;
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DataLoadError::parse(file_name, format!("not valid UTF-8 text ({e})")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    match format {
        DataFormat::Csv => csv::parse_csv(file_name, text),
        DataFormat::Las => las::parse_las(file_name, text),
    }
}

/// Read and decode a well file from disk.
pub fn load_file(path: &Path) -> Result<WellDataset, DataLoadError> {
    let name = path.display().to_string();
    DataFormat::from_file_name(&name)?;

    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DataLoadError::NotFound(name.clone())
        } else {
            DataLoadError::Io {
                path: name.clone(),
                source: e,
            }
        }
    })?;

    let dataset = parse_bytes(&name, &bytes)?;
    tracing::info!(file = %name, rows = dataset.len(), columns = dataset.columns().len(), "Well file loaded");
    Ok(dataset)
}

/// Decode an uploaded file. Never falls back: the caller gets the error.
pub fn load_upload(file_name: &str, bytes: &[u8]) -> Result<LoadedDataset, DataLoadError> {
    let dataset = parse_bytes(file_name, bytes)?;
    Ok(LoadedDataset::new(
        dataset,
        DatasetOrigin::Uploaded {
            file_name: file_name.to_string(),
        },
    ))
}

/// Shared tail of both parsers: shape check plus at least one usable
/// depth/value pair in the first two columns.
pub(crate) fn finish_dataset(
    source_name: &str,
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
) -> Result<WellDataset, DataLoadError> {
    if rows.is_empty() {
        return Err(DataLoadError::parse(source_name, "no data rows"));
    }

    let dataset = WellDataset::new(columns, rows).map_err(|e: ShapeError| {
        DataLoadError::parse(source_name, e.to_string())
    })?;

    if dataset.log_points().is_empty() {
        return Err(DataLoadError::parse(
            source_name,
            "no numeric depth/value pairs in the first two columns",
        ));
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_file_name("well.csv").unwrap(), DataFormat::Csv);
        assert_eq!(DataFormat::from_file_name("WELL.LAS").unwrap(), DataFormat::Las);
        assert_eq!(
            DataFormat::from_file_name("Data/Norway-NA-15_47_9-F-9 A depth.csv").unwrap(),
            DataFormat::Csv
        );
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["well.xlsx", "well", "archive.las.zip"] {
            let err = DataFormat::from_file_name(name).unwrap_err();
            assert!(matches!(err, DataLoadError::UnsupportedFormat(_)), "{name}");
            assert_eq!(err.code(), "UNSUPPORTED_FORMAT");
        }
    }

    #[test]
    fn test_parse_bytes_rejects_binary() {
        let err = parse_bytes("well.csv", &[0xff, 0xfe, 0x00, 0x81]).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
        assert_eq!(err.code(), "PARSE_ERROR");
    }

    #[test]
    fn test_parse_bytes_strips_bom() {
        let ds = parse_bytes("w.csv", "\u{feff}Depth,GR\n2000,45\n".as_bytes()).unwrap();
        assert_eq!(ds.depth_column(), "Depth");
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = load_file(Path::new("/definitely/missing/well.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::NotFound(_)));
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_load_file_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Depth,GR").unwrap();
        writeln!(file, "2500.0,61.2").unwrap();
        writeln!(file, "2500.5,63.8").unwrap();
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.value_column(), "GR");
    }

    #[test]
    fn test_upload_origin() {
        let loaded = load_upload("field.csv", b"Depth,Value\n1,2\n").unwrap();
        assert!(!loaded.is_fallback());
        assert_eq!(
            loaded.origin,
            DatasetOrigin::Uploaded {
                file_name: "field.csv".into()
            }
        );
    }

    #[test]
    fn test_finish_dataset_requires_numeric_pair() {
        let err = finish_dataset(
            "x.csv",
            vec!["Depth".into(), "Facies".into()],
            vec![vec![2000.0, f64::NAN]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("no numeric depth/value pairs"));
    }
}
