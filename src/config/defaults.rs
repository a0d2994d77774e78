//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Server
// ============================================================================

/// HTTP server bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:8080";

/// Largest accepted well-file upload (bytes). 32 MiB.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

// ============================================================================
// Data sources
// ============================================================================

/// Bundled well file read when nothing has been uploaded.
pub const DEFAULT_DATA_PATH: &str = "Data/Norway-NA-15_47_9-F-9 A depth.csv";

/// Timeout for the optional remote well-file fetch (seconds).
pub const REMOTE_TIMEOUT_SECS: u64 = 15;

/// File extensions accepted by the upload control.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".csv", ".las"];

// ============================================================================
// Display
// ============================================================================

/// Rows shown in the well table preview.
pub const TABLE_PREVIEW_ROWS: usize = 15;

/// Recovery factor headline value.
pub const RECOVERY_FACTOR: &str = "34.2%";

/// Recovery factor change indicator.
pub const RECOVERY_FACTOR_DELTA: &str = "+0.45%";

/// Caption under the metrics panel.
pub const ALGORITHM_CAPTION: &str = "AI-Proxy Simulation";

// ============================================================================
// Synthetic fallback well
// ============================================================================

pub const SYNTHETIC_ROWS: usize = 100;
pub const SYNTHETIC_DEPTH_START: f64 = 2000.0;
pub const SYNTHETIC_DEPTH_END: f64 = 3500.0;
pub const SYNTHETIC_VALUE_MEAN: f64 = 50.0;
pub const SYNTHETIC_VALUE_STD: f64 = 10.0;
