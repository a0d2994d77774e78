//! Active dataset endpoints: inspect, upload, reset.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;
use tracing::{info, warn};

use super::DashboardState;
use crate::api::envelope::{ApiErrorResponse, ApiResponse};
use crate::ingest;
use crate::types::{DatasetOrigin, DatasetSummary, LoadedDataset};

#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    pub origin: DatasetOrigin,
    pub is_fallback: bool,
    pub summary: DatasetSummary,
}

impl From<&LoadedDataset> for DatasetInfo {
    fn from(loaded: &LoadedDataset) -> Self {
        Self {
            origin: loaded.origin.clone(),
            is_fallback: loaded.is_fallback(),
            summary: loaded.dataset.summary(),
        }
    }
}

/// GET /api/v1/dataset
pub async fn get_dataset(State(state): State<DashboardState>) -> Response {
    let slots = state.datasets.read().await;
    ApiResponse::ok(DatasetInfo::from(slots.active()))
}

/// POST /api/v1/dataset - multipart upload of one `.csv` or `.las` file
///
/// The first part carrying a file name is decoded. On failure the error is
/// returned and the active dataset is left untouched.
pub async fn upload_dataset(
    State(state): State<DashboardState>,
    mut multipart: Multipart,
) -> Response {
    let (file_name, bytes) = loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let Some(name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                match field.bytes().await {
                    Ok(b) => break (name, b),
                    Err(e) => return multipart_error(&e),
                }
            }
            Ok(None) => return ApiErrorResponse::bad_request("No file part in upload"),
            Err(e) => return multipart_error(&e),
        }
    };

    match ingest::load_upload(&file_name, &bytes) {
        Ok(loaded) => {
            info!(
                file = %file_name,
                rows = loaded.dataset.len(),
                columns = loaded.dataset.columns().len(),
                "Dataset uploaded"
            );
            let info = DatasetInfo::from(&loaded);
            state.datasets.write().await.upload = Some(loaded);
            ApiResponse::ok(info)
        }
        Err(e) => {
            warn!(file = %file_name, error = %e, "Upload rejected");
            ApiErrorResponse::from_load_error(&e)
        }
    }
}

/// Oversized bodies keep their 413; anything else is a malformed request.
fn multipart_error(e: &MultipartError) -> Response {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiErrorResponse::payload_too_large(e.body_text())
    } else {
        ApiErrorResponse::bad_request(format!("Malformed multipart body: {}", e.body_text()))
    }
}

/// DELETE /api/v1/dataset - drop the upload and return to the default dataset
pub async fn reset_dataset(State(state): State<DashboardState>) -> Response {
    let mut slots = state.datasets.write().await;
    if slots.upload.take().is_some() {
        info!("Uploaded dataset cleared");
    }
    ApiResponse::ok(DatasetInfo::from(slots.active()))
}
