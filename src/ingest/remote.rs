//! Remote fetch of the default well file.
//!
//! Used when the configured local file cannot be loaded and a public URL
//! template (`https://host/path/{file}`) is set.

use reqwest::{StatusCode, Url};

use super::DataLoadError;

/// Fill `{file}` in the template with the percent-encoded file name and
/// parse the result as a URL.
pub fn resolve_url(template: &str, file_name: &str) -> Result<Url, DataLoadError> {
    let raw = template.replace("{file}", &encode_path_segment(file_name));
    Url::parse(&raw).map_err(|e| DataLoadError::Remote {
        url: raw.clone(),
        message: format!("invalid URL: {e}"),
    })
}

/// Percent-encode `name` as one path segment (`/`, `?`, `#`, `%` and
/// spaces included).
fn encode_path_segment(name: &str) -> String {
    let Ok(mut scratch) = Url::parse("http://localhost/") else {
        return name.to_string();
    };
    if let Ok(mut segments) = scratch.path_segments_mut() {
        segments.clear().push(name);
    }
    scratch.path().trim_start_matches('/').to_string()
}

/// GET the file body. 404 maps to `NotFound`; everything else that is
/// not a success is a `Remote` error.
pub async fn fetch(client: &reqwest::Client, url: &Url) -> Result<Vec<u8>, DataLoadError> {
    let remote_err = |message: String| DataLoadError::Remote {
        url: url.to_string(),
        message,
    };

    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| remote_err(e.to_string()))?;

    match resp.status() {
        status if status.is_success() => {
            let bytes = resp.bytes().await.map_err(|e| remote_err(e.to_string()))?;
            tracing::info!(url = %url, bytes = bytes.len(), "Fetched remote well file");
            Ok(bytes.to_vec())
        }
        StatusCode::NOT_FOUND => Err(DataLoadError::NotFound(url.to_string())),
        status => Err(remote_err(format!("server returned {status}"))),
    }
}
