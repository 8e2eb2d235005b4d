use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::utils::http::fetch;

const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Download an image and inline it as a `data:` URI.
///
/// Any failure is logged and yields `None`; a missing picture never fails an import.
pub async fn fetch_image_data_uri(client: &Client, url: &str, timeout: Duration) -> Option<String> {
    let response = match fetch(client, url, timeout).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Image download failed for {}: {:#}", url, e);
            return None;
        }
    };

    let content_type = image_content_type(
        response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
    );

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Image download failed for {}: {}", url, e);
            return None;
        }
    };

    debug!("Encoded {} bytes of {} from {}", bytes.len(), content_type, url);
    Some(to_data_uri(&content_type, &bytes))
}

/// Declared content type, or `image/jpeg` when the server sent none.
fn image_content_type(declared: Option<&str>) -> String {
    declared
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_IMAGE_TYPE)
        .to_string()
}

pub fn to_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}
