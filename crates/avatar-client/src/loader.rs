//! Fetching and decoding the template and user photos.

use avatar_core::decode_image;
use gloo::net::http::Request;
use tracing::debug;

use crate::canvas::LoadedImage;
use crate::error::ClientError;

/// Downloads an image served alongside the app and decodes it.
pub async fn fetch_image(path: &str) -> Result<LoadedImage, ClientError> {
    debug!("Fetching image: GET {path}");

    let fetch_error = |reason: String| ClientError::Fetch {
        path: path.to_string(),
        reason,
    };

    let response = Request::get(path)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    if !response.ok() {
        return Err(fetch_error(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }

    let bytes = response
        .binary()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    decode_loaded(&bytes)
}

/// Reads a user-selected file fully into memory and decodes it.
pub async fn load_file_image(file: &gloo::file::File) -> Result<LoadedImage, ClientError> {
    debug!("Reading {} ({} bytes)", file.name(), file.size());

    let bytes = gloo::file::futures::read_as_bytes(file)
        .await
        .map_err(|e| ClientError::Js(e.to_string()))?;

    decode_loaded(&bytes)
}

fn decode_loaded(bytes: &[u8]) -> Result<LoadedImage, ClientError> {
    let bitmap = decode_image(bytes)?;
    LoadedImage::from_bitmap(bitmap)
}
