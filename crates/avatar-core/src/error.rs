//! Error types for the avatar editor.

/// Errors surfaced by decoding, exporting and configuring the editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid editor config: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
