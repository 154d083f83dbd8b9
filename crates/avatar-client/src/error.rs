//! Client-side error type.

use avatar_core::EditorError;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Browser API error: {0}")]
    Js(String),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("Failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },

    #[error("Element not available: {0}")]
    MissingElement(&'static str),
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        ClientError::Js(message)
    }
}
