//! Editor configuration embedded in the host page.
//!
//! `index.html` may carry a `<script id="editor-config" type="application/json">`
//! block; any field it omits keeps its default.

use avatar_core::EditorConfig;

const CONFIG_ELEMENT_ID: &str = "editor-config";

pub fn load_editor_config() -> EditorConfig {
    let Some(element) = gloo::utils::document().get_element_by_id(CONFIG_ELEMENT_ID) else {
        tracing::debug!("No #{} element, using default editor config", CONFIG_ELEMENT_ID);
        return EditorConfig::default();
    };

    let json = element.text_content().unwrap_or_default();
    if json.trim().is_empty() {
        return EditorConfig::default();
    }

    match EditorConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid editor config, falling back to defaults: {}", e);
            EditorConfig::default()
        }
    }
}
