//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::transform::MIN_SCALE;

/// Static settings for the editor canvas, photo fitting and export.
///
/// Every field has a default, so a partial JSON document only overrides the
/// keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Backing width of the canvas (and the exported PNG) in pixels.
    pub canvas_width: u32,
    /// Backing height of the canvas (and the exported PNG) in pixels.
    pub canvas_height: u32,
    /// Fraction of the canvas width the photo is fitted into before scaling.
    pub photo_width_fraction: f64,
    /// Fraction of the canvas height the photo is fitted into before scaling.
    pub photo_height_fraction: f64,
    /// Template opacity in the live preview.
    pub preview_template_alpha: f64,
    /// Template opacity in the exported image.
    pub export_template_alpha: f64,
    pub min_scale: f64,
    /// Path the template artwork is fetched from.
    pub template_path: String,
    /// File name of the downloaded export.
    pub export_filename: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500,
            canvas_height: 500,
            photo_width_fraction: 0.3,
            photo_height_fraction: 0.6,
            preview_template_alpha: 0.9,
            export_template_alpha: 1.0,
            min_scale: MIN_SCALE,
            template_path: "/mubarak-hero.png".to_string(),
            export_filename: "mubarak-avatar.png".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parses a JSON document and validates the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(EditorError::Config(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        for (name, value) in [
            ("photo_width_fraction", self.photo_width_fraction),
            ("photo_height_fraction", self.photo_height_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(EditorError::Config(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        for (name, value) in [
            ("preview_template_alpha", self.preview_template_alpha),
            ("export_template_alpha", self.export_template_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EditorError::Config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if !(self.min_scale > 0.0 && self.min_scale.is_finite()) {
            return Err(EditorError::Config(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        Ok(())
    }

    /// Template to load: an explicit override, else the configured path.
    pub fn resolve_template<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|path| !path.is_empty())
            .unwrap_or(self.template_path.as_str())
    }

    /// Canvas center in backing pixels.
    pub fn canvas_center(&self) -> (f64, f64) {
        (
            f64::from(self.canvas_width) * 0.5,
            f64::from(self.canvas_height) * 0.5,
        )
    }
}
