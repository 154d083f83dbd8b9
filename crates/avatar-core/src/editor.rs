//! Editor state: transform controller, image layers and upload ordering.

use crate::compositor::{Compositor, SceneLayers};
use crate::config::EditorConfig;
use crate::gesture::TransformController;
use crate::transform::PhotoTransform;
use crate::upload::{UploadSequence, UploadTicket};

/// Result of handing a finished decode back to the editor.
#[derive(Debug)]
pub enum UploadOutcome<E> {
    /// The photo replaced the previous one and the transform was reset.
    Committed,
    /// A newer upload started meanwhile; the result was discarded.
    Stale,
    /// The latest upload failed. Photo and transform are unchanged.
    Failed(E),
}

/// Everything the editor view owns, independent of how images are stored.
#[derive(Debug, Clone)]
pub struct EditorState<I> {
    controller: TransformController,
    layers: SceneLayers<I>,
    uploads: UploadSequence,
    compositor: Compositor,
}

impl<I> EditorState<I> {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            controller: TransformController::new(config.min_scale),
            layers: SceneLayers::new(),
            uploads: UploadSequence::new(),
            compositor: Compositor::new(config),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        self.compositor.config()
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn controller(&self) -> &TransformController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TransformController {
        &mut self.controller
    }

    pub fn layers(&self) -> &SceneLayers<I> {
        &self.layers
    }

    pub fn transform(&self) -> &PhotoTransform {
        self.controller.transform()
    }

    pub fn begin_upload(&mut self) -> UploadTicket {
        self.uploads.begin()
    }

    pub fn is_current_upload(&self, ticket: UploadTicket) -> bool {
        self.uploads.is_current(ticket)
    }

    /// Commits a decoded photo if `ticket` is still the latest upload.
    ///
    /// A committed photo replaces the previous one and resets the transform.
    pub fn commit_upload(&mut self, ticket: UploadTicket, photo: I) -> bool {
        if !self.uploads.is_current(ticket) {
            tracing::warn!("Dropping stale decode result for upload #{}", ticket.id());
            return false;
        }
        self.layers.set_photo(photo);
        self.controller.reset();
        tracing::info!("Photo loaded for upload #{}", ticket.id());
        true
    }

    /// Applies a finished decode for `ticket`, successful or not.
    ///
    /// Only a failure of the latest upload is reported as `Failed`; failures
    /// of superseded uploads are as stale as their successes.
    pub fn finish_upload<E>(
        &mut self,
        ticket: UploadTicket,
        result: std::result::Result<I, E>,
    ) -> UploadOutcome<E> {
        match result {
            Ok(photo) => {
                if self.commit_upload(ticket, photo) {
                    UploadOutcome::Committed
                } else {
                    UploadOutcome::Stale
                }
            }
            Err(_) if !self.uploads.is_current(ticket) => {
                tracing::debug!("Ignoring failure of superseded upload #{}", ticket.id());
                UploadOutcome::Stale
            }
            Err(e) => UploadOutcome::Failed(e),
        }
    }

    pub fn set_template(&mut self, template: I) -> bool {
        let accepted = self.layers.set_template(template);
        if accepted {
            tracing::info!("Template ready");
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use crate::geometry::{CanvasLayout, Point};
    use crate::raster::{Bitmap, decode_image};
    use image::Rgba;

    fn layout() -> CanvasLayout {
        CanvasLayout::unscaled(0.0, 0.0, &EditorConfig::default())
    }

    #[test]
    fn test_new_upload_resets_transform() {
        let mut state = EditorState::new(EditorConfig::default());
        let ticket = state.begin_upload();
        assert!(state.commit_upload(ticket, "first"));

        state.controller_mut().begin_drag(Point::new(0.0, 0.0));
        state.controller_mut().update_pointer(Point::new(30.0, -20.0), &layout());
        state.controller_mut().end_gesture();
        state.controller_mut().begin_resize(Point::new(350.0, 250.0));
        state.controller_mut().update_pointer(Point::new(450.0, 250.0), &layout());
        state.controller_mut().toggle_flip();
        assert!(!state.transform().is_default());

        let ticket = state.begin_upload();
        assert!(state.commit_upload(ticket, "second"));
        assert!(state.transform().is_default());
        assert!(!state.controller().is_active());
        assert_eq!(state.layers().photo(), Some(&"second"));
    }

    #[test]
    fn test_stale_decode_is_dropped() {
        let mut state = EditorState::new(EditorConfig::default());
        let older = state.begin_upload();
        let newer = state.begin_upload();

        assert!(state.commit_upload(newer, "newer"));
        state.controller_mut().toggle_flip();

        assert!(!state.commit_upload(older, "older"));
        assert_eq!(state.layers().photo(), Some(&"newer"));
        // The stale result must not reset the transform either.
        assert!(state.transform().flipped);
    }

    #[test]
    fn test_failed_decode_leaves_state_untouched() {
        let mut state: EditorState<Bitmap> = EditorState::new(EditorConfig::default());
        let ticket = state.begin_upload();
        let photo = Bitmap::from_pixel(4, 2, Rgba([10, 20, 30, 255]));
        assert!(matches!(
            state.finish_upload(ticket, Ok::<_, EditorError>(photo.clone())),
            UploadOutcome::Committed
        ));
        state.controller_mut().toggle_flip();

        let failed = state.begin_upload();
        let outcome = state.finish_upload(failed, decode_image(b"not an image at all"));
        assert!(matches!(outcome, UploadOutcome::Failed(EditorError::Decode(_))));
        assert_eq!(state.layers().photo(), Some(&photo));
        assert!(state.transform().flipped);
    }

    #[test]
    fn test_superseded_failure_is_stale() {
        let mut state: EditorState<Bitmap> = EditorState::new(EditorConfig::default());
        let older = state.begin_upload();
        let newer = state.begin_upload();

        let outcome = state.finish_upload(older, decode_image(b"garbage"));
        assert!(matches!(outcome, UploadOutcome::Stale));

        let photo = Bitmap::from_pixel(3, 3, Rgba([1, 2, 3, 255]));
        assert!(matches!(
            state.finish_upload(newer, Ok::<_, EditorError>(photo.clone())),
            UploadOutcome::Committed
        ));
        assert_eq!(state.layers().photo(), Some(&photo));
    }

    #[test]
    fn test_stale_success_is_reported() {
        let mut state = EditorState::new(EditorConfig::default());
        let older = state.begin_upload();
        let _newer = state.begin_upload();
        assert!(matches!(
            state.finish_upload(older, Ok::<_, ()>("older")),
            UploadOutcome::Stale
        ));
        assert!(!state.layers().has_photo());
    }

    #[test]
    fn test_template_set_once() {
        let mut state = EditorState::new(EditorConfig::default());
        assert!(state.set_template("template"));
        assert!(!state.set_template("other"));
        assert_eq!(state.layers().template(), Some(&"template"));
    }
}
