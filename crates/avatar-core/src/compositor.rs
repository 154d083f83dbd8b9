//! Photo + template compositing for preview and export.

use crate::config::EditorConfig;
use crate::error::Result;
use crate::geometry::PhotoPlacement;
use crate::raster::{Bitmap, RasterSurface};
use crate::surface::{Surface, SurfaceImage};
use crate::transform::PhotoTransform;

/// The two image layers of the editor and their readiness.
///
/// The template moves one way from pending to ready; the photo is replaced
/// by each successful upload and never cleared.
#[derive(Debug, Clone)]
pub struct SceneLayers<I> {
    template: Option<I>,
    photo: Option<I>,
}

impl<I> Default for SceneLayers<I> {
    fn default() -> Self {
        Self {
            template: None,
            photo: None,
        }
    }
}

impl<I> SceneLayers<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the template. Only the first successful load is kept.
    pub fn set_template(&mut self, template: I) -> bool {
        if self.template.is_some() {
            return false;
        }
        self.template = Some(template);
        true
    }

    pub fn set_photo(&mut self, photo: I) {
        self.photo = Some(photo);
    }

    pub fn template(&self) -> Option<&I> {
        self.template.as_ref()
    }

    pub fn photo(&self) -> Option<&I> {
        self.photo.as_ref()
    }

    pub fn template_ready(&self) -> bool {
        self.template.is_some()
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }
}

/// Draws the editor scene onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    config: EditorConfig,
}

impl Compositor {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn placement<I: SurfaceImage>(
        &self,
        photo: &I,
        transform: &PhotoTransform,
    ) -> Option<PhotoPlacement> {
        PhotoPlacement::compute(&self.config, photo.width(), photo.height(), transform)
    }

    /// Live preview: photo under a semi-transparent template.
    pub fn render_preview<S: Surface>(
        &self,
        surface: &mut S,
        photo: Option<&S::Image>,
        template: Option<&S::Image>,
        transform: &PhotoTransform,
    ) {
        self.draw_scene(
            surface,
            photo,
            template,
            transform,
            self.config.preview_template_alpha,
        );
    }

    /// Export render: same photo geometry as the preview, opaque template.
    pub fn render_export<S: Surface>(
        &self,
        surface: &mut S,
        photo: Option<&S::Image>,
        template: Option<&S::Image>,
        transform: &PhotoTransform,
    ) {
        self.draw_scene(
            surface,
            photo,
            template,
            transform,
            self.config.export_template_alpha,
        );
    }

    /// Renders the export into an off-screen raster and encodes it as PNG.
    pub fn export_png(
        &self,
        photo: Option<&Bitmap>,
        template: Option<&Bitmap>,
        transform: &PhotoTransform,
    ) -> Result<Vec<u8>> {
        let mut surface = RasterSurface::new(self.config.canvas_width, self.config.canvas_height);
        self.render_export(&mut surface, photo, template, transform);
        let bytes = surface.encode_png()?;
        tracing::info!(
            "Exported {}x{} PNG ({} bytes, photo={}, template={})",
            self.config.canvas_width,
            self.config.canvas_height,
            bytes.len(),
            photo.is_some(),
            template.is_some()
        );
        Ok(bytes)
    }

    fn draw_scene<S: Surface>(
        &self,
        surface: &mut S,
        photo: Option<&S::Image>,
        template: Option<&S::Image>,
        transform: &PhotoTransform,
        template_alpha: f64,
    ) {
        surface.clear();

        if let Some(photo) = photo {
            self.draw_photo(surface, photo, transform);
        }

        match template {
            Some(template) => {
                let (width, height) = surface.size();
                surface.save();
                surface.set_global_alpha(template_alpha);
                surface.draw_image(template, 0.0, 0.0, f64::from(width), f64::from(height));
                surface.restore();
            }
            None => tracing::debug!("Template not ready, drawing photo layer only"),
        }
    }

    fn draw_photo<S: Surface>(&self, surface: &mut S, photo: &S::Image, transform: &PhotoTransform) {
        let Some(placement) = self.placement(photo, transform) else {
            tracing::debug!("Skipping photo without pixels");
            return;
        };
        let (x, y, width, height) = placement.local_rect();

        surface.save();
        surface.translate(placement.center.x, placement.center.y);
        surface.rotate(placement.rotation);
        // Mirror in the photo's own frame, inside the rotation.
        surface.scale(transform.mirror_sign(), 1.0);
        surface.draw_image(photo, x, y, width, height);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::decode_image;
    use image::{Rgba, RgbaImage};

    #[derive(Debug, Clone, PartialEq)]
    struct TestImage {
        name: &'static str,
        width: u32,
        height: u32,
    }

    impl SurfaceImage for TestImage {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Save,
        Restore,
        Translate(f64, f64),
        Rotate(f64),
        Scale(f64, f64),
        Alpha(f64),
        Draw(&'static str, f64, f64, f64, f64),
    }

    /// Records draw calls instead of rasterizing them.
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self { ops: Vec::new() }
        }
    }

    impl Surface for RecordingSurface {
        type Image = TestImage;

        fn size(&self) -> (u32, u32) {
            (500, 500)
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn save(&mut self) {
            self.ops.push(Op::Save);
        }

        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }

        fn translate(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Translate(x, y));
        }

        fn rotate(&mut self, radians: f64) {
            self.ops.push(Op::Rotate(radians));
        }

        fn scale(&mut self, sx: f64, sy: f64) {
            self.ops.push(Op::Scale(sx, sy));
        }

        fn set_global_alpha(&mut self, alpha: f64) {
            self.ops.push(Op::Alpha(alpha));
        }

        fn draw_image(&mut self, image: &TestImage, x: f64, y: f64, width: f64, height: f64) {
            self.ops.push(Op::Draw(image.name, x, y, width, height));
        }
    }

    fn photo() -> TestImage {
        TestImage {
            name: "photo",
            width: 1000,
            height: 500,
        }
    }

    fn template() -> TestImage {
        TestImage {
            name: "template",
            width: 800,
            height: 800,
        }
    }

    fn scenario_transform() -> PhotoTransform {
        PhotoTransform {
            scale: 2.0,
            position_x: 10.0,
            position_y: -5.0,
            rotation: 45.0,
            flipped: true,
        }
    }

    #[test]
    fn test_export_draw_calls_for_transformed_photo() {
        let compositor = Compositor::default();
        let mut surface = RecordingSurface::new();
        compositor.render_export(
            &mut surface,
            Some(&photo()),
            Some(&template()),
            &scenario_transform(),
        );

        let fit = (0.3 * 500.0 / 1000.0_f64).min(0.6 * 500.0 / 500.0);
        let width = fit * 1000.0 * 2.0;
        let height = fit * 500.0 * 2.0;

        assert_eq!(
            surface.ops,
            vec![
                Op::Clear,
                Op::Save,
                Op::Translate(260.0, 245.0),
                Op::Rotate(45.0_f64.to_radians()),
                Op::Scale(-1.0, 1.0),
                Op::Draw("photo", -width / 2.0, -height / 2.0, width, height),
                Op::Restore,
                Op::Save,
                Op::Alpha(1.0),
                Op::Draw("template", 0.0, 0.0, 500.0, 500.0),
                Op::Restore,
            ]
        );
    }

    #[test]
    fn test_preview_matches_export_except_template_alpha() {
        let compositor = Compositor::default();
        let mut preview = RecordingSurface::new();
        let mut export = RecordingSurface::new();
        let transform = scenario_transform();

        compositor.render_preview(&mut preview, Some(&photo()), Some(&template()), &transform);
        compositor.render_export(&mut export, Some(&photo()), Some(&template()), &transform);

        assert_eq!(preview.ops.len(), export.ops.len());
        for (p, e) in preview.ops.iter().zip(&export.ops) {
            match (p, e) {
                (Op::Alpha(pa), Op::Alpha(ea)) => {
                    assert_eq!(*pa, 0.9);
                    assert_eq!(*ea, 1.0);
                }
                _ => assert_eq!(p, e),
            }
        }
    }

    #[test]
    fn test_unflipped_photo_uses_positive_scale() {
        let compositor = Compositor::default();
        let mut surface = RecordingSurface::new();
        compositor.render_preview(&mut surface, Some(&photo()), None, &PhotoTransform::default());
        assert!(surface.ops.contains(&Op::Scale(1.0, 1.0)));
    }

    #[test]
    fn test_export_without_photo_draws_template_only() {
        let compositor = Compositor::default();
        let mut surface = RecordingSurface::new();
        compositor.render_export(&mut surface, None, Some(&template()), &PhotoTransform::default());
        assert_eq!(
            surface.ops,
            vec![
                Op::Clear,
                Op::Save,
                Op::Alpha(1.0),
                Op::Draw("template", 0.0, 0.0, 500.0, 500.0),
                Op::Restore,
            ]
        );
    }

    #[test]
    fn test_pending_template_is_skipped() {
        let compositor = Compositor::default();
        let mut surface = RecordingSurface::new();
        compositor.render_preview(&mut surface, None, None, &PhotoTransform::default());
        assert_eq!(surface.ops, vec![Op::Clear]);
    }

    #[test]
    fn test_scene_layers_readiness() {
        let mut layers = SceneLayers::new();
        assert!(!layers.template_ready());
        assert!(!layers.has_photo());

        assert!(layers.set_template(template()));
        assert!(!layers.set_template(photo()));
        assert_eq!(layers.template().map(|t| t.name), Some("template"));

        layers.set_photo(photo());
        layers.set_photo(TestImage {
            name: "second",
            width: 10,
            height: 10,
        });
        assert_eq!(layers.photo().map(|p| p.name), Some("second"));
    }

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_export_png_is_idempotent() {
        let compositor = Compositor::default();
        let photo = solid(120, 80, [200, 40, 40, 255]);
        let template = solid(500, 500, [0, 0, 255, 128]);
        let transform = PhotoTransform {
            scale: 1.3,
            position_x: -12.0,
            position_y: 7.5,
            rotation: 33.0,
            flipped: true,
        };

        let first = compositor
            .export_png(Some(&photo), Some(&template), &transform)
            .unwrap();
        let second = compositor
            .export_png(Some(&photo), Some(&template), &transform)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_without_photo_is_opaque_template() {
        let compositor = Compositor::default();
        let mut template = solid(500, 500, [250, 200, 0, 255]);
        template.put_pixel(3, 4, Rgba([1, 2, 3, 255]));

        let bytes = compositor
            .export_png(None, Some(&template), &PhotoTransform::default())
            .unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (500, 500));
        assert_eq!(decoded, template);
    }

    #[test]
    fn test_export_places_photo_at_center() {
        let compositor = Compositor::default();
        let photo = solid(100, 100, [10, 200, 30, 255]);
        let bytes = compositor
            .export_png(Some(&photo), None, &PhotoTransform::default())
            .unwrap();
        let decoded = decode_image(&bytes).unwrap();

        // Fit scale 1.5 → a 150x150 square around (250, 250).
        assert_eq!(decoded.get_pixel(250, 250), &Rgba([10, 200, 30, 255]));
        assert_eq!(decoded.get_pixel(180, 180), &Rgba([10, 200, 30, 255]));
        assert_eq!(decoded.get_pixel(10, 10)[3], 0);
        assert_eq!(decoded.get_pixel(330, 250)[3], 0);
    }
}
