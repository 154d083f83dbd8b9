//! Placement geometry shared by preview, export and the on-screen controls.

use crate::config::EditorConfig;
use crate::transform::PhotoTransform;

/// A point in viewport (CSS pixel) or canvas coordinates, depending on use.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle in radians of the vector from `origin` to this point.
    pub fn angle_from(&self, origin: Point) -> f64 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Bounding rect of an element in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// The canvas as laid out on the page: its viewport rect plus the backing
/// resolution it draws at.
///
/// The displayed size can differ from the backing size (CSS scaling), so
/// pointer deltas and canvas offsets convert through the display ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub rect: ViewportRect,
    pub backing_width: f64,
    pub backing_height: f64,
}

impl CanvasLayout {
    pub fn new(rect: ViewportRect, backing_width: f64, backing_height: f64) -> Self {
        Self {
            rect,
            backing_width,
            backing_height,
        }
    }

    /// Layout where the canvas is displayed at its backing size.
    pub fn unscaled(left: f64, top: f64, config: &EditorConfig) -> Self {
        let width = f64::from(config.canvas_width);
        let height = f64::from(config.canvas_height);
        Self::new(ViewportRect::new(left, top, width, height), width, height)
    }

    /// Displayed CSS pixels per backing pixel, per axis. Falls back to 1 for
    /// an unmounted (zero-sized) element.
    pub fn display_ratio(&self) -> (f64, f64) {
        let ratio = |shown: f64, backing: f64| {
            if shown > 0.0 && backing > 0.0 {
                shown / backing
            } else {
                1.0
            }
        };
        (
            ratio(self.rect.width, self.backing_width),
            ratio(self.rect.height, self.backing_height),
        )
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Converts a canvas-pixel offset into viewport pixels.
    pub fn to_viewport_offset(&self, dx: f64, dy: f64) -> (f64, f64) {
        let (rx, ry) = self.display_ratio();
        (dx * rx, dy * ry)
    }

    /// Converts a viewport-pixel delta into canvas pixels.
    pub fn to_canvas_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        let (rx, ry) = self.display_ratio();
        (dx / rx, dy / ry)
    }
}

/// Where and how the photo is drawn on the canvas.
///
/// Computed identically for preview and export so both produce the same
/// photo geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoPlacement {
    /// Photo center in canvas pixels.
    pub center: Point,
    /// Drawn width in canvas pixels (fit scale × user scale applied).
    pub width: f64,
    /// Drawn height in canvas pixels.
    pub height: f64,
    /// Rotation in radians.
    pub rotation: f64,
    pub mirrored: bool,
    /// Automatic scale fitting the photo into the target region.
    pub fit_scale: f64,
}

impl PhotoPlacement {
    /// Computes the placement for an image of the given natural size.
    ///
    /// Returns `None` for an image without pixels.
    pub fn compute(
        config: &EditorConfig,
        image_width: u32,
        image_height: u32,
        transform: &PhotoTransform,
    ) -> Option<Self> {
        if image_width == 0 || image_height == 0 {
            return None;
        }
        let image_width = f64::from(image_width);
        let image_height = f64::from(image_height);

        let target_width = f64::from(config.canvas_width) * config.photo_width_fraction;
        let target_height = f64::from(config.canvas_height) * config.photo_height_fraction;
        let fit_scale = (target_width / image_width).min(target_height / image_height);

        let (cx, cy) = config.canvas_center();

        Some(Self {
            center: Point::new(cx + transform.position_x, cy + transform.position_y),
            width: image_width * fit_scale * transform.scale,
            height: image_height * fit_scale * transform.scale,
            rotation: transform.rotation_radians(),
            mirrored: transform.flipped,
            fit_scale,
        })
    }

    /// Draw rect in the photo's local frame (centered on the origin).
    pub fn local_rect(&self) -> (f64, f64, f64, f64) {
        (-self.width / 2.0, -self.height / 2.0, self.width, self.height)
    }
}

/// CSS box of the on-screen handle frame drawn around the photo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlFrame {
    pub width: f64,
    pub height: f64,
    /// Frame center relative to the canvas element's top-left, in CSS pixels.
    pub center_x: f64,
    pub center_y: f64,
    pub rotation_degrees: f64,
}

impl ControlFrame {
    pub fn compute(placement: &PhotoPlacement, layout: &CanvasLayout) -> Self {
        let (rx, ry) = layout.display_ratio();
        Self {
            width: placement.width * rx,
            height: placement.height * ry,
            center_x: placement.center.x * rx,
            center_y: placement.center.y * ry,
            rotation_degrees: placement.rotation.to_degrees(),
        }
    }

    /// Inline style positioning an absolutely placed element at the frame.
    pub fn to_style(&self) -> String {
        format!(
            "width: {:.2}px; height: {:.2}px; transform: translate(calc({:.2}px - 50%), calc({:.2}px - 50%)) rotate({:.2}deg);",
            self.width, self.height, self.center_x, self.center_y, self.rotation_degrees
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_point_distance_and_angle() {
        let origin = Point::new(0.0, 0.0);
        assert!(approx(Point::new(3.0, 4.0).distance_to(origin), 5.0));
        assert!(approx(
            Point::new(0.0, 10.0).angle_from(origin),
            std::f64::consts::FRAC_PI_2
        ));
    }

    #[test]
    fn test_layout_display_ratio() {
        let layout = CanvasLayout::new(ViewportRect::new(10.0, 20.0, 250.0, 250.0), 500.0, 500.0);
        assert_eq!(layout.display_ratio(), (0.5, 0.5));
        assert_eq!(layout.center(), Point::new(135.0, 145.0));
        assert_eq!(layout.to_viewport_offset(10.0, -4.0), (5.0, -2.0));
        assert_eq!(layout.to_canvas_delta(5.0, -2.0), (10.0, -4.0));

        let unmounted = CanvasLayout::new(ViewportRect::default(), 500.0, 500.0);
        assert_eq!(unmounted.display_ratio(), (1.0, 1.0));
    }

    #[test]
    fn test_placement_fits_wide_image() {
        let config = EditorConfig::default();
        let transform = PhotoTransform {
            scale: 2.0,
            position_x: 10.0,
            position_y: -5.0,
            rotation: 45.0,
            flipped: true,
        };
        let placement = PhotoPlacement::compute(&config, 1000, 500, &transform).unwrap();

        let fit = (0.3 * 500.0 / 1000.0_f64).min(0.6 * 500.0 / 500.0);
        assert!(approx(placement.fit_scale, fit));
        assert!(approx(placement.width, fit * 1000.0 * 2.0));
        assert!(approx(placement.height, fit * 500.0 * 2.0));
        assert_eq!(placement.center, Point::new(260.0, 245.0));
        assert!(approx(placement.rotation, std::f64::consts::FRAC_PI_4));
        assert!(placement.mirrored);
        assert_eq!(
            placement.local_rect(),
            (-placement.width / 2.0, -placement.height / 2.0, placement.width, placement.height)
        );
    }

    #[test]
    fn test_placement_fits_tall_image() {
        let config = EditorConfig::default();
        let placement =
            PhotoPlacement::compute(&config, 100, 1000, &PhotoTransform::default()).unwrap();
        // Height bound: 300 / 1000 is smaller than 150 / 100.
        assert!(approx(placement.fit_scale, 0.3));
        assert!(approx(placement.height, 300.0));
        assert!(approx(placement.width, 30.0));
    }

    #[test]
    fn test_placement_rejects_empty_image() {
        let config = EditorConfig::default();
        assert!(PhotoPlacement::compute(&config, 0, 10, &PhotoTransform::default()).is_none());
    }

    #[test]
    fn test_control_frame_scales_to_display() {
        let config = EditorConfig::default();
        let transform = PhotoTransform {
            position_x: 20.0,
            rotation: 90.0,
            ..PhotoTransform::default()
        };
        let placement = PhotoPlacement::compute(&config, 100, 100, &transform).unwrap();
        let layout = CanvasLayout::new(ViewportRect::new(0.0, 0.0, 250.0, 250.0), 500.0, 500.0);
        let frame = ControlFrame::compute(&placement, &layout);

        assert!(approx(frame.width, placement.width / 2.0));
        assert!(approx(frame.center_x, 135.0));
        assert!(approx(frame.center_y, 125.0));
        assert!(approx(frame.rotation_degrees, 90.0));
        assert!(frame.to_style().contains("rotate(90.00deg)"));
    }
}
