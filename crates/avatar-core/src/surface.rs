//! Drawing surface abstraction.
//!
//! Mirrors the subset of the 2D canvas API the compositor needs, so the
//! same draw sequence runs against a browser canvas and an in-memory raster.

/// An image that can be drawn onto a [`Surface`].
pub trait SurfaceImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Immediate-mode 2D drawing target with a canvas-style state stack.
///
/// Transform calls post-multiply the current matrix, exactly like
/// `CanvasRenderingContext2D`.
pub trait Surface {
    type Image: SurfaceImage;

    /// Backing size in pixels.
    fn size(&self) -> (u32, u32);
    /// Resets every pixel to transparent, ignoring the current transform.
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, radians: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    /// Draws `image` stretched into the rect `(x, y, width, height)` of the
    /// current coordinate system.
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, width: f64, height: f64);
}

/// 2D affine matrix in canvas order `[a, b, c, d, e, f]`:
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine(pub [f64; 6]);

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    pub fn translation(x: f64, y: f64) -> Self {
        Affine([1.0, 0.0, 0.0, 1.0, x, y])
    }

    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Affine([cos, sin, -sin, cos, 0.0, 0.0])
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Affine([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// `self × other`: `other` is applied first.
    pub fn then(self, other: Affine) -> Affine {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Affine([
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * e2 + c1 * f2 + e1,
            b1 * e2 + d1 * f2 + f1,
        ])
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }

    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, ..] = self.0;
        a * d - b * c
    }

    /// Returns `None` for a singular matrix.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.determinant();
        if det.abs() < 1e-12 || !det.is_finite() {
            return None;
        }
        let [a, b, c, d, e, f] = self.0;
        let inv = 1.0 / det;
        Some(Affine([
            d * inv,
            -b * inv,
            -c * inv,
            a * inv,
            (c * f - d * e) * inv,
            (b * e - a * f) * inv,
        ]))
    }
}
