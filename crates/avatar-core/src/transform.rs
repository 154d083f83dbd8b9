//! The affine parameters applied to the uploaded photo.

use serde::{Deserialize, Serialize};

/// Smallest uniform scale a resize gesture may produce.
pub const MIN_SCALE: f64 = 0.1;

/// Photo transform relative to the canvas center.
///
/// Offsets are in canvas backing pixels, rotation is in degrees and kept in
/// `[0, 360)`. `flipped` mirrors the photo horizontally in its own frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoTransform {
    pub scale: f64,
    pub position_x: f64,
    pub position_y: f64,
    pub rotation: f64,
    pub flipped: bool,
}

impl Default for PhotoTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            position_x: 0.0,
            position_y: 0.0,
            rotation: 0.0,
            flipped: false,
        }
    }
}

impl PhotoTransform {
    /// Rotation in radians, as consumed by drawing surfaces.
    pub fn rotation_radians(&self) -> f64 {
        self.rotation.to_radians()
    }

    /// Horizontal scale sign: `-1.0` when mirrored.
    pub fn mirror_sign(&self) -> f64 {
        if self.flipped { -1.0 } else { 1.0 }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
///
/// Non-finite input maps to `0.0`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform() {
        let t = PhotoTransform::default();
        assert_eq!(t.scale, 1.0);
        assert_eq!((t.position_x, t.position_y), (0.0, 0.0));
        assert_eq!(t.rotation, 0.0);
        assert!(!t.flipped);
        assert!(t.is_default());
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-720.0), 0.0);
        assert_eq!(normalize_degrees(f64::NAN), 0.0);
        assert_eq!(normalize_degrees(f64::INFINITY), 0.0);

        let tiny = normalize_degrees(-1e-17);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_mirror_sign() {
        let mut t = PhotoTransform::default();
        assert_eq!(t.mirror_sign(), 1.0);
        t.flipped = true;
        assert_eq!(t.mirror_sign(), -1.0);
    }
}
