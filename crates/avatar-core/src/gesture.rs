//! Gesture state and the transform controller driven by pointer input.

use crate::geometry::{CanvasLayout, Point};
use crate::transform::{MIN_SCALE, PhotoTransform, normalize_degrees};

/// Which gesture, if any, is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureMode {
    #[default]
    None,
    Dragging,
    Rotating,
    Resizing,
}

/// Ephemeral state for one press-to-release interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub mode: GestureMode,
    /// Pointer position (viewport coordinates) at gesture start.
    pub start_pointer: Point,
    /// Last pointer position seen while dragging.
    pub last_pointer: Point,
    pub start_scale: f64,
    pub start_rotation: f64,
}

impl GestureSession {
    fn idle() -> Self {
        Self {
            mode: GestureMode::None,
            start_pointer: Point::default(),
            last_pointer: Point::default(),
            start_scale: 1.0,
            start_rotation: 0.0,
        }
    }
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::idle()
    }
}

/// Owns the photo transform and applies gesture updates to it.
///
/// Mutating methods return `true` when the transform changed so the caller
/// can redraw explicitly.
#[derive(Debug, Clone)]
pub struct TransformController {
    transform: PhotoTransform,
    session: GestureSession,
    min_scale: f64,
}

impl Default for TransformController {
    fn default() -> Self {
        Self::new(MIN_SCALE)
    }
}

impl TransformController {
    pub fn new(min_scale: f64) -> Self {
        Self {
            transform: PhotoTransform::default(),
            session: GestureSession::idle(),
            min_scale,
        }
    }

    pub fn transform(&self) -> &PhotoTransform {
        &self.transform
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn mode(&self) -> GestureMode {
        self.session.mode
    }

    pub fn is_active(&self) -> bool {
        self.session.mode != GestureMode::None
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.session = GestureSession {
            mode: GestureMode::Dragging,
            start_pointer: pointer,
            last_pointer: pointer,
            ..self.snapshot()
        };
    }

    pub fn begin_rotate(&mut self, pointer: Point) {
        self.session = GestureSession {
            mode: GestureMode::Rotating,
            start_pointer: pointer,
            last_pointer: pointer,
            ..self.snapshot()
        };
    }

    pub fn begin_resize(&mut self, pointer: Point) {
        self.session = GestureSession {
            mode: GestureMode::Resizing,
            start_pointer: pointer,
            last_pointer: pointer,
            ..self.snapshot()
        };
    }

    /// Applies a pointer move for the active gesture.
    pub fn update_pointer(&mut self, pointer: Point, layout: &CanvasLayout) -> bool {
        let before = self.transform;
        match self.session.mode {
            GestureMode::None => return false,
            GestureMode::Dragging => {
                let last = self.session.last_pointer;
                let (dx, dy) = layout.to_canvas_delta(pointer.x - last.x, pointer.y - last.y);
                self.transform.position_x += dx;
                self.transform.position_y += dy;
                self.session.last_pointer = pointer;
            }
            GestureMode::Rotating => {
                let center = layout.center();
                let start_angle = self.session.start_pointer.angle_from(center);
                let current_angle = pointer.angle_from(center);
                let delta = (current_angle - start_angle).to_degrees();
                self.transform.rotation = normalize_degrees(self.session.start_rotation + delta);
            }
            GestureMode::Resizing => {
                let (ox, oy) =
                    layout.to_viewport_offset(self.transform.position_x, self.transform.position_y);
                let center = layout.center().offset(ox, oy);
                let initial = self.session.start_pointer.distance_to(center);
                let current = pointer.distance_to(center);
                let factor = if initial > f64::EPSILON && current.is_finite() {
                    current / initial
                } else {
                    1.0
                };
                self.transform.scale = (self.session.start_scale * factor).max(self.min_scale);
            }
        }
        self.transform != before
    }

    /// Ends any active gesture, keeping the partial transform.
    ///
    /// Returns whether a gesture was active.
    pub fn end_gesture(&mut self) -> bool {
        let was_active = self.is_active();
        self.session.mode = GestureMode::None;
        was_active
    }

    pub fn toggle_flip(&mut self) -> bool {
        self.transform.flipped = !self.transform.flipped;
        true
    }

    /// Restores the default transform and drops any active gesture.
    pub fn reset(&mut self) -> bool {
        let changed = !self.transform.is_default();
        self.transform = PhotoTransform::default();
        self.session = GestureSession::idle();
        changed
    }

    fn snapshot(&self) -> GestureSession {
        GestureSession {
            start_scale: self.transform.scale,
            start_rotation: self.transform.rotation,
            ..GestureSession::idle()
        }
    }
}

#[cfg(test)]
impl TransformController {
    pub(crate) fn with_transform(transform: PhotoTransform) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }
}
