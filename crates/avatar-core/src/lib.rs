//! Mubarak Avatar Core Library
//!
//! Platform-independent logic for the avatar editor: the photo transform and
//! the gestures that drive it, placement geometry shared by preview and
//! export, and a compositor that draws onto any [`Surface`].
//!
//! The browser front end implements [`Surface`] over a 2D canvas context for
//! the live preview; [`RasterSurface`] renders the exported PNG.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod compositor;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod raster;
pub mod surface;
pub mod transform;
pub mod upload;

pub use compositor::{Compositor, SceneLayers};
pub use config::EditorConfig;
pub use editor::{EditorState, UploadOutcome};
pub use error::{EditorError, Result};
pub use geometry::{CanvasLayout, ControlFrame, PhotoPlacement, Point, ViewportRect};
pub use gesture::{GestureMode, GestureSession, TransformController};
pub use raster::{Bitmap, RasterSurface, decode_image, encode_png};
pub use surface::{Affine, Surface, SurfaceImage};
pub use transform::{MIN_SCALE, PhotoTransform, normalize_degrees};
pub use upload::{UploadSequence, UploadTicket};
