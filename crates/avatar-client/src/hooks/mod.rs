mod use_global_listener;
mod use_image_editor;
mod use_localstorage;

pub use use_global_listener::{use_pointer_release, use_window_resize};
pub use use_image_editor::*;
pub use use_localstorage::use_localstorage;
