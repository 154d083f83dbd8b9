//! UI components for the avatar page.

mod control_frame;
mod copy_button;
mod image_editor;
mod social_links;
mod tips_panel;
mod toast;

pub use control_frame::ControlFrameOverlay;
pub use copy_button::CopyButton;
pub use image_editor::ImageEditor;
pub use social_links::SocialLinks;
pub use tips_panel::TipsPanel;
pub use toast::Toast;
