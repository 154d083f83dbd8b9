//! Page components.

mod home;
mod not_found;
mod panic;

pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use panic::{PanicPage, set_panic_hook};
