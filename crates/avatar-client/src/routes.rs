//! Application routes.

use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    /// Landing page with the avatar editor.
    #[at("/")]
    Home,
    /// Shown after a WASM panic.
    #[at("/panic")]
    Panic,
    #[not_found]
    #[at("/404")]
    NotFound,
}
