//! Mubarak Avatar Client
//!
//! Yew WASM frontend: the token landing page and its avatar editor.
//!
//! This crate is WASM-only. Use `trunk build` or `cargo check --target wasm32-unknown-unknown`.

#[cfg(not(target_arch = "wasm32"))]
compile_error!(
    "avatar-client only supports wasm32 target. Use: cargo check -p avatar-client --target wasm32-unknown-unknown"
);

mod app;
mod canvas;
mod components;
mod config;
mod download;
mod error;
mod hooks;
mod loader;
mod pages;
mod routes;

use app::App;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    // Redirects to the panic page instead of leaving a frozen UI
    pages::set_panic_hook();

    let filter = EnvFilter::new("info");

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();

    yew::Renderer::<App>::new().render();
}
