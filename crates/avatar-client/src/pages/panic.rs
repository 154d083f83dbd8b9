//! Crash page shown after a WASM panic.
//!
//! The panic hook records the message in localStorage before navigating
//! here, since the panicked app instance can no longer render.

use crate::components::CopyButton;
use crate::routes::Route;
use wasm_bindgen::JsValue;
use web_sys::Storage;
use yew::prelude::*;
use yew_router::prelude::*;

const PANIC_INFO_KEY: &str = "mubarak_panic_info";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn read_panic_info() -> Option<String> {
    storage()?.get_item(PANIC_INFO_KEY).ok()?
}

fn clear_panic_info() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(PANIC_INFO_KEY);
    }
}

/// Installs a panic hook that stores the report and redirects to `/panic`.
pub fn set_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map_or_else(
            || "unknown location".to_string(),
            |loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()),
        );
        let report = format!("{info}\n\nLocation: {location}");

        // The tracing subscriber may be the thing that panicked
        web_sys::console::error_1(&JsValue::from_str(&report));

        if let Some(storage) = storage() {
            let _ = storage.set_item(PANIC_INFO_KEY, &report);
        }
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_pathname("/panic");
        }
    }));
}

#[function_component(PanicPage)]
pub fn panic_page() -> Html {
    let panic_info = use_state(read_panic_info);

    let on_clear = {
        let panic_info = panic_info.clone();
        Callback::from(move |_: MouseEvent| {
            clear_panic_info();
            panic_info.set(None);
        })
    };

    html! {
        <main class="page panic-page">
            <div class="panic-container">
                <h1>{ "Something broke" }</h1>
                <p class="panic-description">
                    { "The avatar editor hit an unexpected error. Your photo never left this browser." }
                </p>

                if let Some(info) = &*panic_info {
                    <div class="panic-info-box">
                        <h2>{ "Error details" }</h2>
                        <pre class="panic-details">{ info }</pre>
                        <div class="panic-actions">
                            <CopyButton value={info.clone()} label="Copy details" />
                            <button onclick={on_clear} class="btn-secondary">
                                { "Clear" }
                            </button>
                        </div>
                    </div>
                } else {
                    <p class="panic-cleared">{ "No error details were recorded." }</p>
                }

                <div class="panic-navigation">
                    <Link<Route> to={Route::Home} classes="btn-primary">
                        { "Back to the editor" }
                    </Link<Route>>
                </div>
            </div>
        </main>
    }
}
