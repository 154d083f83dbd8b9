//! Document/window listeners that live as long as the calling component.

use gloo::events::EventListener;
use yew::prelude::*;

const RELEASE_EVENTS: [&str; 3] = ["mouseup", "touchend", "touchcancel"];

/// Calls `on_release` whenever a pointer is released anywhere in the document.
///
/// The listeners are attached once on mount and removed on unmount; the
/// latest callback is always the one invoked.
#[hook]
pub fn use_pointer_release(on_release: Callback<()>) {
    let latest = use_mut_ref(|| on_release.clone());
    *latest.borrow_mut() = on_release;

    use_effect_with((), move |()| {
        let document = gloo::utils::document();
        let listeners: Vec<EventListener> = RELEASE_EVENTS
            .into_iter()
            .map(|name| {
                let latest = latest.clone();
                EventListener::new(&document, name, move |_| {
                    latest.borrow().emit(());
                })
            })
            .collect();

        move || drop(listeners)
    });
}

/// Calls `on_resize` when the browser window is resized.
#[hook]
pub fn use_window_resize(on_resize: Callback<()>) {
    let latest = use_mut_ref(|| on_resize.clone());
    *latest.borrow_mut() = on_resize;

    use_effect_with((), move |()| {
        let listener = EventListener::new(&gloo::utils::window(), "resize", move |_| {
            latest.borrow().emit(());
        });
        move || drop(listener)
    });
}
