//! `use_state` backed by `window.localStorage`.

use std::ops::Deref;

use serde::{Serialize, de::DeserializeOwned};
use web_sys::Storage;
use yew::prelude::*;

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = local_storage()?.get_item(key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring unreadable localStorage entry {}: {}", key, e);
            None
        }
    }
}

fn store<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(value) {
        Ok(serialized) => {
            if storage.set_item(key, &serialized).is_err() {
                tracing::warn!("Failed to persist {} to localStorage", key);
            }
        }
        Err(e) => tracing::warn!("Failed to serialize {}: {}", key, e),
    }
}

/// State that starts from the stored value under `key` (or `init_fn`) and
/// writes every change back.
#[hook]
pub fn use_localstorage<T, F>(key: &'static str, init_fn: F) -> UseStateHandle<T>
where
    T: 'static + Clone + Serialize + DeserializeOwned + PartialEq,
    F: Fn() -> T + 'static,
{
    let state = use_state(|| load(key).unwrap_or_else(init_fn));
    {
        let state = state.clone();
        use_effect_with(state.clone(), move |state| {
            store(key, state.deref());
            || ()
        });
    }
    state
}
