//! Button that copies a fixed string to the clipboard.

use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;
use yew_icons::{Icon, IconData};

const FEEDBACK_MS: u32 = 2000;

#[derive(Properties, PartialEq)]
pub struct CopyButtonProps {
    /// Text written to the clipboard.
    pub value: AttrValue,
    #[prop_or(AttrValue::Static("Copy"))]
    pub label: AttrValue,
}

/// Copies `value` and shows "Copied!" for two seconds.
#[function_component(CopyButton)]
pub fn copy_button(props: &CopyButtonProps) -> Html {
    let copied = use_state(|| false);

    let on_click = {
        let value = props.value.clone();
        let copied = copied.clone();
        Callback::from(move |_: MouseEvent| {
            let value = value.clone();
            let copied = copied.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let clipboard = gloo::utils::window().navigator().clipboard();
                if let Err(e) = JsFuture::from(clipboard.write_text(&value)).await {
                    tracing::warn!("Clipboard write failed: {:?}", e);
                    return;
                }
                copied.set(true);
                gloo::timers::callback::Timeout::new(FEEDBACK_MS, move || {
                    copied.set(false);
                })
                .forget();
            });
        })
    };

    html! {
        <button
            class={classes!("copy-btn", (*copied).then_some("copied"))}
            onclick={on_click}
            title="Copy to clipboard"
        >
            if *copied {
                <Icon data={IconData::LUCIDE_CHECK} width="14" height="14" />
                <span>{ "Copied!" }</span>
            } else {
                <Icon data={IconData::LUCIDE_COPY} width="14" height="14" />
                <span>{ props.label.clone() }</span>
            }
        </button>
    }
}
