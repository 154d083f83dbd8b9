//! Dismissible error toast.

use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yew_icons::{Icon, IconData};

const AUTO_DISMISS_MS: u32 = 5000;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: AttrValue,
    pub on_dismiss: Callback<()>,
}

/// Shows `message` until closed or until it times out.
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    // Restart the timer whenever a new message arrives
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.message.clone(), move |_| {
            let timeout = Timeout::new(AUTO_DISMISS_MS, move || on_dismiss.emit(()));
            move || drop(timeout)
        });
    }

    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    html! {
        <div class="toast toast-error" role="alert">
            <Icon data={IconData::LUCIDE_ALERT_TRIANGLE} width="16" height="16" />
            <span class="toast-message">{ props.message.clone() }</span>
            <button class="toast-close" onclick={on_close} title="Dismiss">
                <Icon data={IconData::LUCIDE_X} width="14" height="14" />
            </button>
        </div>
    }
}
