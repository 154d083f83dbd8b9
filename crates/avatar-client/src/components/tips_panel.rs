//! Collapsible usage tips. The expanded state survives reloads.

use yew::prelude::*;
use yew_icons::{Icon, IconData};

use crate::hooks::use_localstorage;

const SHOW_TIPS_KEY: &str = "$mubarak-avatar$/ui/show-tips";

const TIPS: [&str; 6] = [
    "Upload your favorite photo (square or near-square images work best)",
    "Drag to adjust position for perfect integration with the template",
    "Use corner control points to resize your photo",
    "Use the top rotation control to adjust the angle",
    "When finished, click \"Export Avatar\" to save your creation",
    "Share your creation on social media and tag us!",
];

#[function_component(TipsPanel)]
pub fn tips_panel() -> Html {
    let expanded = use_localstorage(SHOW_TIPS_KEY, || false);

    let on_toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    html! {
        <div class="tips-panel">
            <button class="tips-toggle" onclick={on_toggle}>
                <span class="tips-title">
                    <Icon data={IconData::LUCIDE_ZAP} width="14" height="14" />
                    <span>{ "Tips & Tricks" }</span>
                </span>
                <span class={classes!("tips-chevron", (*expanded).then_some("open"))}>
                    <Icon data={IconData::LUCIDE_CHEVRON_DOWN} width="16" height="16" />
                </span>
            </button>
            if *expanded {
                <ol class="tips-list">
                    { for TIPS.iter().map(|tip| html! { <li>{ *tip }</li> }) }
                </ol>
            }
        </div>
    }
}
