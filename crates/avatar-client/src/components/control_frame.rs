//! On-canvas handles for moving, resizing, rotating and flipping the photo.

use avatar_core::ControlFrame;
use yew::prelude::*;
use yew_icons::{Icon, IconData};

#[derive(Properties, PartialEq)]
pub struct ControlFrameOverlayProps {
    pub frame: ControlFrame,
    pub on_drag_mouse: Callback<MouseEvent>,
    pub on_drag_touch: Callback<TouchEvent>,
    pub on_resize_mouse: Callback<MouseEvent>,
    pub on_resize_touch: Callback<TouchEvent>,
    pub on_rotate_mouse: Callback<MouseEvent>,
    pub on_rotate_touch: Callback<TouchEvent>,
    pub on_flip: Callback<MouseEvent>,
}

const CORNERS: [&str; 4] = ["top-left", "top-right", "bottom-left", "bottom-right"];

/// Dashed box tracking the photo, positioned with CSS over the canvas.
#[function_component(ControlFrameOverlay)]
pub fn control_frame_overlay(props: &ControlFrameOverlayProps) -> Html {
    html! {
        <div class="control-frame" style={props.frame.to_style()}>
            <div
                class="control-drag-area"
                onmousedown={props.on_drag_mouse.clone()}
                ontouchstart={props.on_drag_touch.clone()}
            />
            { for CORNERS.iter().map(|corner| html! {
                <div
                    key={*corner}
                    class={classes!("control-resize-handle", *corner)}
                    onmousedown={props.on_resize_mouse.clone()}
                    ontouchstart={props.on_resize_touch.clone()}
                />
            }) }
            <div class="control-top-buttons">
                <div
                    class="control-button control-rotate"
                    title="Rotate"
                    onmousedown={props.on_rotate_mouse.clone()}
                    ontouchstart={props.on_rotate_touch.clone()}
                >
                    <Icon data={IconData::LUCIDE_ROTATE_CW} width="16" height="16" />
                </div>
                <div class="control-button control-flip" title="Flip" onclick={props.on_flip.clone()}>
                    <Icon data={IconData::LUCIDE_FLIP_HORIZONTAL} width="16" height="16" />
                </div>
            </div>
            <div class="control-border" />
        </div>
    }
}
