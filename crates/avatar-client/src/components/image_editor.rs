//! Avatar editor: canvas preview, handles, upload and export.

use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yew_icons::{Icon, IconData};

use super::{ControlFrameOverlay, TipsPanel, Toast};
use crate::hooks::{GestureKind, use_image_editor};

const EXPORT_FEEDBACK_MS: u32 = 2000;

#[derive(Properties, PartialEq)]
pub struct ImageEditorProps {
    /// Template image path. Defaults to the configured template.
    #[prop_or_default]
    pub template_src: Option<AttrValue>,
    /// Called after each successful export.
    #[prop_or_default]
    pub on_export: Option<Callback<()>>,
}

#[function_component(ImageEditor)]
pub fn image_editor(props: &ImageEditorProps) -> Html {
    let editor = use_image_editor(props.template_src.clone());
    let export_success = use_state(|| false);

    let on_export_click = {
        let editor = editor.clone();
        let export_success = export_success.clone();
        let on_export = props.on_export.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(e) = editor.export() {
                tracing::error!("Export failed: {}", e);
                editor.report_error.emit(format!("Export failed: {e}"));
                return;
            }
            export_success.set(true);
            let export_success = export_success.clone();
            Timeout::new(EXPORT_FEEDBACK_MS, move || export_success.set(false)).forget();
            if let Some(cb) = on_export.as_ref() {
                cb.emit(());
            }
        })
    };

    let overlay = if editor.has_photo {
        html! {
            <div
                class="editor-overlay"
                onmousemove={editor.on_mouse_move.clone()}
                ontouchmove={editor.on_touch_move.clone()}
            >
                if let Some(frame) = editor.control_frame {
                    <ControlFrameOverlay
                        {frame}
                        on_drag_mouse={editor.on_mouse_start(GestureKind::Drag)}
                        on_drag_touch={editor.on_touch_start(GestureKind::Drag)}
                        on_resize_mouse={editor.on_mouse_start(GestureKind::Resize)}
                        on_resize_touch={editor.on_touch_start(GestureKind::Resize)}
                        on_rotate_mouse={editor.on_mouse_start(GestureKind::Rotate)}
                        on_rotate_touch={editor.on_touch_start(GestureKind::Rotate)}
                        on_flip={editor.on_flip.clone()}
                    />
                }
            </div>
        }
    } else {
        html! {
            <div class="editor-placeholder">
                <p class="placeholder-title">{ "Upload Your Photo" }</p>
                <p class="placeholder-subtitle">{ "Merge your photo with the Mubarak template" }</p>
                <label class="upload-btn primary">
                    <Icon data={IconData::LUCIDE_UPLOAD} width="18" height="18" />
                    <span>{ "Select Photo" }</span>
                    <input type="file" accept="image/*" onchange={editor.on_upload.clone()} hidden=true />
                </label>
            </div>
        }
    };

    html! {
        <section class="image-editor">
            <header class="editor-header">
                <h2>{ "Create Your Mubarak Avatar" }</h2>
                <p>{ "Upload your photo, adjust size and position to create your personalized avatar" }</p>
            </header>

            <div class="editor-layout">
                <div class="editor-stage">
                    <canvas
                        ref={editor.canvas_ref.clone()}
                        class={classes!("editor-canvas", (!editor.template_ready).then_some("loading"))}
                        width={editor.canvas_size.0.to_string()}
                        height={editor.canvas_size.1.to_string()}
                    />
                    { overlay }
                </div>

                <div class="editor-sidebar">
                    <div class="editor-card">
                        <div class="editor-card-title">
                            <Icon data={IconData::LUCIDE_CAMERA} width="16" height="16" />
                            <h3>{ "Photo Editor" }</h3>
                        </div>

                        <div class="editor-card-section">
                            <p class="hint">{ "Upload a photo to get started" }</p>
                            <label class="upload-btn">
                                <Icon data={IconData::LUCIDE_UPLOAD} width="16" height="16" />
                                <span>{ "Select Photo" }</span>
                                <input type="file" accept="image/*" onchange={editor.on_upload.clone()} hidden=true />
                            </label>
                        </div>

                        <div class="editor-card-section">
                            <p class="hint">{ "When finished, save your creation" }</p>
                            <button
                                class={classes!("export-btn", (*export_success).then_some("success"))}
                                onclick={on_export_click}
                                disabled={!editor.has_photo}
                            >
                                if *export_success {
                                    <Icon data={IconData::LUCIDE_CHECK} width="16" height="16" />
                                    <span>{ "Export Successful!" }</span>
                                } else {
                                    <Icon data={IconData::LUCIDE_DOWNLOAD} width="16" height="16" />
                                    <span>{ "Export Avatar" }</span>
                                }
                            </button>
                        </div>
                    </div>

                    <TipsPanel />

                    <p class="local-notice">
                        <Icon data={IconData::LUCIDE_INFO} width="12" height="12" />
                        <span>{ "Your image will be processed locally - nothing is uploaded to our servers" }</span>
                    </p>
                </div>
            </div>

            if let Some(message) = editor.error.clone() {
                <Toast message={message} on_dismiss={editor.on_dismiss_error.clone()} />
            }
        </section>
    }
}
