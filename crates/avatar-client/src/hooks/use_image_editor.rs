//! Hook wiring the avatar editor state to the canvas and pointer events.
//!
//! The editor state lives in a `use_mut_ref` so pointer handlers can mutate
//! it synchronously. Every committed change redraws the preview immediately
//! and then forces a re-render so the control frame follows.

use std::cell::RefCell;
use std::rc::Rc;

use avatar_core::{ControlFrame, EditorState, Point, UploadOutcome};
use tracing::{debug, error, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlInputElement};
use yew::prelude::*;

use crate::canvas::{CanvasSurface, LoadedImage, canvas_layout};
use crate::config::load_editor_config;
use crate::download::download_bytes;
use crate::error::ClientError;
use crate::hooks::{use_pointer_release, use_window_resize};
use crate::loader::{fetch_image, load_file_image};

type SharedState = Rc<RefCell<EditorState<LoadedImage>>>;

/// Which handle of the control frame started a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Rotate,
    Resize,
}

/// Everything the editor view needs from [`use_image_editor`].
#[derive(Clone)]
pub struct ImageEditorHandle {
    pub canvas_ref: NodeRef,
    /// Backing size of the canvas in pixels.
    pub canvas_size: (u32, u32),
    pub has_photo: bool,
    pub template_ready: bool,
    /// Overlay geometry; `None` until a photo is loaded and the canvas is mounted.
    pub control_frame: Option<ControlFrame>,
    /// Last recoverable error, shown as a toast.
    pub error: Option<String>,
    pub on_upload: Callback<Event>,
    pub on_mouse_move: Callback<MouseEvent>,
    pub on_touch_move: Callback<TouchEvent>,
    pub on_flip: Callback<MouseEvent>,
    pub on_dismiss_error: Callback<()>,
    pub report_error: Callback<String>,
    state: SharedState,
}

impl ImageEditorHandle {
    /// Mouse-down handler for one of the frame's handles.
    pub fn on_mouse_start(&self, kind: GestureKind) -> Callback<MouseEvent> {
        let state = self.state.clone();
        Callback::from(move |e: MouseEvent| {
            if kind != GestureKind::Drag {
                e.stop_propagation();
            }
            let pointer = Point::new(f64::from(e.client_x()), f64::from(e.client_y()));
            begin_gesture(&mut state.borrow_mut(), kind, pointer);
        })
    }

    /// Touch-start handler for one of the frame's handles.
    ///
    /// Only single-finger touches start a gesture; a second finger ends the
    /// current one.
    pub fn on_touch_start(&self, kind: GestureKind) -> Callback<TouchEvent> {
        let state = self.state.clone();
        Callback::from(move |e: TouchEvent| {
            if kind != GestureKind::Drag {
                e.stop_propagation();
            }
            let Some(pointer) = single_touch(&e) else {
                state.borrow_mut().controller_mut().end_gesture();
                return;
            };
            begin_gesture(&mut state.borrow_mut(), kind, pointer);
        })
    }

    /// Renders the export image and hands it to the browser as a download.
    pub fn export(&self) -> Result<(), ClientError> {
        let state = self.state.borrow();
        let layers = state.layers();
        let bytes = state.compositor().export_png(
            layers.photo().map(|photo| &photo.bitmap),
            layers.template().map(|template| &template.bitmap),
            state.transform(),
        )?;
        download_bytes(&bytes, &state.config().export_filename, "image/png")
    }
}

fn begin_gesture(state: &mut EditorState<LoadedImage>, kind: GestureKind, pointer: Point) {
    match kind {
        GestureKind::Drag => state.controller_mut().begin_drag(pointer),
        GestureKind::Rotate => state.controller_mut().begin_rotate(pointer),
        GestureKind::Resize => state.controller_mut().begin_resize(pointer),
    }
}

fn single_touch(e: &TouchEvent) -> Option<Point> {
    let touches = e.touches();
    if touches.length() != 1 {
        return None;
    }
    let touch = touches.get(0)?;
    Some(Point::new(
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
    ))
}

fn render_preview(canvas_ref: &NodeRef, state: &EditorState<LoadedImage>) {
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
        debug!("Canvas not mounted, skipping preview render");
        return;
    };
    let mut surface = match CanvasSurface::from_canvas(&canvas) {
        Ok(surface) => surface,
        Err(e) => {
            debug!("Cannot render preview: {}", e);
            return;
        }
    };
    let layers = state.layers();
    state.compositor().render_preview(
        &mut surface,
        layers.photo().map(|photo| &photo.canvas),
        layers.template().map(|template| &template.canvas),
        state.transform(),
    );
}

fn control_frame(canvas_ref: &NodeRef, state: &EditorState<LoadedImage>) -> Option<ControlFrame> {
    let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
    let photo = state.layers().photo()?;
    let placement = state
        .compositor()
        .placement(&photo.canvas, state.transform())?;
    Some(ControlFrame::compute(&placement, &canvas_layout(&canvas)))
}

fn apply_pointer(canvas_ref: &NodeRef, state: &SharedState, refresh: &Callback<()>, pointer: Point) {
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
        return;
    };
    let layout = canvas_layout(&canvas);
    let changed = state.borrow_mut().controller_mut().update_pointer(pointer, &layout);
    if changed {
        refresh.emit(());
    }
}

/// Editor hook. `template_src` overrides the configured template path.
#[hook]
pub fn use_image_editor(template_src: Option<AttrValue>) -> ImageEditorHandle {
    let canvas_ref = use_node_ref();
    let state: SharedState = use_mut_ref(|| EditorState::new(load_editor_config()));
    let error_message = use_state(|| None::<String>);
    let force_update = use_force_update();

    let refresh = {
        let canvas_ref = canvas_ref.clone();
        let state = state.clone();
        Callback::from(move |()| {
            render_preview(&canvas_ref, &state.borrow());
            force_update.force_update();
        })
    };

    let report_error = {
        let error_message = error_message.clone();
        Callback::from(move |message: String| error_message.set(Some(message)))
    };

    // Template loads once per path; the layer itself only accepts the first.
    let template_path = AttrValue::from(
        state
            .borrow()
            .config()
            .resolve_template(template_src.as_deref())
            .to_string(),
    );
    {
        let state = state.clone();
        let refresh = refresh.clone();
        let report_error = report_error.clone();
        use_effect_with(template_path, move |path| {
            let path = path.to_string();
            spawn_local(async move {
                match fetch_image(&path).await {
                    Ok(image) => {
                        let accepted = state.borrow_mut().set_template(image);
                        if accepted {
                            refresh.emit(());
                        }
                    }
                    Err(e) => {
                        error!("Failed to load template {}: {}", path, e);
                        report_error.emit(format!("Could not load the avatar template: {e}"));
                    }
                }
            });
            || ()
        });
    }

    // First paint once the canvas is mounted.
    {
        let refresh = refresh.clone();
        use_effect_with((), move |()| {
            refresh.emit(());
            || ()
        });
    }

    {
        let state = state.clone();
        use_pointer_release(Callback::from(move |()| {
            state.borrow_mut().controller_mut().end_gesture();
        }));
    }

    use_window_resize(refresh.clone());

    let on_upload = {
        let state = state.clone();
        let refresh = refresh.clone();
        let report_error = report_error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Allows picking the same file again
            input.set_value("");

            let file = gloo::file::File::from(file);
            let ticket = state.borrow_mut().begin_upload();
            let state = state.clone();
            let refresh = refresh.clone();
            let report_error = report_error.clone();
            spawn_local(async move {
                let loaded = load_file_image(&file).await;
                let outcome = state.borrow_mut().finish_upload(ticket, loaded);
                match outcome {
                    UploadOutcome::Committed => refresh.emit(()),
                    UploadOutcome::Stale => {}
                    UploadOutcome::Failed(e) => {
                        warn!("Failed to load {}: {}", file.name(), e);
                        report_error.emit(format!("Could not read {}: {e}", file.name()));
                    }
                }
            });
        })
    };

    let on_mouse_move = {
        let canvas_ref = canvas_ref.clone();
        let state = state.clone();
        let refresh = refresh.clone();
        Callback::from(move |e: MouseEvent| {
            let pointer = Point::new(f64::from(e.client_x()), f64::from(e.client_y()));
            apply_pointer(&canvas_ref, &state, &refresh, pointer);
        })
    };

    let on_touch_move = {
        let canvas_ref = canvas_ref.clone();
        let state = state.clone();
        let refresh = refresh.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(pointer) = single_touch(&e) {
                apply_pointer(&canvas_ref, &state, &refresh, pointer);
            }
        })
    };

    let on_flip = {
        let state = state.clone();
        let refresh = refresh.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            let changed = state.borrow_mut().controller_mut().toggle_flip();
            if changed {
                refresh.emit(());
            }
        })
    };

    let on_dismiss_error = {
        let error_message = error_message.clone();
        Callback::from(move |()| error_message.set(None))
    };

    let (canvas_size, has_photo, template_ready, frame) = {
        let current = state.borrow();
        let config = current.config();
        (
            (config.canvas_width, config.canvas_height),
            current.layers().has_photo(),
            current.layers().template_ready(),
            control_frame(&canvas_ref, &current),
        )
    };

    ImageEditorHandle {
        canvas_ref,
        canvas_size,
        has_photo,
        template_ready,
        control_frame: frame,
        error: (*error_message).clone(),
        on_upload,
        on_mouse_move,
        on_touch_move,
        on_flip,
        on_dismiss_error,
        report_error,
        state,
    }
}
