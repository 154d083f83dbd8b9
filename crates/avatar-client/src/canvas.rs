//! `Surface` implementation over the browser's 2D canvas context.

use avatar_core::{Bitmap, CanvasLayout, Surface, SurfaceImage, ViewportRect};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::error::ClientError;

/// An off-screen canvas holding decoded pixels, drawable onto a
/// [`CanvasSurface`].
#[derive(Debug, Clone)]
pub struct CanvasBitmap {
    element: HtmlCanvasElement,
}

impl CanvasBitmap {
    /// Uploads a decoded bitmap into a fresh off-screen canvas.
    pub fn from_bitmap(bitmap: &Bitmap) -> Result<Self, ClientError> {
        let (width, height) = bitmap.dimensions();
        let element = create_canvas(width, height)?;
        let ctx = context_2d(&element)?;
        let pixels = Clamped(bitmap.as_raw().as_slice());
        let data = ImageData::new_with_u8_clamped_array_and_sh(pixels, width, height)?;
        ctx.put_image_data(&data, 0.0, 0.0)?;
        Ok(Self { element })
    }
}

impl SurfaceImage for CanvasBitmap {
    fn width(&self) -> u32 {
        self.element.width()
    }

    fn height(&self) -> u32 {
        self.element.height()
    }
}

/// A decoded image kept in both forms: raw pixels for export, an
/// off-screen canvas for the live preview.
pub struct LoadedImage {
    pub bitmap: Bitmap,
    pub canvas: CanvasBitmap,
}

impl LoadedImage {
    pub fn from_bitmap(bitmap: Bitmap) -> Result<Self, ClientError> {
        let canvas = CanvasBitmap::from_bitmap(&bitmap)?;
        Ok(Self { bitmap, canvas })
    }
}

/// Canvas 2D context wrapped as a [`Surface`].
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, ClientError> {
        Ok(Self {
            ctx: context_2d(canvas)?,
            width: canvas.width(),
            height: canvas.height(),
        })
    }
}

fn log_failure(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::debug!("canvas {} failed: {:?}", op, e);
    }
}

impl Surface for CanvasSurface {
    type Image = CanvasBitmap;

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ctx.save();
        log_failure(
            "set_transform",
            self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
        );
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        self.ctx.restore();
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        log_failure("translate", self.ctx.translate(x, y));
    }

    fn rotate(&mut self, radians: f64) {
        log_failure("rotate", self.ctx.rotate(radians));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        log_failure("scale", self.ctx.scale(sx, sy));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn draw_image(&mut self, image: &CanvasBitmap, x: f64, y: f64, width: f64, height: f64) {
        log_failure(
            "draw_image",
            self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                &image.element,
                x,
                y,
                width,
                height,
            ),
        );
    }
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, ClientError> {
    canvas
        .get_context("2d")?
        .ok_or(ClientError::MissingElement("2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ClientError::MissingElement("2d context"))
}

fn create_canvas(width: u32, height: u32) -> Result<HtmlCanvasElement, ClientError> {
    let canvas = gloo::utils::document()
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ClientError::MissingElement("canvas"))?;
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(canvas)
}

/// Current on-page layout of the editor canvas.
pub fn canvas_layout(canvas: &HtmlCanvasElement) -> CanvasLayout {
    let rect = canvas.get_bounding_client_rect();
    CanvasLayout::new(
        ViewportRect::new(rect.left(), rect.top(), rect.width(), rect.height()),
        f64::from(canvas.width()),
        f64::from(canvas.height()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use avatar_core::{Compositor, PhotoTransform};
    use wasm_bindgen_test::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Bitmap {
        let pixels = rgba.repeat((width * height) as usize);
        Bitmap::from_raw(width, height, pixels).unwrap()
    }

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_bitmap_upload_keeps_dimensions() {
        let bitmap = solid(7, 3, [1, 2, 3, 255]);
        let image = LoadedImage::from_bitmap(bitmap).unwrap();
        assert_eq!(image.canvas.width(), 7);
        assert_eq!(image.canvas.height(), 3);
    }

    #[wasm_bindgen_test]
    fn test_preview_renders_template_with_reduced_alpha() {
        let target = create_canvas(500, 500).unwrap();
        let mut surface = CanvasSurface::from_canvas(&target).unwrap();
        let template = CanvasBitmap::from_bitmap(&solid(10, 10, [0, 0, 0, 255])).unwrap();

        Compositor::default().render_preview(
            &mut surface,
            None,
            Some(&template),
            &PhotoTransform::default(),
        );

        let ctx = context_2d(&target).unwrap();
        let pixel = ctx.get_image_data(250.0, 250.0, 1.0, 1.0).unwrap().data();
        // 0.9 alpha, allow for rounding in the browser
        assert!((i32::from(pixel[3]) - 230).abs() <= 1);
    }
}
