//! In-memory raster surface plus image decode/encode.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{
    DynamicImage, ExtendedColorType, ImageDecoder, ImageEncoder, ImageError, ImageReader, Rgba,
    RgbaImage,
};

use crate::error::{EditorError, Result};
use crate::surface::{Affine, Surface, SurfaceImage};

/// Decoded RGBA bitmap.
pub type Bitmap = RgbaImage;

impl SurfaceImage for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }
}

/// Decodes user-supplied image bytes (any enabled format) into RGBA.
///
/// The EXIF orientation tag is applied, so portrait phone photos come out
/// upright the same way a browser `<img>` would show them.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap> {
    let decoded = decode_oriented(bytes).map_err(EditorError::Decode)?;
    let bitmap = decoded.to_rgba8();
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(EditorError::EmptyImage { width, height });
    }
    Ok(bitmap)
}

fn decode_oriented(bytes: &[u8]) -> image::ImageResult<DynamicImage> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut decoded = DynamicImage::from_decoder(decoder)?;
    decoded.apply_orientation(orientation);
    Ok(decoded)
}

pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = PngEncoder::new(Cursor::new(&mut buffer));
    encoder
        .write_image(
            bitmap.as_raw(),
            bitmap.width(),
            bitmap.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(EditorError::Encode)?;
    Ok(buffer)
}

#[derive(Debug, Clone, Copy)]
struct RasterState {
    matrix: Affine,
    alpha: f64,
}

impl Default for RasterState {
    fn default() -> Self {
        Self {
            matrix: Affine::IDENTITY,
            alpha: 1.0,
        }
    }
}

/// CPU [`Surface`] backed by an [`RgbaImage`].
///
/// `draw_image` inverse-maps every covered destination pixel into the source,
/// samples bilinearly with premultiplied alpha and blends source-over.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    target: RgbaImage,
    state: RasterState,
    stack: Vec<RasterState>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            target: RgbaImage::new(width, height),
            state: RasterState::default(),
            stack: Vec::new(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.target
    }

    pub fn into_image(self) -> RgbaImage {
        self.target
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.target)
    }
}

impl Surface for RasterSurface {
    type Image = RgbaImage;

    fn size(&self) -> (u32, u32) {
        self.target.dimensions()
    }

    fn clear(&mut self) {
        for pixel in self.target.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.state.matrix = self.state.matrix.then(Affine::translation(x, y));
    }

    fn rotate(&mut self, radians: f64) {
        self.state.matrix = self.state.matrix.then(Affine::rotation(radians));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.matrix = self.state.matrix.then(Affine::scaling(sx, sy));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        // Canvas ignores out-of-range values.
        if (0.0..=1.0).contains(&alpha) {
            self.state.alpha = alpha;
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn draw_image(&mut self, image: &RgbaImage, x: f64, y: f64, width: f64, height: f64) {
        let (src_w, src_h) = image.dimensions();
        if src_w == 0 || src_h == 0 || self.state.alpha <= 0.0 {
            return;
        }
        let src_w = f64::from(src_w);
        let src_h = f64::from(src_h);

        let full = self
            .state
            .matrix
            .then(Affine::translation(x, y))
            .then(Affine::scaling(width / src_w, height / src_h));
        let Some(inverse) = full.invert() else {
            return;
        };

        let corners = [(0.0, 0.0), (src_w, 0.0), (0.0, src_h), (src_w, src_h)].map(|(u, v)| full.apply(u, v));
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (cx, cy) in corners {
            min_x = min_x.min(cx);
            min_y = min_y.min(cy);
            max_x = max_x.max(cx);
            max_y = max_y.max(cy);
        }

        let (dst_w, dst_h) = self.target.dimensions();
        let x0 = min_x.floor().clamp(0.0, f64::from(dst_w)) as u32;
        let y0 = min_y.floor().clamp(0.0, f64::from(dst_h)) as u32;
        let x1 = max_x.ceil().clamp(0.0, f64::from(dst_w)) as u32;
        let y1 = max_y.ceil().clamp(0.0, f64::from(dst_h)) as u32;

        let alpha = self.state.alpha;
        for py in y0..y1 {
            for px in x0..x1 {
                let (sx, sy) = inverse.apply(f64::from(px) + 0.5, f64::from(py) + 0.5);
                if sx < 0.0 || sy < 0.0 || sx >= src_w || sy >= src_h {
                    continue;
                }
                let sample = sample_bilinear(image, sx - 0.5, sy - 0.5);
                blend_over(self.target.get_pixel_mut(px, py), sample, alpha);
            }
        }
    }
}

/// Bilinear sample at pixel-space coordinates, clamped to the edges.
/// Returns premultiplied RGBA in `0.0..=1.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> [f64; 4] {
    let max_x = f64::from(image.width() - 1);
    let max_y = f64::from(image.height() - 1);

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let fetch = |ix: f64, iy: f64| -> [f64; 4] {
        let p = image.get_pixel(ix.clamp(0.0, max_x) as u32, iy.clamp(0.0, max_y) as u32);
        let a = f64::from(p[3]) / 255.0;
        [
            f64::from(p[0]) / 255.0 * a,
            f64::from(p[1]) / 255.0 * a,
            f64::from(p[2]) / 255.0 * a,
            a,
        ]
    };

    let tl = fetch(x0, y0);
    let tr = fetch(x0 + 1.0, y0);
    let bl = fetch(x0, y0 + 1.0);
    let br = fetch(x0 + 1.0, y0 + 1.0);

    let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;
    let mut out = [0.0; 4];
    for c in 0..4 {
        let top = lerp(tl[c], tr[c], fx);
        let bottom = lerp(bl[c], br[c], fx);
        out[c] = lerp(top, bottom, fy);
    }
    out
}

/// Source-over blend of a premultiplied sample scaled by `alpha`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend_over(dst: &mut Rgba<u8>, src: [f64; 4], alpha: f64) {
    let src_a = src[3] * alpha;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = f64::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    for c in 0..3 {
        let dst_premul = f64::from(dst[c]) / 255.0 * dst_a;
        let out_premul = src[c] * alpha + dst_premul * (1.0 - src_a);
        dst[c] = to_byte(out_premul / out_a);
    }
    dst[3] = to_byte(out_a);
}
