//! The finished raster produced by the composer and the resizer.

use image::{DynamicImage, Rgba, RgbaImage};
use resvg::tiny_skia::Pixmap;

use crate::geometry::{BoundsPx, SizePx};

/// Pixel layout of a canvas when it is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Opaque RGB; any alpha is dropped on output.
    Rgb,
    /// RGB with an alpha channel.
    Rgba,
}

/// A raster of fixed dimensions.
///
/// Pixels are always held as straight (non-premultiplied) RGBA; `format`
/// decides whether the alpha channel survives serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    /// The pixel data in RGBA format.
    pub data: RgbaImage,

    /// The layout to serialize as.
    pub format: PixelFormat,
}

impl Canvas {
    pub fn new(data: RgbaImage, format: PixelFormat) -> Self {
        Self { data, format }
    }

    /// Converts a premultiplied tiny-skia pixmap into a canvas.
    pub fn from_pixmap(pixmap: &Pixmap, format: PixelFormat) -> Self {
        Self::new(pixmap_to_rgba_image(pixmap), format)
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the image in its serialized pixel layout.
    pub fn to_dynamic(&self) -> DynamicImage {
        let rgba = DynamicImage::ImageRgba8(self.data.clone());
        match self.format {
            PixelFormat::Rgba => rgba,
            PixelFormat::Rgb => DynamicImage::ImageRgb8(rgba.to_rgb8()),
        }
    }

    /// Returns the tight box of pixels that differ from `background`.
    ///
    /// Returns `None` if every pixel matches.
    pub fn content_bounds(&self, background: Rgba<u8>) -> Option<BoundsPx> {
        let mut found: Option<BoundsPx> = None;
        for (x, y, pixel) in self.data.enumerate_pixels() {
            if *pixel == background {
                continue;
            }
            let lit = BoundsPx::pixel(x as i32, y as i32);
            found = Some(found.map_or(lit, |b| b.union(&lit)));
        }
        found
    }
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for (pixel, out) in pixmap.pixels().iter().zip(img.pixels_mut()) {
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        *out = Rgba([r, g, b, a]);
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    match a {
        0 => (0, 0, 0, 0),
        255 => (r, g, b, a),
        _ => {
            let a_f = a as f32 / 255.0;
            (
                (r as f32 / a_f).round().min(255.0) as u8,
                (g as f32 / a_f).round().min(255.0) as u8,
                (b as f32 / a_f).round().min(255.0) as u8,
                a,
            )
        }
    }
}
