//! Canvas composition: a background plus centered text blocks.
//!
//! # Placement
//!
//! Every text block is measured first. Its tight bounding box may not
//! start at the draw origin (glyph bearings, ascender gaps), so the origin
//! is shifted back by the box offset:
//!
//! ```text
//! x = floor((canvas_width  - text_width)  / 2) - left
//! y = floor((canvas_height - text_height) / 2) - top + bias
//! ```
//!
//! Blocks anchored at an absolute row skip the vertical term and use that
//! row as their draw origin directly.
//!
//! # Example
//!
//! ```
//! use palette::Srgb;
//! use storefront_assets::{Anchor, Background, Composer, FontLibrary, TextBlock};
//!
//! let composer = Composer::new(FontLibrary::empty(), "Arial");
//! let canvas = composer.compose(
//!     320,
//!     200,
//!     &Background::Solid(Srgb::new(61, 220, 132)),
//!     &[TextBlock::new("Hello", 60.0, Srgb::new(255, 255, 255), Anchor::centered())],
//! );
//! assert_eq!((canvas.width(), canvas.height()), (320, 200));
//! ```

mod bitmap;
pub mod font;
pub(crate) mod markup;

pub use font::{FontHandle, FontLibrary, FontSource, TextLayout, resolve_font};

use palette::Srgb;
use resvg::tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::canvas::{Canvas, PixelFormat};
use crate::geometry::{BoundsPx, SizePx, floor_half};

// ============================================================================
// Background
// ============================================================================

/// How the canvas is filled before any text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// An opaque canvas of one colour.
    Solid(Srgb<u8>),

    /// A transparent canvas with a filled circle in the middle.
    ///
    /// The radius is `min(width, height) / 2 - margin`.
    Circle { color: Srgb<u8>, margin: u32 },
}

impl Background {
    /// The pixel format a canvas with this background serializes as.
    pub fn format(&self) -> PixelFormat {
        match self {
            Self::Solid(_) => PixelFormat::Rgb,
            Self::Circle { .. } => PixelFormat::Rgba,
        }
    }

    fn paint_onto(&self, pixmap: &mut Pixmap) {
        match *self {
            Self::Solid(color) => pixmap.fill(opaque(color)),
            Self::Circle { color, margin } => {
                pixmap.fill(Color::TRANSPARENT);

                let size = SizePx::new(pixmap.width(), pixmap.height());
                let radius = (size.min_edge() / 2).saturating_sub(margin);
                if radius == 0 {
                    return;
                }

                // Cover pixel rows and columns center-radius..=center+radius.
                let cx = (size.width / 2) as f32 + 0.5;
                let cy = (size.height / 2) as f32 + 0.5;
                let Some(path) = PathBuilder::from_circle(cx, cy, radius as f32 + 0.5) else {
                    return;
                };

                let mut paint = Paint::default();
                paint.set_color(opaque(color));
                paint.anti_alias = true;
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }
}

fn opaque(color: Srgb<u8>) -> Color {
    Color::from_rgba8(color.red, color.green, color.blue, 255)
}

// ============================================================================
// Text Blocks
// ============================================================================

/// Where a text block sits vertically. Horizontally it is always centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Centered on the canvas, then moved down by `bias` pixels
    /// (negative moves up).
    Center { bias: i32 },

    /// Draw origin at this row from the top.
    Top(i32),

    /// Draw origin this many rows above the bottom edge.
    Bottom(i32),
}

impl Anchor {
    /// Fully centered, no bias.
    pub fn centered() -> Self {
        Self::Center { bias: 0 }
    }
}

/// One line of text to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    /// Requested size in pixels; the fallback font ignores it.
    pub font_size: f32,
    pub color: Srgb<u8>,
    pub anchor: Anchor,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, font_size: f32, color: Srgb<u8>, anchor: Anchor) -> Self {
        Self {
            text: text.into(),
            font_size,
            color,
            anchor,
        }
    }
}

/// The draw origin computed for a measured text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPlacement {
    pub x: i32,
    pub y: i32,
}

impl TextPlacement {
    /// Places text with tight `bounds` on a canvas of `canvas` size.
    pub fn compute(bounds: BoundsPx, canvas: SizePx, anchor: Anchor) -> Self {
        let x = floor_half(canvas.width as i32 - bounds.width()) - bounds.left;
        let y = match anchor {
            Anchor::Center { bias } => {
                floor_half(canvas.height as i32 - bounds.height()) - bounds.top + bias
            }
            Anchor::Top(row) => row,
            Anchor::Bottom(offset) => canvas.height as i32 - offset,
        };
        Self { x, y }
    }

    /// Where the text's bounding box lands on the canvas.
    pub fn placed_bounds(&self, bounds: BoundsPx) -> BoundsPx {
        bounds.translate(self.x, self.y)
    }
}

// ============================================================================
// Composer
// ============================================================================

/// A text block after measurement and placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedText {
    pub placement: TextPlacement,
    /// Tight bounds relative to the draw origin.
    pub bounds: BoundsPx,
    pub source: FontSource,
}

/// A composed canvas together with where each visible block was drawn.
#[derive(Debug, Clone)]
pub struct Composition {
    pub canvas: Canvas,
    /// One entry per block with visible pixels, in drawing order.
    pub texts: Vec<PlacedText>,
}

/// Draws backgrounds and text into fresh canvases.
#[derive(Debug, Clone)]
pub struct Composer {
    fonts: FontLibrary,
    family: String,
}

impl Composer {
    /// Creates a composer that resolves `family` against `fonts`.
    pub fn new(fonts: FontLibrary, family: impl Into<String>) -> Self {
        Self {
            fonts,
            family: family.into(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Composes a `width` x `height` canvas.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn compose(
        &self,
        width: u32,
        height: u32,
        background: &Background,
        blocks: &[TextBlock],
    ) -> Canvas {
        self.compose_detailed(width, height, background, blocks).canvas
    }

    /// Like [`compose`](Self::compose), also reporting each block's placement.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    pub fn compose_detailed(
        &self,
        width: u32,
        height: u32,
        background: &Background,
        blocks: &[TextBlock],
    ) -> Composition {
        let Some(mut pixmap) = Pixmap::new(width, height) else {
            panic!("canvas dimensions must be non-zero, got {width}x{height}");
        };
        let size = SizePx::new(width, height);

        background.paint_onto(&mut pixmap);

        let mut texts = Vec::with_capacity(blocks.len());
        for block in blocks {
            let font = resolve_font(&self.fonts, &self.family, block.font_size);
            let Some(layout) = font.layout(&block.text, block.color, size) else {
                continue;
            };

            let placement = TextPlacement::compute(layout.bounds(), size, block.anchor);
            layout.draw(&mut pixmap, placement.x, placement.y);

            texts.push(PlacedText {
                placement,
                bounds: layout.bounds(),
                source: layout.source(),
            });
        }

        Composition {
            canvas: Canvas::from_pixmap(&pixmap, background.format()),
            texts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const GREEN: Srgb<u8> = Srgb::new(61, 220, 132);
    const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);

    fn fallback_composer() -> Composer {
        Composer::new(FontLibrary::empty(), "Arial")
    }

    fn center_of(bounds: BoundsPx) -> (f32, f32) {
        (
            (bounds.left + bounds.right) as f32 / 2.0,
            (bounds.top + bounds.bottom) as f32 / 2.0,
        )
    }

    #[test]
    fn placement_corrects_for_box_offset() {
        let bounds = BoundsPx::new(4, 17, 104, 61);
        let placement = TextPlacement::compute(bounds, SizePx::new(1080, 1920), Anchor::centered());
        // (1080 - 100) / 2 - 4, (1920 - 44) / 2 - 17
        assert_eq!(placement, TextPlacement { x: 486, y: 921 });
        assert_eq!(
            placement.placed_bounds(bounds),
            BoundsPx::new(490, 938, 590, 982)
        );
    }

    #[test]
    fn placement_floors_odd_remainders() {
        let bounds = BoundsPx::new(0, 0, 7, 5);
        let placement = TextPlacement::compute(bounds, SizePx::new(20, 20), Anchor::centered());
        assert_eq!(placement, TextPlacement { x: 6, y: 7 });

        // Wider than the canvas: floor toward negative infinity.
        let wide = BoundsPx::new(0, 0, 31, 5);
        let placement = TextPlacement::compute(wide, SizePx::new(20, 20), Anchor::centered());
        assert_eq!(placement.x, -6);
    }

    #[test]
    fn placement_anchors() {
        let bounds = BoundsPx::new(2, 10, 50, 40);
        let canvas = SizePx::new(512, 512);

        let biased = TextPlacement::compute(bounds, canvas, Anchor::Center { bias: -10 });
        assert_eq!(biased.y, (512 - 30) / 2 - 10 - 10);

        let top = TextPlacement::compute(bounds, canvas, Anchor::Top(150));
        assert_eq!(top.y, 150);

        let bottom = TextPlacement::compute(bounds, canvas, Anchor::Bottom(100));
        assert_eq!(bottom.y, 412);
        assert_eq!(top.x, bottom.x);
    }

    #[test]
    fn compose_returns_requested_dimensions() {
        let composer = fallback_composer();
        for (w, h) in [(1, 1), (7, 3), (1080, 1920), (1920, 1080), (1024, 500)] {
            let canvas = composer.compose(w, h, &Background::Solid(GREEN), &[]);
            assert_eq!((canvas.width(), canvas.height()), (w, h));
        }
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn compose_rejects_zero_dimensions() {
        fallback_composer().compose(0, 10, &Background::Solid(GREEN), &[]);
    }

    #[test]
    fn fallback_text_is_centered() {
        let composition = fallback_composer().compose_detailed(
            1080,
            1920,
            &Background::Solid(GREEN),
            &[TextBlock::new("Android News - Home", 60.0, WHITE, Anchor::centered())],
        );
        assert_eq!(composition.texts.len(), 1);
        assert_eq!(composition.texts[0].source, FontSource::Fallback);

        let background = Rgba([61, 220, 132, 255]);
        let drawn = composition.canvas.content_bounds(background).unwrap();
        let (cx, cy) = center_of(drawn);
        assert!((cx - 540.0).abs() <= 1.0, "cx={cx}");
        assert!((cy - 960.0).abs() <= 1.0, "cy={cy}");

        let placed = composition.texts[0];
        assert_eq!(drawn, placed.placement.placed_bounds(placed.bounds));
    }

    #[test]
    fn scalable_text_is_centered() {
        let library = FontLibrary::system();
        let Some(family) = font::tests::latin_family(&library) else {
            return;
        };
        let composer = Composer::new(library, family);
        let background = Rgba([61, 220, 132, 255]);

        for (w, h, text, size) in [
            (1080, 1920, "Android News - Home", 60.0),
            (512, 512, "A", 280.0),
            (1920, 1080, "Tablet 10\"", 90.0),
        ] {
            let composition = composer.compose_detailed(
                w,
                h,
                &Background::Solid(GREEN),
                &[TextBlock::new(text, size, WHITE, Anchor::centered())],
            );
            assert_eq!(composition.texts[0].source, FontSource::Scalable, "{text:?}");

            // The faintest edge pixels may blend back to the background colour.
            let drawn = composition.canvas.content_bounds(background).unwrap();
            let (cx, cy) = center_of(drawn);
            assert!((cx - w as f32 / 2.0).abs() <= 1.0, "{text:?} cx={cx}");
            assert!((cy - h as f32 / 2.0).abs() <= 1.0, "{text:?} cy={cy}");
        }
    }

    #[test]
    fn missing_font_still_draws_text() {
        let composer = Composer::new(FontLibrary::system(), "No Such Family 7f3a");
        let canvas = composer.compose(
            1024,
            500,
            &Background::Solid(GREEN),
            &[TextBlock::new("Android News", 90.0, WHITE, Anchor::Top(150))],
        );
        assert_eq!((canvas.width(), canvas.height()), (1024, 500));
        assert!(canvas.content_bounds(Rgba([61, 220, 132, 255])).is_some());
    }

    #[test]
    fn circle_background_is_transparent_outside() {
        let canvas = fallback_composer().compose(
            512,
            512,
            &Background::Circle {
                color: GREEN,
                margin: 20,
            },
            &[],
        );
        assert_eq!(canvas.format, PixelFormat::Rgba);
        assert_eq!(canvas.data.get_pixel(0, 0).0[3], 0);
        assert_eq!(canvas.data.get_pixel(511, 511).0[3], 0);
        // Inside the circle, and just inside the margin on the left edge.
        assert_eq!(canvas.data.get_pixel(256, 256).0, [61, 220, 132, 255]);
        assert_eq!(canvas.data.get_pixel(22, 256).0, [61, 220, 132, 255]);
        assert_eq!(canvas.data.get_pixel(17, 256).0[3], 0);
    }

    #[test]
    fn circle_with_oversized_margin_is_empty() {
        let canvas = fallback_composer().compose(
            40,
            40,
            &Background::Circle {
                color: GREEN,
                margin: 30,
            },
            &[],
        );
        assert!(canvas.data.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn stacked_blocks_do_not_overlap() {
        let composition = fallback_composer().compose_detailed(
            512,
            512,
            &Background::Circle {
                color: GREEN,
                margin: 20,
            },
            &[
                TextBlock::new("A", 280.0, WHITE, Anchor::Center { bias: -10 }),
                TextBlock::new("NEWS", 48.0, WHITE, Anchor::Bottom(100)),
            ],
        );
        let [title, caption] = [composition.texts[0], composition.texts[1]];
        let title_box = title.placement.placed_bounds(title.bounds);
        let caption_box = caption.placement.placed_bounds(caption.bounds);
        assert!(title_box.bottom <= caption_box.top);
    }

    #[test]
    fn blank_blocks_are_skipped() {
        let composition = fallback_composer().compose_detailed(
            64,
            64,
            &Background::Solid(GREEN),
            &[TextBlock::new("   ", 20.0, WHITE, Anchor::centered())],
        );
        assert!(composition.texts.is_empty());
        assert_eq!(
            composition.canvas.content_bounds(Rgba([61, 220, 132, 255])),
            None
        );
    }

    #[test]
    fn compose_is_deterministic() {
        let composer = fallback_composer();
        let blocks = [TextBlock::new("Android News", 90.0, WHITE, Anchor::Top(150))];
        let first = composer.compose(1024, 500, &Background::Solid(GREEN), &blocks);
        let second = composer.compose(1024, 500, &Background::Solid(GREEN), &blocks);
        assert_eq!(first, second);
    }
}
