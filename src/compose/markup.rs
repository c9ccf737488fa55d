//! Scalable text rendering through SVG markup.
//!
//! A text block becomes a one-element SVG document. usvg shapes it into
//! outlines with the fonts in the shared database, and resvg stamps those
//! outlines onto the canvas.
//!
//! usvg's own text bounding box is the layout box (advance by ascent to
//! descent), not the ink. The tight box is instead taken from the pixels
//! the outlines actually cover when rendered at an integer offset, which
//! is exactly what a later draw at any integer origin produces.

use std::sync::Arc;

use palette::Srgb;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree, fontdb};

use crate::geometry::{BoundsPx, SizePx};

/// Text shaped into outlines, ready to be stamped at any origin.
pub struct OutlinedText {
    tree: Tree,
    bounds: BoundsPx,
}

impl OutlinedText {
    /// Shapes `text` with `family` at `size` pixels.
    ///
    /// The draw origin is the top of the font's ascender line, so
    /// `bounds.top` is usually positive. Returns `None` if the
    /// markup does not parse or the text produced no outlines.
    pub fn shape(
        db: &Arc<fontdb::Database>,
        text: &str,
        family: &str,
        size: f32,
        color: Srgb<u8>,
        canvas: SizePx,
    ) -> Option<Self> {
        let markup = text_markup(text, family, size, color, canvas);

        let options = Options {
            fontdb: Arc::clone(db),
            ..Options::default()
        };
        let tree = match Tree::from_str(&markup, &options) {
            Ok(tree) => tree,
            Err(err) => {
                log::debug!("text markup for {text:?} did not parse: {err}");
                return None;
            }
        };

        if !tree.root().has_children() {
            return None;
        }

        let bounds = ink_bounds(&tree, size)?;
        Some(Self { tree, bounds })
    }

    pub fn bounds(&self) -> BoundsPx {
        self.bounds
    }

    /// Renders the outlines with their origin at `(x, y)`.
    pub fn draw(&self, pixmap: &mut Pixmap, x: i32, y: i32) {
        let transform = Transform::from_translate(x as f32, y as f32);
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());
    }
}

/// Returns the box of pixels the tree lights when drawn with its origin
/// at (0, 0), or `None` if it lights nothing.
///
/// The scratch pixmap is the layout box grown by one em on every side so
/// overhanging glyphs (italics, descenders, accents) are not clipped.
fn ink_bounds(tree: &Tree, size: f32) -> Option<BoundsPx> {
    let layout = tree.root().abs_bounding_box();
    let layout = BoundsPx::enclosing(layout.left(), layout.top(), layout.right(), layout.bottom());
    let pad = size.ceil() as i32;

    let width = u32::try_from(layout.width() + 2 * pad).ok()?;
    let height = u32::try_from(layout.height() + 2 * pad).ok()?;
    let mut scratch = Pixmap::new(width, height)?;

    let (dx, dy) = (pad - layout.left, pad - layout.top);
    let transform = Transform::from_translate(dx as f32, dy as f32);
    resvg::render(tree, transform, &mut scratch.as_mut());

    let mut found: Option<BoundsPx> = None;
    for (index, pixel) in scratch.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }
        let x = (index % width as usize) as i32;
        let y = (index / width as usize) as i32;
        let lit = BoundsPx::pixel(x, y);
        found = Some(found.map_or(lit, |b| b.union(&lit)));
    }

    found.map(|b| b.translate(-dx, -dy))
}

/// Builds the SVG document for a single line of text anchored at (0, 0).
fn text_markup(text: &str, family: &str, size: f32, color: Srgb<u8>, canvas: SizePx) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
            r#"<text x="0" y="0" xml:space="preserve" dominant-baseline="text-before-edge" "#,
            r#"font-family="{family}" font-size="{size}" fill="{fill}">{text}</text>"#,
            "</svg>"
        ),
        w = canvas.width,
        h = canvas.height,
        family = escape_xml(family),
        size = size,
        fill = hex_color(color),
        text = escape_xml(text),
    )
}

/// Formats a colour as `#rrggbb`.
pub fn hex_color(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Escapes the characters that are significant in XML text and attributes.
fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
