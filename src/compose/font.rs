//! Font resolution with a built-in fallback.
//!
//! [`resolve_font`] never fails. When the requested family is not in the
//! [`FontLibrary`], the returned handle uses the fixed-size bitmap font
//! instead and reports [`FontSource::Fallback`].

use std::path::PathBuf;
use std::sync::Arc;

use palette::Srgb;
use resvg::tiny_skia::{Color, Paint, Pixmap};
use resvg::usvg::fontdb::{self, Family, Query};

use super::bitmap;
use super::markup::OutlinedText;
use crate::geometry::{BoundsPx, SizePx};

// ============================================================================
// FontLibrary
// ============================================================================

/// The set of scalable fonts a composer may resolve against.
///
/// Cloning is cheap; the underlying database is shared.
#[derive(Clone)]
pub struct FontLibrary {
    db: Arc<fontdb::Database>,
}

impl FontLibrary {
    /// A library with no fonts. Every resolution falls back.
    pub fn empty() -> Self {
        Self::from_database(fontdb::Database::new())
    }

    /// A library with the fonts installed on this machine.
    pub fn system() -> Self {
        Self::load(true, &[])
    }

    /// Loads system fonts (optionally) plus every font under `font_dirs`.
    pub fn load(system_fonts: bool, font_dirs: &[PathBuf]) -> Self {
        let mut db = fontdb::Database::new();
        if system_fonts {
            db.load_system_fonts();
        }
        for dir in font_dirs {
            db.load_fonts_dir(dir);
        }
        log::debug!("font library holds {} faces", db.len());
        Self::from_database(db)
    }

    pub fn from_database(db: fontdb::Database) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Returns the number of loaded font faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Returns the distinct family names of every loaded face, sorted.
    pub fn families(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Returns true if `family` resolves to a loaded face.
    ///
    /// The generic names `serif`, `sans-serif`, `monospace`, `cursive` and
    /// `fantasy` are not portable: fontdb maps them to fixed families
    /// ("Times New Roman", "Arial", "Courier New", "Comic Sans MS",
    /// "Impact"). On a machine without that family the generic name does
    /// not resolve and text falls back to the bitmap font.
    pub fn contains_family(&self, family: &str) -> bool {
        let families = [generic_or_named(family)];
        let query = Query {
            families: &families,
            ..Query::default()
        };
        self.db.query(&query).is_some()
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("faces", &self.db.len())
            .finish()
    }
}

fn generic_or_named(family: &str) -> Family<'_> {
    match family {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        name => Family::Name(name),
    }
}

// ============================================================================
// FontHandle
// ============================================================================

/// Which branch font resolution took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    /// The requested scalable family at the requested size.
    Scalable,
    /// The built-in bitmap font at its fixed size.
    Fallback,
}

/// A font ready to lay out text.
#[derive(Debug, Clone)]
pub struct FontHandle {
    kind: FontKind,
}

#[derive(Debug, Clone)]
enum FontKind {
    Scalable {
        library: FontLibrary,
        family: String,
        size: f32,
    },
    Fallback,
}

/// Resolves `family` at `size` pixels, substituting the bitmap font when
/// the family is not available or the size is unusable.
pub fn resolve_font(library: &FontLibrary, family: &str, size: f32) -> FontHandle {
    if size.is_finite() && size > 0.0 && library.contains_family(family) {
        return FontHandle {
            kind: FontKind::Scalable {
                library: library.clone(),
                family: family.to_string(),
                size,
            },
        };
    }

    log::debug!("font {family:?} at {size}px unavailable, using built-in bitmap font");
    FontHandle::fallback()
}

impl FontHandle {
    /// The built-in bitmap font.
    pub fn fallback() -> Self {
        Self {
            kind: FontKind::Fallback,
        }
    }

    pub fn source(&self) -> FontSource {
        match self.kind {
            FontKind::Scalable { .. } => FontSource::Scalable,
            FontKind::Fallback => FontSource::Fallback,
        }
    }

    /// Measures `text` and prepares it for drawing in `color`.
    ///
    /// Returns `None` when the text has no visible pixels. A scalable font
    /// that produces no outlines for visible text (missing glyphs) is
    /// replaced by the bitmap font for this block.
    pub fn layout(&self, text: &str, color: Srgb<u8>, canvas: SizePx) -> Option<TextLayout> {
        if let FontKind::Scalable {
            library,
            family,
            size,
        } = &self.kind
        {
            match OutlinedText::shape(&library.db, text, family, *size, color, canvas) {
                Some(outlines) => {
                    return Some(TextLayout {
                        bounds: outlines.bounds(),
                        glyphs: Glyphs::Outlines(outlines),
                    });
                }
                None if text.trim().is_empty() => return None,
                None => log::debug!("{family:?} produced no outlines for {text:?}, using bitmap font"),
            }
        }

        let bounds = bitmap::measure(text)?;
        Some(TextLayout {
            bounds,
            glyphs: Glyphs::Dots {
                text: text.to_string(),
                color,
            },
        })
    }
}

// ============================================================================
// TextLayout
// ============================================================================

/// Measured text that can be stamped onto a pixmap.
pub struct TextLayout {
    bounds: BoundsPx,
    glyphs: Glyphs,
}

enum Glyphs {
    Outlines(OutlinedText),
    Dots { text: String, color: Srgb<u8> },
}

impl TextLayout {
    /// The tight pixel box of the rendered text, relative to its draw origin.
    pub fn bounds(&self) -> BoundsPx {
        self.bounds
    }

    /// Returns which font actually rendered this text.
    pub fn source(&self) -> FontSource {
        match self.glyphs {
            Glyphs::Outlines(_) => FontSource::Scalable,
            Glyphs::Dots { .. } => FontSource::Fallback,
        }
    }

    /// Stamps the text with its draw origin at `(x, y)`.
    pub fn draw(&self, pixmap: &mut Pixmap, x: i32, y: i32) {
        match &self.glyphs {
            Glyphs::Outlines(outlines) => outlines.draw(pixmap, x, y),
            Glyphs::Dots { text, color } => {
                let mut paint = Paint::default();
                paint.set_color(Color::from_rgba8(color.red, color.green, color.blue, 255));
                paint.anti_alias = false;
                bitmap::draw(pixmap, text, x, y, &paint);
            }
        }
    }
}
