//! Built-in 5x7 dot-matrix font used when no scalable font is available.
//!
//! Glyphs are stored column by column; bit 0 of each column is the top row.

use resvg::tiny_skia::{Paint, Pixmap, Rect, Transform};

use crate::geometry::BoundsPx;

/// Dots per glyph column.
const GLYPH_ROWS: u32 = 7;
/// Columns per glyph.
const GLYPH_COLUMNS: u32 = 5;
/// Horizontal advance in dots, including the gap column.
const ADVANCE: u32 = GLYPH_COLUMNS + 1;
/// Pixels per dot.
pub const DOT_SIZE: u32 = 2;

const FIRST_CHAR: u8 = b' ';
const LAST_CHAR: u8 = b'~';

#[rustfmt::skip]
const GLYPHS: [[u8; GLYPH_COLUMNS as usize]; (LAST_CHAR - FIRST_CHAR + 1) as usize] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x56, 0x20, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x14, 0x08, 0x3E, 0x08, 0x14], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x08, 0x14, 0x22, 0x41, 0x00], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x00, 0x41, 0x22, 0x14, 0x08], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x09, 0x01], // 'F'
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x07, 0x08, 0x70, 0x08, 0x07], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7F, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x7F, 0x10, 0x28, 0x44, 0x00], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x04, 0x08, 0x10, 0x08], // '~'
];

/// Returns the glyph columns for `ch`, substituting `?` outside printable ASCII.
fn glyph(ch: char) -> &'static [u8; GLYPH_COLUMNS as usize] {
    let code = match u8::try_from(ch) {
        Ok(code) if (FIRST_CHAR..=LAST_CHAR).contains(&code) => code,
        _ => b'?',
    };
    &GLYPHS[(code - FIRST_CHAR) as usize]
}

/// Iterates the lit dots of `text` as `(column, row)` in dot units from the origin.
fn lit_dots(text: &str) -> impl Iterator<Item = (u32, u32)> + '_ {
    text.chars().enumerate().flat_map(|(index, ch)| {
        let base = index as u32 * ADVANCE;
        glyph(ch).iter().enumerate().flat_map(move |(column, bits)| {
            (0..GLYPH_ROWS)
                .filter(move |&row| bits & (1u8 << row) != 0)
                .map(move |row| (base + column as u32, row))
        })
    })
}

/// Returns the tight pixel box of the lit dots, or `None` for blank text.
pub fn measure(text: &str) -> Option<BoundsPx> {
    let mut bounds: Option<BoundsPx> = None;
    for (column, row) in lit_dots(text) {
        let (x, y) = ((column * DOT_SIZE) as i32, (row * DOT_SIZE) as i32);
        let dot = BoundsPx::new(x, y, x + DOT_SIZE as i32, y + DOT_SIZE as i32);
        bounds = Some(match bounds {
            None => dot,
            Some(b) => BoundsPx::new(
                b.left.min(dot.left),
                b.top.min(dot.top),
                b.right.max(dot.right),
                b.bottom.max(dot.bottom),
            ),
        });
    }
    bounds
}

/// Stamps `text` with its cell origin at `(x, y)`.
pub fn draw(pixmap: &mut Pixmap, text: &str, x: i32, y: i32, paint: &Paint) {
    let size = DOT_SIZE as f32;
    for (column, row) in lit_dots(text) {
        let left = x as f32 + (column * DOT_SIZE) as f32;
        let top = y as f32 + (row * DOT_SIZE) as f32;
        if let Some(rect) = Rect::from_xywh(left, top, size, size) {
            pixmap.fill_rect(rect, paint, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::Color;

    #[test]
    fn blank_text_has_no_bounds() {
        assert_eq!(measure(""), None);
        assert_eq!(measure("   "), None);
    }

    #[test]
    fn measure_single_glyph() {
        // 'A' lights all five columns and rows 0..=6.
        assert_eq!(measure("A"), Some(BoundsPx::new(0, 0, 10, 14)));
        // '-' only lights row 3.
        assert_eq!(measure("-"), Some(BoundsPx::new(0, 6, 10, 8)));
    }

    #[test]
    fn leading_space_offsets_bounds() {
        let bounds = measure(" I").unwrap();
        // 'I' starts at its second column, one advance in.
        assert_eq!(bounds.left, ((ADVANCE + 1) * DOT_SIZE) as i32);
    }

    #[test]
    fn non_ascii_renders_as_question_mark() {
        assert_eq!(measure("é"), measure("?"));
    }

    #[test]
    fn draw_matches_measured_bounds() {
        let mut pixmap = Pixmap::new(40, 30).unwrap();
        let mut paint = Paint::default();
        paint.set_color(Color::WHITE);
        paint.anti_alias = false;

        draw(&mut pixmap, "Hi", 3, 5, &paint);

        let expected = measure("Hi").unwrap().translate(3, 5);
        for (i, pixel) in pixmap.pixels().iter().enumerate() {
            let (x, y) = ((i as u32 % 40) as i32, (i as u32 / 40) as i32);
            if pixel.alpha() > 0 {
                assert!(x >= expected.left && x < expected.right, "x={x}");
                assert!(y >= expected.top && y < expected.bottom, "y={y}");
            }
        }
        let top_left_of_h = pixmap.pixel(3, 5).unwrap();
        assert_eq!(top_left_of_h.alpha(), 255);
    }
}
