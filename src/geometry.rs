//! Pixel geometry shared by the composer and the resizer.

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Returns the shorter of the two edges.
    pub fn min_edge(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// A tight pixel bounding box, relative to a text draw origin.
///
/// Unlike a canvas rectangle, the box may start at a negative offset or
/// extend past the origin on either axis, so all edges are signed. The
/// right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundsPx {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundsPx {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns the smallest integer box that contains the given float box.
    pub fn enclosing(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.floor() as i32,
            top: top.floor() as i32,
            right: right.ceil() as i32,
            bottom: bottom.ceil() as i32,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns true if the box covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Returns the smallest box covering both boxes.
    pub fn union(&self, other: &BoundsPx) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Returns the one-pixel box at `(x, y)`.
    pub fn pixel(x: i32, y: i32) -> Self {
        Self::new(x, y, x + 1, y + 1)
    }

    /// Returns this box moved by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }
}

/// Halves `value`, rounding toward negative infinity.
///
/// Centering offsets go negative when text is wider than the canvas, and
/// plain `/` would round those toward zero instead.
pub fn floor_half(value: i32) -> i32 {
    value.div_euclid(2)
}
