//! Integer world geometry.
//!
//! World coordinates are whole pixels, origin top-left, `y` growing downward.
//! Rectangles are half-open: a `Rect` at `(x, y)` with size `(w, h)` covers
//! `x..x+w` horizontally and `y..y+h` vertically.
//!
//! Edges are computed in `i64`, so a rectangle reaching past `i32::MAX` is
//! still well defined; it just covers points no `Point` can name.

/// A point in world (or local) pixel space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `self` expressed relative to `origin`, or `None` if the difference
    /// does not fit in `i32`.
    #[inline]
    pub fn relative_to(self, origin: Point) -> Option<Point> {
        Some(Point::new(self.x.checked_sub(origin.x)?, self.y.checked_sub(origin.y)?))
    }

    /// Move by `(dx, dy)`, clamped to the `i32` range.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x:      i32,
    pub y:      i32,
    pub width:  u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// `true` if every covered pixel has `i32` coordinates.
    #[inline]
    pub fn fits_i32(&self) -> bool {
        const LIMIT: i64 = i32::MAX as i64 + 1;
        self.right() <= LIMIT && self.bottom() <= LIMIT
    }

    /// `true` if `p` lies inside the half-open rectangle.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        let (x, y) = (p.x as i64, p.y as i64);
        x >= self.x as i64 && x < self.right() && y >= self.y as i64 && y < self.bottom()
    }

    /// The same rectangle moved by `origin`, its corner clamped to the `i32`
    /// range.
    #[inline]
    pub fn translated(&self, origin: Point) -> Rect {
        Rect::new(self.x.saturating_add(origin.x), self.y.saturating_add(origin.y), self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
