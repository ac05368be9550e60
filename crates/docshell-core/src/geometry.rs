#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for slot regions, overlays, and hit testing.
///
/// Uses host coordinates (0-indexed, origin at top-left). The unit is
/// whatever the host measures the viewport in: pixels for a windowed host,
/// cells for a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width.
    pub width: u16,
    /// Height.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Split off a strip of `width` from the left edge.
    ///
    /// Returns `(strip, rest)`. The strip is clamped to the available width,
    /// so `strip.width + rest.width == self.width` always holds.
    #[must_use]
    pub fn take_left(&self, width: u16) -> (Rect, Rect) {
        let width = width.min(self.width);
        (
            Rect::new(self.x, self.y, width, self.height),
            Rect::new(self.x.saturating_add(width), self.y, self.width - width, self.height),
        )
    }

    /// Split off a strip of `width` from the right edge.
    ///
    /// Returns `(strip, rest)` with the same clamping as [`take_left`](Self::take_left).
    #[must_use]
    pub fn take_right(&self, width: u16) -> (Rect, Rect) {
        let width = width.min(self.width);
        let rest = self.width - width;
        (
            Rect::new(self.x.saturating_add(rest), self.y, width, self.height),
            Rect::new(self.x, self.y, rest, self.height),
        )
    }

    /// Split off a band of `height` from the top edge.
    ///
    /// Returns `(band, rest)`.
    #[must_use]
    pub fn take_top(&self, height: u16) -> (Rect, Rect) {
        let height = height.min(self.height);
        (
            Rect::new(self.x, self.y, self.width, height),
            Rect::new(self.x, self.y.saturating_add(height), self.width, self.height - height),
        )
    }
}
