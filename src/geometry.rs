//! Pixel-coordinate geometry shared by the overlay, masker, and selector.
//! `x` runs left→right, `y` runs top→bottom (standard screen coordinates).

use serde::{Deserialize, Serialize};

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in image pixel coordinates.
/// `left <= right` and `top <= bottom` for a well-formed rect; use
/// [`Rect::normalized`] before arithmetic on geometry from untrusted sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Center point (integer division, rounds toward the top-left).
    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }

    /// Strict containment: a point on the boundary does NOT count.
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.left && p.y > self.top && p.x < self.right && p.y < self.bottom
    }

    /// Swap flipped edges so that `left <= right` and `top <= bottom`.
    pub fn normalized(&self) -> Rect {
        Rect {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_containment_excludes_boundary() {
        let r = Rect::new(0, 0, 20, 20);
        assert!(r.contains_strict(Point::new(10, 10)));
        assert!(!r.contains_strict(Point::new(20, 10)));
        assert!(!r.contains_strict(Point::new(10, 20)));
        assert!(!r.contains_strict(Point::new(0, 10)));
        assert!(!r.contains_strict(Point::new(10, 0)));
    }

    #[test]
    fn center_of_even_rect() {
        let r = Rect::new(100, 100, 200, 200);
        assert_eq!(r.center(), Point::new(150, 150));
    }

    #[test]
    fn degenerate_rect_contains_nothing() {
        let r = Rect::new(5, 5, 5, 5);
        assert!(r.is_empty());
        assert!(!r.contains_strict(Point::new(5, 5)));
    }

    #[test]
    fn normalized_swaps_flipped_edges() {
        let r = Rect::new(10, 30, 2, 4).normalized();
        assert_eq!(r, Rect::new(2, 4, 10, 30));
    }
}
