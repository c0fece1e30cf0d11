#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle on the floor plane with `x0 <= x1` and `y0 <= y1`.
///
/// `y` grows "down" in the obstacle coordinate system, so `(x0, y0)` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Grow every side outward by `d`.
    pub fn expand(&mut self, d: f32) {
        self.x0 -= d;
        self.y0 -= d;
        self.x1 += d;
        self.y1 += d;
    }

    /// Cut every coordinate down to two decimal places.
    pub fn trunc_2_decimals(&mut self) {
        self.x0 = trunc_2(self.x0);
        self.y0 = trunc_2(self.y0);
        self.x1 = trunc_2(self.x1);
        self.y1 = trunc_2(self.y1);
    }

    /// Bounding box of both rectangles.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Closed-interval overlap: rectangles sharing only an edge or a corner overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.y1 < other.y0 || self.y0 > other.y1 || self.x0 > other.x1 || self.x1 < other.x0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

fn trunc_2(v: f32) -> f32 {
    (v * 100.0).trunc() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_grows_all_sides() {
        let mut r = Rect::new(0.0, 0.0, 10.0, 10.0);
        r.expand(12.0);
        assert_eq!(r, Rect::new(-12.0, -12.0, 22.0, 22.0));
    }

    #[test]
    fn trunc_drops_extra_decimals() {
        let mut r = Rect::new(1.239, -4.5, 7.0, 3.141);
        r.trunc_2_decimals();
        assert!((r.x0 - 1.23).abs() < 1e-5);
        assert!((r.y0 + 4.5).abs() < 1e-5);
        assert!((r.y1 - 3.14).abs() < 1e-5);
    }

    #[test]
    fn touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        let c = Rect::new(10.5, 0.0, 20.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.merge(&c), Rect::new(0.0, 0.0, 20.0, 10.0));
    }
}
