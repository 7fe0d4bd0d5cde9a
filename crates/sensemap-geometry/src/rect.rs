use serde::{Deserialize, Serialize};

use crate::point::{Point, Vector};

/// Axis-aligned rectangle with a top-left origin and non-negative extent.
///
/// Build one from two arbitrary corners with [`Rect::from_corners`]; the
/// result is identical whichever order the corners come in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Normalize two corner points into a rectangle
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn min_corner(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn max_corner(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Point; 4] {
        let (min, max) = (self.min_corner(), self.max_corner());
        [
            min,
            Point::new(max.x, min.y),
            max,
            Point::new(min.x, max.y),
        ]
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn translated(&self, delta: Vector) -> Self {
        Self {
            x: self.x + delta.dx,
            y: self.y + delta.dy,
            ..*self
        }
    }

    /// Point lies inside the rectangle grown by `tolerance` on every side
    pub fn contains_within(&self, p: Point, tolerance: f64) -> bool {
        let max = self.max_corner();
        p.x >= self.x - tolerance
            && p.x <= max.x + tolerance
            && p.y >= self.y - tolerance
            && p.y <= max.y + tolerance
    }

    /// Both width and height strictly exceed `threshold`
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.width > threshold && self.height > threshold
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}
