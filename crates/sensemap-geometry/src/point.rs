use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position on the floor plan
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Copy of this point moved by `delta`
    pub fn translated(self, delta: Vector) -> Self {
        self + delta
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A displacement between two points (drag delta)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_relative_eq!(Point::new(1.0, 1.0).distance(Point::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn subtract_then_add_returns_to_origin_point() {
        let a = Point::new(3.5, -2.0);
        let b = Point::new(-1.0, 7.25);
        let delta = b - a;
        assert_eq!(a + delta, b);
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(Point::new(0.0, 0.0).is_finite());
    }
}
