use serde::{Deserialize, Serialize};

use crate::point::{Point, Vector};

/// Circle given by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            cx: center.x,
            cy: center.y,
            radius,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    /// The point on the rim at angle zero, `(cx + radius, cy)`
    pub fn rim_point(&self) -> Point {
        Point::new(self.cx + self.radius, self.cy)
    }

    pub fn translated(&self, delta: Vector) -> Self {
        Self::new(self.center().translated(delta), self.radius)
    }

    pub fn contains_within(&self, p: Point, tolerance: f64) -> bool {
        self.center().distance(p) <= self.radius + tolerance
    }

    pub fn is_finite(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite() && self.radius.is_finite()
    }
}
