//! Handle layout, hit-testing and drag resolution for a selected shape.
//!
//! Drags are always resolved against the geometry captured when the drag
//! started, plus the total pointer delta, so repeated move events never
//! accumulate rounding drift.

use sensemap_geometry::{Point, Rect, Vector, vertex_mean};

use crate::annotation::Geometry;

/// Corner of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomRight => Corner::TopLeft,
            Corner::BottomLeft => Corner::TopRight,
        }
    }

    /// Where this corner is on `rect`
    pub fn of(self, rect: &Rect) -> Point {
        let [tl, tr, br, bl] = rect.corners();
        match self {
            Corner::TopLeft => tl,
            Corner::TopRight => tr,
            Corner::BottomRight => br,
            Corner::BottomLeft => bl,
        }
    }
}

/// What dragging a handle does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Rectangle corner; the opposite corner stays fixed
    Corner(Corner),
    /// Circle rim handle at `(cx + radius, cy)`
    Radius,
    /// Polygon vertex by index
    Vertex(usize),
    /// Centroid handle; translates the whole shape
    Move,
}

/// A draggable control point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    pub position: Point,
}

impl Handle {
    fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// Handles for a shape. The move handle always comes last.
pub fn handles(geometry: &Geometry) -> Vec<Handle> {
    match geometry {
        Geometry::Marker(p) => vec![Handle::new(HandleKind::Move, *p)],
        Geometry::Rectangle(rect) => {
            let mut handles: Vec<Handle> = Corner::ALL
                .into_iter()
                .map(|corner| Handle::new(HandleKind::Corner(corner), corner.of(rect)))
                .collect();
            handles.push(Handle::new(HandleKind::Move, rect.center()));
            handles
        }
        Geometry::Circle(circle) => vec![
            Handle::new(HandleKind::Radius, circle.rim_point()),
            Handle::new(HandleKind::Move, circle.center()),
        ],
        Geometry::Polygon { points } => {
            let mut handles: Vec<Handle> = points
                .iter()
                .enumerate()
                .map(|(i, p)| Handle::new(HandleKind::Vertex(i), *p))
                .collect();
            if let Some(mean) = vertex_mean(points) {
                handles.push(Handle::new(HandleKind::Move, mean));
            }
            handles
        }
    }
}

/// Closest handle within `tolerance` of `p`.
///
/// Shape handles win over the move handle, so a tiny shape whose centroid
/// overlaps its corners can still be resized.
pub fn hit_handle(geometry: &Geometry, p: Point, tolerance: f64) -> Option<HandleKind> {
    let all = handles(geometry);
    let nearest = |want_move: bool| {
        all.iter()
            .filter(|h| (h.kind == HandleKind::Move) == want_move)
            .map(|h| (h.kind, h.position.distance(p)))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(kind, _)| kind)
    };
    nearest(false).or_else(|| nearest(true))
}

/// Geometry after dragging `handle` of `original` by `delta`.
///
/// A handle that does not belong to the shape leaves it unchanged.
pub fn drag(original: &Geometry, handle: HandleKind, delta: Vector) -> Geometry {
    match (original, handle) {
        (_, HandleKind::Move) => original.translated(delta),
        (Geometry::Rectangle(rect), HandleKind::Corner(corner)) => {
            // Re-normalize: dragging past the fixed corner swaps roles
            let moved = corner.of(rect).translated(delta);
            let fixed = corner.opposite().of(rect);
            Geometry::Rectangle(Rect::from_corners(moved, fixed))
        }
        (Geometry::Circle(circle), HandleKind::Radius) => {
            let target = circle.rim_point().translated(delta);
            let mut resized = *circle;
            resized.radius = circle.center().distance(target).max(0.0);
            Geometry::Circle(resized)
        }
        (Geometry::Polygon { points }, HandleKind::Vertex(index)) if index < points.len() => {
            let mut points = points.clone();
            points[index] = points[index].translated(delta);
            Geometry::Polygon { points }
        }
        _ => original.clone(),
    }
}
