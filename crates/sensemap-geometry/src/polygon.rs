//! Free functions over vertex lists.
//!
//! Polygons are plain `&[Point]` slices in insertion order; the closing edge
//! from the last vertex back to the first is implicit.

use crate::point::Point;

/// Unweighted mean of the vertices (not the area centroid)
pub fn vertex_mean(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Ray-casting inside test. Fewer than 3 vertices never contain anything.
pub fn polygon_contains(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (vi, vj) = (points[i], points[j]);
        if (vi.y > p.y) != (vj.y > p.y)
            && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to the segment `a`-`b`
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dx * ab.dx + ab.dy * ab.dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let ap = p - a;
    let t = ((ap.dx * ab.dx + ap.dy * ab.dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + ab.dx * t, a.y + ab.dy * t))
}

/// Shortest distance from `p` to any edge of the closed outline
pub fn polygon_outline_distance(points: &[Point], p: Point) -> Option<f64> {
    match points {
        [] => None,
        [only] => Some(p.distance(*only)),
        _ => {
            let mut best = f64::INFINITY;
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                best = best.min(segment_distance(p, a, b));
            }
            Some(best)
        }
    }
}
