//! Segment intersection and distances

use crate::landmarks::Point;

/// Strict counter-clockwise orientation of (a, b, c)
fn ccw(a: Point, b: Point, c: Point) -> bool {
    // Differences need 33 bits, their products 66
    let (ax, ay) = (i128::from(a.x), i128::from(a.y));
    let lhs = (i128::from(c.y) - ay) * (i128::from(b.x) - ax);
    let rhs = (i128::from(b.y) - ay) * (i128::from(c.x) - ax);
    lhs > rhs
}

/// Whether segment AB crosses segment CD.
///
/// Uses strict orientation, so collinear, touching and zero-length
/// segments report `false`.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

/// Euclidean distance in pixels
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    dx.hypot(dy)
}
