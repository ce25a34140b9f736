//! Geometric hit-testing shared by the edit modes.

use kurbo::{Point, Vec2};

/// Default pick radius around a vertex, in world units.
pub const VERTEX_PICK_RADIUS: f64 = 0.5;

/// Default maximum distance from an edge segment, in world units.
pub const EDGE_PICK_DISTANCE: f64 = 0.3;

/// Distance from `point` to the segment `a`-`b`, clamping the
/// projection parameter to the segment. A degenerate segment yields
/// infinity so zero-length edges never match a pick.
pub fn segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let segment = Vec2::new(b.x - a.x, b.y - a.y);
    let relative = Vec2::new(point.x - a.x, point.y - a.y);

    let length_squared = segment.hypot2();
    if length_squared < f64::EPSILON {
        return f64::INFINITY;
    }

    let t = (relative.dot(segment) / length_squared).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * segment.x, a.y + t * segment.y);
    point.distance(closest)
}
