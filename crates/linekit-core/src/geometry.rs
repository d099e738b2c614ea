//! Pure geometry helpers shared by snapping, hit testing and elbow insertion.

use kurbo::Point;

/// Project `point` onto the segment a→b, clamped to the segment.
///
/// A zero-length segment returns `a`.
pub fn closest_point_on_segment(point: Point, a: Point, b: Point) -> Point {
    let seg = b - a;
    let len_sq = seg.hypot2();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    a + seg * t
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    point.distance(closest_point_on_segment(point, a, b))
}

/// Index of the segment of `points` closest to `point`, if any lies strictly
/// within `max_dist`.
pub fn nearest_segment(point: Point, points: &[Point], max_dist: f64) -> Option<usize> {
    let mut best = None;
    let mut best_dist = max_dist;
    for (i, w) in points.windows(2).enumerate() {
        let dist = point_to_segment_dist(point, w[0], w[1]);
        if dist < best_dist {
            best_dist = dist;
            best = Some(i);
        }
    }
    best
}

/// Evaluate one axis of a cubic Bezier at `t` (Bernstein form).
pub fn cubic_bezier_at(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

/// Evaluate one axis of a quadratic Bezier at `t`.
pub fn quad_bezier_at(t: f64, p0: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * p0 + 2.0 * mt * t * p1 + t * t * p2
}
