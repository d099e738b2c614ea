//! Snap resolution: the point on a line nearest to the cursor.
//!
//! Used for the hover snap indicator and for placing inserted elbows.

use crate::geometry::{closest_point_on_segment, cubic_bezier_at, quad_bezier_at};
use crate::path::curve_controls;
use crate::shapes::{Line, LineKind};
use kurbo::Point;

/// Cursor distance at which a line's own points win outright.
pub const TERMINAL_SNAP_RADIUS: f64 = 15.0;

/// Maximum cursor distance for snapping onto the path.
pub const PATH_SNAP_RADIUS: f64 = 30.0;

/// Largest corner radius assumed for step lines when snapping.
pub const STEP_CORNER_RADIUS: f64 = 20.0;

/// Samples taken along a step corner (t = 0, 0.1, .., 1).
const STEP_CORNER_SAMPLES: u32 = 10;

/// Samples taken along each curve segment (t = 0, 0.01, .., 1).
const CURVE_SAMPLES: u32 = 100;

/// Running best candidate, pruned by distance.
struct BestSnap {
    target: Point,
    point: Option<Point>,
    dist: f64,
}

impl BestSnap {
    fn new(target: Point, radius: f64) -> Self {
        Self { target, point: None, dist: radius }
    }

    fn offer(&mut self, candidate: Point) {
        let dist = self.target.distance(candidate);
        if dist < self.dist {
            self.dist = dist;
            self.point = Some(candidate);
        }
    }
}

/// Find the snap point on `line` nearest to `point`.
///
/// Any of the line's own points within [`TERMINAL_SNAP_RADIUS`] is returned
/// exactly, start first. Otherwise the path is searched within
/// [`PATH_SNAP_RADIUS`]; `None` if nothing is that close.
pub fn closest_point_on_line(point: Point, line: &Line) -> Option<Point> {
    let pts = line.all_points();

    if let Some(&terminal) = pts.iter().find(|p| point.distance(**p) < TERMINAL_SNAP_RADIUS) {
        return Some(terminal);
    }

    let mut best = BestSnap::new(point, PATH_SNAP_RADIUS);
    for w in pts.windows(2) {
        let (p1, p2) = (w[0], w[1]);
        match line.kind {
            LineKind::Straight => best.offer(closest_point_on_segment(point, p1, p2)),
            LineKind::Step => snap_step_segment(&mut best, p1, p2),
            LineKind::Curve => snap_curve_segment(&mut best, p1, p2),
        }
    }
    best.point
}

/// Step pairs are modelled as a horizontal leg, a rounded corner and a
/// vertical leg. The drawn path keeps its sharp corner, so snap points near
/// the corner sit slightly inside it.
fn snap_step_segment(best: &mut BestSnap, p1: Point, p2: Point) {
    let corner = Point::new(p2.x, p1.y);
    let r = STEP_CORNER_RADIUS
        .min((p2.x - p1.x).abs() / 2.0)
        .min((p2.y - p1.y).abs() / 2.0);

    let start_x = if p2.x > p1.x { corner.x - r } else { corner.x + r };
    let end_y = if p2.y > p1.y { corner.y + r } else { corner.y - r };

    best.offer(closest_point_on_segment(best.target, p1, Point::new(start_x, p1.y)));
    best.offer(closest_point_on_segment(best.target, Point::new(corner.x, end_y), p2));

    for i in 0..=STEP_CORNER_SAMPLES {
        let t = f64::from(i) / f64::from(STEP_CORNER_SAMPLES);
        best.offer(Point::new(
            quad_bezier_at(t, start_x, corner.x, corner.x),
            quad_bezier_at(t, corner.y, corner.y, end_y),
        ));
    }
}

fn snap_curve_segment(best: &mut BestSnap, p1: Point, p2: Point) {
    let (cp1, cp2) = curve_controls(p1, p2);
    for i in 0..=CURVE_SAMPLES {
        let t = f64::from(i) / f64::from(CURVE_SAMPLES);
        best.offer(Point::new(
            cubic_bezier_at(t, p1.x, cp1.x, cp2.x, p2.x),
            cubic_bezier_at(t, p1.y, cp1.y, cp2.y, p2.y),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::ParamCurveNearest;

    fn line(points: &[Point], kind: LineKind) -> Line {
        Line::from_points(points, kind).unwrap()
    }

    #[test]
    fn test_terminal_snap_wins_over_closer_path_point() {
        let l = line(
            &[Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)],
            LineKind::Straight,
        );
        // 5 units from the path at (90, 0) but 11.2 from the elbow.
        let snap = closest_point_on_line(Point::new(90.0, 5.0), &l);
        assert_eq!(snap, Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_terminal_snap_prefers_start() {
        let l = line(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], LineKind::Straight);
        assert_eq!(closest_point_on_line(Point::new(4.0, 0.0), &l), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_straight_projection() {
        let l = line(&[Point::new(0.0, 0.0), Point::new(200.0, 0.0)], LineKind::Straight);
        assert_eq!(closest_point_on_line(Point::new(80.0, 12.0), &l), Some(Point::new(80.0, 0.0)));
    }

    #[test]
    fn test_straight_picks_best_segment() {
        let l = line(
            &[Point::new(0.0, 0.0), Point::new(200.0, 0.0), Point::new(200.0, 200.0)],
            LineKind::Straight,
        );
        assert_eq!(closest_point_on_line(Point::new(180.0, 100.0), &l), Some(Point::new(200.0, 100.0)));
    }

    #[test]
    fn test_nothing_within_radius() {
        let l = line(&[Point::new(0.0, 0.0), Point::new(200.0, 0.0)], LineKind::Straight);
        assert_eq!(closest_point_on_line(Point::new(100.0, 31.0), &l), None);
        for kind in [LineKind::Step, LineKind::Curve] {
            let l = line(&[Point::new(0.0, 0.0), Point::new(200.0, 0.0)], kind);
            assert_eq!(closest_point_on_line(Point::new(100.0, 60.0), &l), None);
        }
    }

    #[test]
    fn test_step_horizontal_leg() {
        let l = line(&[Point::new(0.0, 0.0), Point::new(200.0, 200.0)], LineKind::Step);
        assert_eq!(closest_point_on_line(Point::new(60.0, 10.0), &l), Some(Point::new(60.0, 0.0)));
    }

    #[test]
    fn test_step_vertical_leg() {
        let l = line(&[Point::new(0.0, 0.0), Point::new(200.0, 200.0)], LineKind::Step);
        assert_eq!(closest_point_on_line(Point::new(190.0, 120.0), &l), Some(Point::new(200.0, 120.0)));
    }

    #[test]
    fn test_step_snaps_to_rounded_corner() {
        let l = line(&[Point::new(0.0, 0.0), Point::new(100.0, 100.0)], LineKind::Step);
        let snap = closest_point_on_line(Point::new(100.0, 0.0), &l).unwrap();
        // The sharp drawn corner is never a snap target; the rounded one is.
        assert_ne!(snap, Point::new(100.0, 0.0));
        assert!((snap.x - 95.0).abs() < 1e-9);
        assert!((snap.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_leftward_and_upward() {
        let l = line(&[Point::new(200.0, 200.0), Point::new(0.0, 0.0)], LineKind::Step);
        // Horizontal leg runs along y = 200 towards x = 0.
        assert_eq!(closest_point_on_line(Point::new(120.0, 210.0), &l), Some(Point::new(120.0, 200.0)));
        // Vertical leg runs along x = 0 towards y = 0.
        assert_eq!(closest_point_on_line(Point::new(8.0, 90.0), &l), Some(Point::new(0.0, 90.0)));
    }

    #[test]
    fn test_curve_sample() {
        let l = line(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)], LineKind::Curve);
        let snap = closest_point_on_line(Point::new(50.0, 3.0), &l).unwrap();
        assert!((snap.x - 50.0).abs() < 1e-9);
        assert!(snap.y.abs() < 1e-9);
    }

    #[test]
    fn test_curve_sample_lies_on_drawn_curve() {
        let l = line(&[Point::new(0.0, 0.0), Point::new(300.0, 120.0)], LineKind::Curve);
        let snap = closest_point_on_line(Point::new(150.0, 70.0), &l).unwrap();
        let path = l.to_path();
        let on_path = path.segments().any(|seg| seg.nearest(snap, 1e-9).distance_sq < 1e-6);
        assert!(on_path);
    }
}
