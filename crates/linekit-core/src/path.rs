//! Path generation for the three line kinds.
//!
//! Drawing, hit testing and SVG export all build paths through [`path_for`],
//! so every consumer agrees on the exact geometry of a line.

use crate::shapes::LineKind;
use kurbo::{BezPath, PathEl, Point};
use std::fmt::Write as _;

/// Fraction of the horizontal span used to offset curve control points.
pub const CURVE_X_FACTOR: f64 = 0.35;

/// Fraction of the vertical span used to offset curve control points.
pub const CURVE_Y_FACTOR: f64 = 0.1;

/// Control points of the cubic joining `p1` to `p2` on a curve line.
///
/// The x offset is a larger share of the span than the y offset, which
/// gives the shallow S shape of curve connectors.
pub fn curve_controls(p1: Point, p2: Point) -> (Point, Point) {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let cp1 = Point::new(p1.x + dx * CURVE_X_FACTOR, p1.y + dy * CURVE_Y_FACTOR);
    let cp2 = Point::new(p2.x - dx * CURVE_X_FACTOR, p2.y - dy * CURVE_Y_FACTOR);
    (cp1, cp2)
}

/// Build the path through `points` for the given kind.
///
/// Fewer than two points produce an empty path.
pub fn path_for(points: &[Point], kind: LineKind) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 2 {
        return path;
    }

    path.move_to(points[0]);
    for w in points.windows(2) {
        let (p1, p2) = (w[0], w[1]);
        match kind {
            LineKind::Straight => path.line_to(p2),
            LineKind::Step => {
                path.line_to(Point::new(p2.x, p1.y));
                path.line_to(p2);
            }
            LineKind::Curve => {
                let (cp1, cp2) = curve_controls(p1, p2);
                path.curve_to(cp1, cp2, p2);
            }
        }
    }
    path
}

/// Format a path as SVG path data (`M x y L x y C x y, x y, x y`).
pub fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = match *el {
            PathEl::MoveTo(p) => write!(d, "M {} {}", p.x, p.y),
            PathEl::LineTo(p) => write!(d, "L {} {}", p.x, p.y),
            PathEl::QuadTo(c, p) => write!(d, "Q {} {}, {} {}", c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => {
                write!(d, "C {} {}, {} {}, {} {}", c1.x, c1.y, c2.x, c2.y, p.x, p.y)
            }
            PathEl::ClosePath => write!(d, "Z"),
        };
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_points() {
        assert!(path_for(&[], LineKind::Straight).elements().is_empty());
        assert!(path_for(&[Point::new(1.0, 1.0)], LineKind::Curve).elements().is_empty());
    }

    #[test]
    fn test_straight_pair() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(30.0, 40.0);
        let path = path_for(&[p1, p2], LineKind::Straight);
        assert_eq!(path.elements(), &[PathEl::MoveTo(p1), PathEl::LineTo(p2)]);
    }

    #[test]
    fn test_step_emits_right_angle() {
        let path = path_for(&[Point::new(0.0, 0.0), Point::new(50.0, 20.0)], LineKind::Step);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(50.0, 0.0)),
                PathEl::LineTo(Point::new(50.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_curve_controls() {
        let (cp1, cp2) = curve_controls(Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        assert!((cp1.x - 35.0).abs() < 1e-9);
        assert!((cp1.y - 5.0).abs() < 1e-9);
        assert!((cp2.x - 65.0).abs() < 1e-9);
        assert!((cp2.y - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_curve_one_cubic_per_pair() {
        let pts = [Point::new(0.0, 0.0), Point::new(100.0, -50.0), Point::new(200.0, 0.0)];
        let path = path_for(&pts, LineKind::Curve);
        let curves = path.elements().iter().filter(|el| matches!(el, PathEl::CurveTo(..))).count();
        assert_eq!(curves, 2);
        assert_eq!(path.elements().len(), 3);
    }

    #[test]
    fn test_path_data_format() {
        let path = path_for(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)], LineKind::Straight);
        assert_eq!(path_data(&path), "M 0 0 L 100 0");

        let path = path_for(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)], LineKind::Curve);
        assert_eq!(path_data(&path), "M 0 0 C 35 0, 65 0, 100 0");
    }
}
