//! Line shape.

use super::{DEFAULT_COLOR, DEFAULT_WIDTH, LineId, LineKind, StrokeStyle, next_line_id};
use crate::path::path_for;
use kurbo::{Affine, BezPath, ParamCurveNearest, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Addresses one point of a line without borrowing it.
///
/// Drags hold one of these instead of a reference so the owning line stays
/// the single source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinePoint {
    Start,
    /// Interior point, indexed into `Line::elbows`.
    Elbow(usize),
    End,
}

/// A connector with a start, an end, and any number of elbows in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub(crate) id: LineId,
    /// Stroke color, passed through verbatim to the renderer and SVG.
    pub color: String,
    /// Stroke width.
    pub width: f64,
    /// Locked lines reject geometry and style edits.
    #[serde(default)]
    pub locked: bool,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Interior points, in path order from start to end.
    #[serde(default)]
    pub elbows: Vec<Point>,
    /// Path interpolation.
    #[serde(rename = "type")]
    pub kind: LineKind,
    /// Dash pattern.
    #[serde(default)]
    pub stroke_style: StrokeStyle,
}

impl Line {
    /// Create a new line with default style.
    pub fn new(start: Point, end: Point, kind: LineKind) -> Self {
        Self {
            id: next_line_id(),
            color: DEFAULT_COLOR.to_string(),
            width: DEFAULT_WIDTH,
            locked: false,
            start,
            end,
            elbows: Vec::new(),
            kind,
            stroke_style: StrokeStyle::default(),
        }
    }

    /// Create a line of the given kind with its default geometry around `center`.
    pub fn seeded(kind: LineKind, center: Point) -> Self {
        let (cx, cy) = (center.x, center.y);
        match kind {
            LineKind::Straight => Self::new(Point::new(cx - 100.0, cy), Point::new(cx + 100.0, cy), kind),
            LineKind::Step => {
                let mut line = Self::new(Point::new(cx - 150.0, cy - 75.0), Point::new(cx + 150.0, cy + 75.0), kind);
                line.elbows = vec![Point::new(cx, cy - 75.0), Point::new(cx, cy + 75.0)];
                line
            }
            LineKind::Curve => {
                let mut line = Self::new(Point::new(cx - 150.0, cy), Point::new(cx + 150.0, cy), kind);
                line.elbows = vec![Point::new(cx, cy - 100.0)];
                line
            }
        }
    }

    /// Create a line from an ordered point list (first = start, last = end).
    ///
    /// Returns `None` for fewer than two points.
    pub fn from_points(points: &[Point], kind: LineKind) -> Option<Self> {
        let (&start, rest) = points.split_first()?;
        let (&end, interior) = rest.split_last()?;
        let mut line = Self::new(start, end, kind);
        line.elbows = interior.to_vec();
        Some(line)
    }

    /// Get the unique identifier.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Give the line a freshly generated id.
    pub(crate) fn rekey(&mut self) {
        self.id = next_line_id();
    }

    /// Get all points in path order: start, elbows, end.
    pub fn all_points(&self) -> Vec<Point> {
        let mut pts = Vec::with_capacity(self.elbows.len() + 2);
        pts.push(self.start);
        pts.extend(&self.elbows);
        pts.push(self.end);
        pts
    }

    /// Points in the order they are tried when grabbing: start, end, then elbows.
    pub fn grab_order(&self) -> Vec<(LinePoint, Point)> {
        let mut pts = vec![(LinePoint::Start, self.start), (LinePoint::End, self.end)];
        pts.extend(self.elbows.iter().enumerate().map(|(i, &p)| (LinePoint::Elbow(i), p)));
        pts
    }

    /// Read a point by index.
    pub fn point(&self, which: LinePoint) -> Option<Point> {
        match which {
            LinePoint::Start => Some(self.start),
            LinePoint::End => Some(self.end),
            LinePoint::Elbow(i) => self.elbows.get(i).copied(),
        }
    }

    /// Mutable access to a point by index.
    pub fn point_mut(&mut self, which: LinePoint) -> Option<&mut Point> {
        match which {
            LinePoint::Start => Some(&mut self.start),
            LinePoint::End => Some(&mut self.end),
            LinePoint::Elbow(i) => self.elbows.get_mut(i),
        }
    }

    /// Midpoint of start and end, the rotation pivot.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Axis-aligned bounds of all points.
    pub fn bounds(&self) -> Rect {
        let points = self.all_points();
        let (min_x, max_x) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.x), mx.max(p.x)));
        let (min_y, max_y) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| (mn.min(p.y), mx.max(p.y)));
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Get the drawable path for this line.
    pub fn to_path(&self) -> BezPath {
        path_for(&self.all_points(), self.kind)
    }

    /// Check if a point lies inside a stroke of `hit_width` centred on the path.
    ///
    /// The hit width is independent of the visual `width`.
    pub fn hit_test(&self, point: Point, hit_width: f64) -> bool {
        let half = hit_width / 2.0;
        self.to_path()
            .segments()
            .any(|seg| seg.nearest(point, 1e-6).distance_sq <= half * half)
    }

    /// Apply a transform to every point.
    pub fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
        for p in &mut self.elbows {
            *p = affine * *p;
        }
    }

    /// Offset every point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.transform(Affine::translate(delta));
    }

    /// Rotate every point about `pivot` by `angle` radians.
    pub fn rotate_about(&mut self, pivot: Point, angle: f64) {
        self.transform(Affine::rotate_about(angle, pivot));
    }

    /// Insert an elbow so that it sits at position `index` in `elbows`.
    ///
    /// Indices past the end append.
    pub fn insert_elbow(&mut self, index: usize, point: Point) {
        let index = index.min(self.elbows.len());
        self.elbows.insert(index, point);
    }

    /// Remove the elbow at `index`, if present.
    pub fn remove_elbow(&mut self, index: usize) -> Option<Point> {
        (index < self.elbows.len()).then(|| self.elbows.remove(index))
    }
}
