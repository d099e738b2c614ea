//! Manipulation handles and drag transforms for the active line.

use crate::config::EditorConfig;
use crate::shapes::{Line, LineId, LinePoint};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Anchor for the move and rotate icons, recomputed from live points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorBox {
    /// Smallest y over all of the line's points.
    pub min_y: f64,
    /// Midpoint of the horizontal extent.
    pub mid_x: f64,
}

impl AnchorBox {
    /// Anchor point (mid_x, min_y).
    pub fn anchor(&self) -> Point {
        Point::new(self.mid_x, self.min_y)
    }
}

/// Compute the anchor box over start, elbows and end.
pub fn anchor_box(line: &Line) -> AnchorBox {
    let bounds = line.bounds();
    AnchorBox {
        min_y: bounds.y0,
        mid_x: (bounds.x0 + bounds.x1) / 2.0,
    }
}

/// Type of manipulation handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// One of the line's own points.
    Point(LinePoint),
    /// Translates the whole line.
    Move,
    /// Rotates the line about its start/end midpoint.
    Rotate,
    /// Delete button attached to an elbow.
    DeleteElbow(usize),
}

/// A handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point lies strictly within `radius` of this handle.
    pub fn hit_test(&self, point: Point, radius: f64) -> bool {
        point.distance(self.position) < radius
    }
}

/// Position of the move icon.
pub fn move_handle_position(line: &Line, config: &EditorConfig) -> Point {
    anchor_box(line).anchor() + config.move_handle_offset
}

/// Position of the rotate icon.
pub fn rotate_handle_position(line: &Line, config: &EditorConfig) -> Point {
    anchor_box(line).anchor() + config.rotate_handle_offset
}

/// Position of the delete button for an elbow at `elbow`.
pub fn delete_button_position(elbow: Point, config: &EditorConfig) -> Point {
    elbow + config.delete_button_offset
}

/// Get the handles for a line.
///
/// Point handles come first (start, elbows, end). Move, rotate and delete
/// affordances are only offered for unlocked lines.
pub fn get_handles(line: &Line, config: &EditorConfig) -> Vec<Handle> {
    let mut handles = Vec::with_capacity(line.elbows.len() * 2 + 4);
    handles.push(Handle::new(line.start, HandleKind::Point(LinePoint::Start)));
    for (i, &pt) in line.elbows.iter().enumerate() {
        handles.push(Handle::new(pt, HandleKind::Point(LinePoint::Elbow(i))));
    }
    handles.push(Handle::new(line.end, HandleKind::Point(LinePoint::End)));

    if line.locked {
        return handles;
    }

    handles.push(Handle::new(move_handle_position(line, config), HandleKind::Move));
    handles.push(Handle::new(rotate_handle_position(line, config), HandleKind::Rotate));
    for (i, &pt) in line.elbows.iter().enumerate() {
        handles.push(Handle::new(delete_button_position(pt, config), HandleKind::DeleteElbow(i)));
    }
    handles
}

/// Find which handle of an unlocked line is pressed at `point`.
///
/// Precedence: elbow delete (button, or the elbow itself with `ctrl`),
/// then a line point in grab order, then move, then rotate. Locked lines
/// never yield a handle.
pub fn hit_test_handles(line: &Line, point: Point, ctrl: bool, config: &EditorConfig) -> Option<HandleKind> {
    if line.locked {
        return None;
    }

    let delete = line.elbows.iter().position(|&elbow| {
        let over_button = point.distance(delete_button_position(elbow, config)) < config.delete_button_radius;
        let over_point = point.distance(elbow) < config.ctrl_delete_radius;
        over_button || (ctrl && over_point)
    });
    if let Some(i) = delete {
        return Some(HandleKind::DeleteElbow(i));
    }

    if let Some((which, _)) = line
        .grab_order()
        .into_iter()
        .find(|(_, pt)| point.distance(*pt) < config.grab_radius)
    {
        return Some(HandleKind::Point(which));
    }

    if point.distance(move_handle_position(line, config)) < config.handle_radius {
        return Some(HandleKind::Move);
    }
    if point.distance(rotate_handle_position(line, config)) < config.handle_radius {
        return Some(HandleKind::Rotate);
    }
    None
}

/// Whether `point` is over a move, rotate or delete affordance of `line`.
///
/// Delete buttons are detected on locked lines too so the host can show a
/// not-allowed cursor over them.
pub fn over_affordance(line: &Line, point: Point, config: &EditorConfig) -> bool {
    let over_delete = line
        .elbows
        .iter()
        .any(|&elbow| point.distance(delete_button_position(elbow, config)) < config.delete_button_radius);
    if over_delete {
        return true;
    }
    !line.locked
        && (point.distance(move_handle_position(line, config)) < config.handle_radius
            || point.distance(rotate_handle_position(line, config)) < config.handle_radius)
}

/// An in-progress drag. Refers to the line by id and to points by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// A single point follows the cursor.
    Point { line_id: LineId, point: LinePoint },
    /// The whole line follows the cursor by frame-to-frame deltas.
    Translate { line_id: LineId, last: Point },
    /// The line rotates about a pivot fixed at drag start.
    Rotate { line_id: LineId, pivot: Point, last_angle: f64 },
}

impl DragState {
    /// Begin the drag for a pressed handle. Delete buttons start no drag.
    pub fn begin(line: &Line, handle: HandleKind, cursor: Point) -> Option<Self> {
        let line_id = line.id();
        match handle {
            HandleKind::Point(point) => Some(DragState::Point { line_id, point }),
            HandleKind::Move => Some(DragState::Translate { line_id, last: cursor }),
            HandleKind::Rotate => {
                let pivot = line.midpoint();
                Some(DragState::Rotate {
                    line_id,
                    pivot,
                    last_angle: angle_to(pivot, cursor),
                })
            }
            HandleKind::DeleteElbow(_) => None,
        }
    }

    /// The line being dragged.
    pub fn line_id(&self) -> LineId {
        match *self {
            DragState::Point { line_id, .. }
            | DragState::Translate { line_id, .. }
            | DragState::Rotate { line_id, .. } => line_id,
        }
    }

    /// Apply one pointer position to `line` and advance the drag.
    ///
    /// Translate and rotate are incremental: each call applies only the
    /// change since the previous call.
    pub fn apply(&mut self, line: &mut Line, cursor: Point) {
        match self {
            DragState::Point { point, .. } => {
                if let Some(pt) = line.point_mut(*point) {
                    *pt = cursor;
                }
            }
            DragState::Translate { last, .. } => {
                let delta: Vec2 = cursor - *last;
                line.translate(delta);
                *last = cursor;
            }
            DragState::Rotate { pivot, last_angle, .. } => {
                let angle = angle_to(*pivot, cursor);
                line.rotate_about(*pivot, angle - *last_angle);
                *last_angle = angle;
            }
        }
    }
}

fn angle_to(pivot: Point, cursor: Point) -> f64 {
    (cursor - pivot).atan2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::LineKind;

    fn config() -> EditorConfig {
        EditorConfig::default()
    }

    fn elbow_line() -> Line {
        Line::from_points(
            &[Point::new(0.0, 100.0), Point::new(100.0, 0.0), Point::new(200.0, 100.0)],
            LineKind::Straight,
        )
        .unwrap()
    }

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_anchor_box() {
        let line = elbow_line();
        let anchor = anchor_box(&line);
        assert!((anchor.min_y - 0.0).abs() < f64::EPSILON);
        assert!((anchor.mid_x - 100.0).abs() < f64::EPSILON);
        assert_eq!(move_handle_position(&line, &config()), Point::new(75.0, -40.0));
        assert_eq!(rotate_handle_position(&line, &config()), Point::new(125.0, -40.0));
    }

    #[test]
    fn test_anchor_box_follows_edits() {
        let mut line = elbow_line();
        line.translate(Vec2::new(10.0, -5.0));
        let anchor = anchor_box(&line);
        assert!((anchor.min_y + 5.0).abs() < f64::EPSILON);
        assert!((anchor.mid_x - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_handles_unlocked_and_locked() {
        let mut line = elbow_line();
        let handles = get_handles(&line, &config());
        assert_eq!(handles.len(), 6);
        assert_eq!(handles[1].kind, HandleKind::Point(LinePoint::Elbow(0)));
        assert_eq!(handles[5].kind, HandleKind::DeleteElbow(0));
        assert_eq!(handles[5].position, Point::new(120.0, -20.0));

        line.locked = true;
        let handles = get_handles(&line, &config());
        assert_eq!(handles.len(), 3);
        assert!(handles.iter().all(|h| matches!(h.kind, HandleKind::Point(_))));
    }

    #[test]
    fn test_handle_hit_test_is_strict() {
        let handle = Handle::new(Point::new(0.0, 0.0), HandleKind::Move);
        assert!(handle.hit_test(Point::new(14.9, 0.0), 15.0));
        assert!(!handle.hit_test(Point::new(15.0, 0.0), 15.0));
    }

    #[test]
    fn test_precedence_delete_button_first() {
        let line = elbow_line();
        let cfg = config();
        assert_eq!(
            hit_test_handles(&line, Point::new(120.0, -20.0), false, &cfg),
            Some(HandleKind::DeleteElbow(0))
        );
    }

    #[test]
    fn test_ctrl_click_deletes_elbow() {
        let line = elbow_line();
        let cfg = config();
        let near_elbow = Point::new(105.0, 0.0);
        assert_eq!(
            hit_test_handles(&line, near_elbow, false, &cfg),
            Some(HandleKind::Point(LinePoint::Elbow(0)))
        );
        assert_eq!(hit_test_handles(&line, near_elbow, true, &cfg), Some(HandleKind::DeleteElbow(0)));
    }

    #[test]
    fn test_grab_order_prefers_terminals() {
        let line = Line::from_points(
            &[Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(10.0, 0.0)],
            LineKind::Straight,
        )
        .unwrap();
        let hit = hit_test_handles(&line, Point::new(5.0, 0.0), false, &config());
        assert_eq!(hit, Some(HandleKind::Point(LinePoint::Start)));
    }

    #[test]
    fn test_move_and_rotate_handles() {
        let line = Line::new(Point::new(0.0, 100.0), Point::new(200.0, 100.0), LineKind::Straight);
        let cfg = config();
        assert_eq!(hit_test_handles(&line, Point::new(75.0, 60.0), false, &cfg), Some(HandleKind::Move));
        assert_eq!(hit_test_handles(&line, Point::new(125.0, 60.0), false, &cfg), Some(HandleKind::Rotate));
        assert_eq!(hit_test_handles(&line, Point::new(100.0, 200.0), false, &cfg), None);
    }

    #[test]
    fn test_locked_line_has_no_pressable_handles() {
        let mut line = elbow_line();
        line.locked = true;
        let cfg = config();
        for p in [Point::new(0.0, 100.0), Point::new(120.0, -20.0), Point::new(75.0, -40.0)] {
            assert_eq!(hit_test_handles(&line, p, true, &cfg), None);
        }
        assert!(over_affordance(&line, Point::new(120.0, -20.0), &cfg));
        assert!(!over_affordance(&line, Point::new(75.0, -40.0), &cfg));
    }

    #[test]
    fn test_point_drag_sets_position() {
        let mut line = elbow_line();
        let mut drag = DragState::begin(&line, HandleKind::Point(LinePoint::Elbow(0)), Point::new(100.0, 0.0)).unwrap();
        drag.apply(&mut line, Point::new(130.0, 40.0));
        drag.apply(&mut line, Point::new(140.0, 50.0));
        assert_eq!(line.elbows[0], Point::new(140.0, 50.0));
        assert_eq!(line.start, Point::new(0.0, 100.0));
    }

    #[test]
    fn test_translate_is_incremental() {
        let mut line = elbow_line();
        let mut drag = DragState::begin(&line, HandleKind::Move, Point::new(75.0, -40.0)).unwrap();
        drag.apply(&mut line, Point::new(85.0, -40.0));
        drag.apply(&mut line, Point::new(85.0, -20.0));
        assert_eq!(line.start, Point::new(10.0, 120.0));
        assert_eq!(line.elbows[0], Point::new(110.0, 20.0));
        assert_eq!(line.end, Point::new(210.0, 120.0));
    }

    #[test]
    fn test_rotate_about_fixed_pivot() {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), LineKind::Straight);
        let mut drag = DragState::begin(&line, HandleKind::Rotate, Point::new(100.0, 0.0)).unwrap();
        // Quarter turn in two steps; pivot stays at (50, 0).
        drag.apply(&mut line, Point::new(100.0, 50.0));
        drag.apply(&mut line, Point::new(50.0, 50.0));
        assert_close(line.start, Point::new(50.0, -50.0));
        assert_close(line.end, Point::new(50.0, 50.0));
        if let DragState::Rotate { pivot, .. } = drag {
            assert_eq!(pivot, Point::new(50.0, 0.0));
        }
    }

    #[test]
    fn test_rotate_back_restores() {
        let original = elbow_line();
        let mut line = original.clone();
        let mut drag = DragState::begin(&line, HandleKind::Rotate, Point::new(200.0, 100.0)).unwrap();
        drag.apply(&mut line, Point::new(150.0, 200.0));
        drag.apply(&mut line, Point::new(200.0, 100.0));
        assert_close(line.start, original.start);
        assert_close(line.elbows[0], original.elbows[0]);
        assert_close(line.end, original.end);
    }

    #[test]
    fn test_delete_starts_no_drag() {
        let line = elbow_line();
        assert!(DragState::begin(&line, HandleKind::DeleteElbow(0), Point::ZERO).is_none());
        let drag = DragState::begin(&line, HandleKind::Move, Point::ZERO).unwrap();
        assert_eq!(drag.line_id(), line.id());
    }
}
