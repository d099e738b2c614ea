//! Line document and editor state management.

use crate::camera::Camera;
use crate::config::{ConfigResult, EditorConfig};
use crate::geometry::nearest_segment;
use crate::input::{CursorHint, Modifiers, PointerEvent};
use crate::selection::{DragState, Handle, HandleKind, get_handles, hit_test_handles, over_affordance};
use crate::shapes::{Line, LineId, LineKind, StrokeStyle, is_valid_line_id, observe_line_id};
use crate::snap::closest_point_on_line;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The ordered line collection. Later lines are drawn on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineDocument {
    lines: Vec<Line>,
}

impl LineDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line on top of the others.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Remove a line from the document.
    pub fn remove_line(&mut self, id: LineId) -> Option<Line> {
        let index = self.lines.iter().position(|l| l.id() == id)?;
        Some(self.lines.remove(index))
    }

    /// Get a line by ID.
    pub fn get_line(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|l| l.id() == id)
    }

    /// Get a mutable reference to a line by ID.
    pub fn get_line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines.iter_mut().find(|l| l.id() == id)
    }

    /// Lines back to front.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Topmost line whose hit stroke contains `point`.
    pub fn line_at(&self, point: Point, hit_width: f64) -> Option<&Line> {
        self.lines.iter().rev().find(|l| l.hit_test(point, hit_width))
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    ///
    /// Lines repeating an earlier id are dropped. Lines with an id above
    /// [`crate::shapes::MAX_LINE_ID`] get a fresh id.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut doc: Self = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        doc.lines.retain(|l| {
            let fresh = seen.insert(l.id());
            if !fresh {
                log::warn!("dropping line with duplicate id {}", l.id());
            }
            fresh
        });
        for line in &doc.lines {
            observe_line_id(line.id());
        }
        for line in doc.lines.iter_mut().filter(|l| !is_valid_line_id(l.id())) {
            let old = line.id();
            line.rekey();
            log::warn!("line id {} out of range, re-keyed to {}", old, line.id());
        }
        Ok(doc)
    }
}

/// Style edits for the active line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleUpdate {
    pub color: Option<String>,
    pub width: Option<f64>,
    /// Flip `locked` before anything else is applied.
    pub toggle_lock: bool,
    pub stroke_style: Option<StrokeStyle>,
}

/// Single-slot redraw flag. Any number of requests between two takes
/// collapse into one redraw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawRequest {
    pending: bool,
}

impl RedrawRequest {
    pub fn request(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending request.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Editor state: the document plus selection, hover, drag and zoom.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The lines being edited.
    pub document: LineDocument,
    /// Zoom transform for pointer input and rendering.
    pub camera: Camera,
    config: EditorConfig,
    active: Option<LineId>,
    hovered: Option<LineId>,
    drag: Option<DragState>,
    preview: Option<Point>,
    cursor: CursorHint,
    redraw: RedrawRequest,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create a new canvas from a configuration that has been validated.
    ///
    /// Configs from [`EditorConfig::from_json`] or [`EditorConfig::default`]
    /// qualify. Use [`Canvas::try_with_config`] for anything built by hand.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: LineDocument::new(),
            camera: Camera::with_bounds(config.min_zoom, config.max_zoom),
            config,
            active: None,
            hovered: None,
            drag: None,
            preview: None,
            cursor: CursorHint::default(),
            redraw: RedrawRequest::default(),
        }
    }

    /// Validate `config`, then create a canvas with it.
    pub fn try_with_config(config: EditorConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Create a canvas editing an existing document.
    pub fn with_document(document: LineDocument) -> Self {
        Self {
            document,
            ..Self::new()
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Update the canvas size and its offset in pointer coordinates.
    pub fn set_viewport(&mut self, size: Size, origin: Vec2) {
        self.camera.viewport = size;
        self.camera.origin = origin;
        self.redraw.request();
    }

    pub fn active_id(&self) -> Option<LineId> {
        self.active
    }

    pub fn active_line(&self) -> Option<&Line> {
        self.active.and_then(|id| self.document.get_line(id))
    }

    pub fn hovered_id(&self) -> Option<LineId> {
        self.hovered
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Raw snap preview from the last pointer move.
    pub fn preview(&self) -> Option<Point> {
        self.preview
    }

    /// Cursor computed by the last pointer event.
    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Returns true once per batch of state changes.
    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    /// Select a line, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<LineId>) {
        if self.active != id {
            log::debug!("active line {:?} -> {:?}", self.active, id);
            self.active = id;
        }
        self.redraw.request();
    }

    /// Add a line of `kind` centred in a viewport of the given size.
    ///
    /// The new line becomes active.
    pub fn add_line(&mut self, kind: LineKind, viewport: Size) -> LineId {
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        let mut line = Line::seeded(kind, center);
        line.color = self.config.default_color.clone();
        line.width = self.config.default_width;
        let id = line.id();
        log::debug!("added {} line {}", kind.name(), id);
        self.document.add_line(line);
        self.select(Some(id));
        id
    }

    /// Delete the active line. No-op without one.
    pub fn delete_active(&mut self) -> Option<Line> {
        let id = self.active.take()?;
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.drag.is_some_and(|d| d.line_id() == id) {
            self.drag = None;
        }
        let removed = self.document.remove_line(id);
        if removed.is_some() {
            log::debug!("deleted line {}", id);
        }
        self.redraw.request();
        removed
    }

    /// Apply a style update to the active line.
    ///
    /// The lock toggle goes first; the remaining fields only apply if the
    /// line is unlocked afterwards. Returns true if anything changed.
    pub fn update_active_line(&mut self, update: StyleUpdate) -> bool {
        let min_width = self.config.min_stroke_width;
        let Some(line) = self.active.and_then(|id| self.document.get_line_mut(id)) else {
            return false;
        };

        let mut changed = false;
        if update.toggle_lock {
            line.locked = !line.locked;
            log::debug!("line {} locked = {}", line.id(), line.locked);
            changed = true;
        }

        let wants_style = update.color.is_some() || update.width.is_some() || update.stroke_style.is_some();
        if line.locked {
            if wants_style {
                log::warn!("style change rejected: line {} is locked", line.id());
            }
        } else {
            if let Some(color) = update.color {
                line.color = color;
                changed = true;
            }
            if let Some(width) = update.width {
                line.width = width.max(min_width);
                changed = true;
            }
            if let Some(style) = update.stroke_style {
                line.stroke_style = style;
                changed = true;
            }
        }

        if changed {
            self.redraw.request();
        }
        changed
    }

    /// Flip the active line between curve and straight (step becomes curve).
    pub fn toggle_active_kind(&mut self) -> bool {
        let Some(line) = self.active.and_then(|id| self.document.get_line_mut(id)) else {
            return false;
        };
        if line.locked {
            log::warn!("kind change rejected: line {} is locked", line.id());
            return false;
        }
        line.kind = line.kind.toggled();
        log::debug!("line {} is now {}", line.id(), line.kind.name());
        self.redraw.request();
        true
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, modifiers } => self.pointer_down(position, modifiers),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::DoubleClick { position } => {
                self.double_click(position);
            }
        }
    }

    /// Pointer press: elbow delete, drag start, or selection, in that order.
    pub fn pointer_down(&mut self, screen: Point, modifiers: Modifiers) {
        let point = self.camera.screen_to_world(screen);

        if let Some(id) = self.active {
            let pressed = self.document.get_line(id).and_then(|line| {
                hit_test_handles(line, point, modifiers.ctrl, &self.config)
                    .map(|handle| (handle, DragState::begin(line, handle, point)))
            });
            match pressed {
                Some((HandleKind::DeleteElbow(i), _)) => {
                    if let Some(line) = self.document.get_line_mut(id) {
                        line.remove_elbow(i);
                        log::debug!("removed elbow {} from line {}", i, id);
                    }
                    self.redraw.request();
                    return;
                }
                Some((_, Some(drag))) => {
                    log::debug!("drag start {:?}", drag);
                    self.drag = Some(drag);
                    return;
                }
                _ => {}
            }
        }

        // Selection is always allowed so a locked line can be picked and unlocked.
        let clicked = self.document.line_at(point, self.config.hit_width).map(Line::id);
        self.select(clicked);
    }

    /// Pointer motion: continue a drag, or update hover, cursor and preview.
    pub fn pointer_move(&mut self, screen: Point) {
        let point = self.camera.screen_to_world(screen);
        self.preview = None;

        if let Some(mut drag) = self.drag {
            match self.document.get_line_mut(drag.line_id()) {
                Some(line) if !line.locked => {
                    drag.apply(line, point);
                    self.drag = Some(drag);
                    self.cursor = CursorHint::Grabbing;
                    self.redraw.request();
                    return;
                }
                Some(line) => {
                    log::warn!("drag ended: line {} is locked", line.id());
                    self.drag = None;
                }
                None => self.drag = None,
            }
        }

        let over_ui = self.active_line().map(|line| (over_affordance(line, point, &self.config), line.locked));
        match over_ui {
            Some((true, locked)) => {
                self.cursor = if locked { CursorHint::NotAllowed } else { CursorHint::Pointer };
            }
            _ => match self.document.line_at(point, self.config.hit_width) {
                Some(line) => {
                    self.hovered = Some(line.id());
                    if line.locked {
                        self.cursor = CursorHint::NotAllowed;
                    } else {
                        self.preview = closest_point_on_line(point, line);
                        self.cursor = CursorHint::Hidden;
                    }
                }
                None => {
                    self.hovered = None;
                    self.cursor = CursorHint::Crosshair;
                }
            },
        }
        self.redraw.request();
    }

    /// Pointer release. Always ends any drag.
    pub fn pointer_up(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!("drag end on line {}", drag.line_id());
        }
    }

    /// Double click: insert an elbow on the active line at the snap point.
    ///
    /// Returns true if an elbow was inserted.
    pub fn double_click(&mut self, screen: Point) -> bool {
        let point = self.camera.screen_to_world(screen);
        let insert_radius = self.config.insert_radius;
        let Some(line) = self.active.and_then(|id| self.document.get_line_mut(id)) else {
            return false;
        };
        if line.locked {
            log::warn!("elbow insert rejected: line {} is locked", line.id());
            return false;
        }

        let Some(snap) = closest_point_on_line(point, line) else {
            return false;
        };
        let Some(index) = nearest_segment(point, &line.all_points(), insert_radius) else {
            return false;
        };
        line.insert_elbow(index, snap);
        log::debug!("inserted elbow {} on line {} at {:?}", index, line.id(), snap);
        self.redraw.request();
        true
    }

    /// Handles of the active line for the render sink.
    pub fn active_handles(&self) -> Vec<Handle> {
        self.active_line()
            .map(|line| get_handles(line, &self.config))
            .unwrap_or_default()
    }

    /// Snap preview to draw: only while hovering an unlocked line and not dragging.
    pub fn visible_preview(&self) -> Option<Point> {
        if self.drag.is_some() {
            return None;
        }
        let hovered = self.hovered.and_then(|id| self.document.get_line(id))?;
        if hovered.locked {
            return None;
        }
        self.preview
    }

    /// Step the zoom by `delta`.
    pub fn adjust_zoom(&mut self, delta: f64) -> bool {
        let changed = self.camera.adjust_zoom(delta);
        self.zoom_changed(changed)
    }

    /// Zoom in by one configured step.
    pub fn zoom_in(&mut self) -> bool {
        self.adjust_zoom(self.config.zoom_step)
    }

    /// Zoom out by one configured step.
    pub fn zoom_out(&mut self) -> bool {
        self.adjust_zoom(-self.config.zoom_step)
    }

    pub fn reset_zoom(&mut self) -> bool {
        let changed = self.camera.reset();
        self.zoom_changed(changed)
    }

    pub fn set_zoom_percent(&mut self, percent: f64) -> bool {
        let changed = self.camera.set_zoom_percent(percent);
        self.zoom_changed(changed)
    }

    /// Set the zoom from text typed into the zoom field.
    pub fn set_zoom_from_text(&mut self, text: &str) -> bool {
        let changed = self.camera.set_zoom_from_text(text);
        self.zoom_changed(changed)
    }

    fn zoom_changed(&mut self, changed: bool) -> bool {
        if changed {
            self.redraw.request();
        }
        changed
    }
}
