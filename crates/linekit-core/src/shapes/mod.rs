//! Line shape definitions for the editor.

mod line;

pub use line::{Line, LinePoint};

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for lines.
///
/// Ids are millisecond timestamps taken at creation time, bumped so that
/// they are strictly increasing within the process.
pub type LineId = u64;

/// Default stroke color for new lines.
pub const DEFAULT_COLOR: &str = "#A020F0";

/// Default stroke width for new lines.
pub const DEFAULT_WIDTH: f64 = 2.0;

/// How consecutive points of a line are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Straight segments between points.
    #[default]
    Straight,
    /// Right-angle connector: horizontal leg, then vertical leg.
    Step,
    /// One shallow cubic Bezier per pair of points.
    Curve,
}

impl LineKind {
    /// Kind reached by the toolbar's curve toggle.
    ///
    /// Curves flatten to straight lines; anything else becomes a curve.
    pub fn toggled(self) -> Self {
        match self {
            LineKind::Curve => LineKind::Straight,
            LineKind::Straight | LineKind::Step => LineKind::Curve,
        }
    }

    /// Name used in serialized documents.
    pub fn name(self) -> &'static str {
        match self {
            LineKind::Straight => "straight",
            LineKind::Step => "step",
            LineKind::Curve => "curve",
        }
    }
}

/// Dash pattern of a stroke. Affects rendering only, never geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// Cycle to the next stroke style.
    pub fn next(self) -> Self {
        match self {
            StrokeStyle::Solid => StrokeStyle::Dashed,
            StrokeStyle::Dashed => StrokeStyle::Dotted,
            StrokeStyle::Dotted => StrokeStyle::Solid,
        }
    }

    /// Dash lengths for a stroke of the given width, `None` for solid.
    ///
    /// Dashed strokes use equal dash and gap of three widths; dotted strokes
    /// use zero-length dashes (round caps make the dots) spaced 2.5 widths.
    pub fn dash_pattern(self, width: f64) -> Option<[f64; 2]> {
        match self {
            StrokeStyle::Solid => None,
            StrokeStyle::Dashed => Some([width * 3.0, width * 3.0]),
            StrokeStyle::Dotted => Some([0.0, width * 2.5]),
        }
    }
}

/// Largest id the generator hands out or accepts from outside.
///
/// Ids travel through JSON to a browser host, so they stay within the range
/// a JavaScript number holds exactly.
pub const MAX_LINE_ID: LineId = (1 << 53) - 1;

/// Last id handed out, used to keep ids unique within one millisecond.
static LAST_LINE_ID: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh line id from the wall clock.
pub fn next_line_id() -> LineId {
    let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
    let mut last = LAST_LINE_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last.saturating_add(1));
        match LAST_LINE_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

/// Whether `id` lies in the range the generator works in.
pub fn is_valid_line_id(id: LineId) -> bool {
    id <= MAX_LINE_ID
}

/// Record an id that came from outside (e.g. a loaded document) so fresh
/// ids are always greater than it.
///
/// Ids above [`MAX_LINE_ID`] are ignored; callers re-key such lines.
pub fn observe_line_id(id: LineId) {
    if is_valid_line_id(id) {
        LAST_LINE_ID.fetch_max(id, Ordering::Relaxed);
    }
}
