//! Pointer events and cursor feedback.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Only the control key held.
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Pointer event in the host's coordinate space (before zoom adjustment).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    DoubleClick {
        position: Point,
    },
}

impl PointerEvent {
    /// Position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::DoubleClick { position } => position,
        }
    }
}

/// Cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorHint {
    /// Nothing under the pointer.
    #[default]
    Crosshair,
    /// Over an affordance of the unlocked active line.
    Pointer,
    /// Over a locked line or one of its affordances.
    NotAllowed,
    /// A drag is in progress.
    Grabbing,
    /// Over an unlocked line; the snap indicator replaces the cursor.
    Hidden,
}

impl CursorHint {
    /// CSS `cursor` value for this hint.
    pub fn css_name(self) -> &'static str {
        match self {
            CursorHint::Crosshair => "crosshair",
            CursorHint::Pointer => "pointer",
            CursorHint::NotAllowed => "not-allowed",
            CursorHint::Grabbing => "grabbing",
            CursorHint::Hidden => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_position() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(PointerEvent::Down { position: p, modifiers: Modifiers::ctrl() }.position(), p);
        assert_eq!(PointerEvent::DoubleClick { position: p }.position(), p);
    }

    #[test]
    fn test_cursor_css() {
        assert_eq!(CursorHint::default().css_name(), "crosshair");
        assert_eq!(CursorHint::Hidden.css_name(), "none");
        assert_eq!(serde_json::to_string(&CursorHint::NotAllowed).unwrap(), "\"not-allowed\"");
    }

    #[test]
    fn test_down_without_modifiers_deserializes() {
        let event: PointerEvent = serde_json::from_str(r#"{"Down":{"position":{"x":1.0,"y":2.0}}}"#).unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                position: Point::new(1.0, 2.0),
                modifiers: Modifiers::default()
            }
        );
    }
}
