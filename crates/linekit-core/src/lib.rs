//! linekit Core Library
//!
//! Platform-agnostic geometry, hit testing and editor state for the linekit
//! connector editor: straight, step and curve lines with draggable points,
//! elbows, move and rotate handles, snapping and zoom.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod geometry;
pub mod input;
pub mod path;
pub mod selection;
pub mod shapes;
pub mod snap;

pub use camera::Camera;
pub use canvas::{Canvas, LineDocument, RedrawRequest, StyleUpdate};
pub use config::{ConfigError, EditorConfig};
pub use input::{CursorHint, Modifiers, PointerEvent};
pub use path::{path_data, path_for};
pub use selection::{AnchorBox, DragState, Handle, HandleKind, anchor_box};
pub use shapes::{Line, LineId, LineKind, LinePoint, MAX_LINE_ID, StrokeStyle};
pub use snap::closest_point_on_line;
