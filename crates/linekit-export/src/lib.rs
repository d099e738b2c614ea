//! linekit Export Library
//!
//! Turns lines into an SVG data URI and hands it to the host page as an
//! `ADD_OBJECT` message.

pub mod message;
pub mod sink;
pub mod svg;

pub use message::{AddObjectPayload, IframeMessage, IframeMessageType, ObjectType};
pub use sink::{MemorySink, MessageSink, SinkError, SinkResult};
pub use svg::{SVG_DATA_URI_PREFIX, generate_base64_svg, generate_svg};

#[cfg(target_arch = "wasm32")]
pub use sink::ParentWindowSink;

use chrono::{SecondsFormat, Utc};
use kurbo::Size;
use linekit_core::shapes::Line;
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Name given to exported drawings unless overridden.
pub const DEFAULT_EXPORT_NAME: &str = "Bezier Drawing";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    NothingToExport,
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: f64, height: f64 },
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Options for [`export_to_project`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Name recorded in the metadata.
    pub name: String,
    /// Object the host should create.
    pub object_type: ObjectType,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_EXPORT_NAME.to_string(),
            object_type: ObjectType::Stickerbox,
        }
    }
}

/// Build the `ADD_OBJECT` message for `lines` on a canvas of `canvas_size`.
pub fn build_message(canvas_size: Size, lines: &[Line], options: &ExportOptions) -> ExportResult<IframeMessage> {
    if lines.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let (width, height) = (canvas_size.width, canvas_size.height);
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ExportError::InvalidCanvasSize { width, height });
    }

    let mut meta = Map::new();
    meta.insert("width".to_string(), json!(width));
    meta.insert("height".to_string(), json!(height));
    meta.insert("name".to_string(), Value::String(options.name.clone()));
    meta.insert(
        "createdAt".to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    Ok(IframeMessage::add_object(AddObjectPayload {
        data_string: generate_base64_svg(canvas_size, lines),
        object_type: options.object_type,
        meta_data: Some(meta),
    }))
}

/// Export `lines` as an SVG object and post it to `sink`.
///
/// Returns the message that was posted.
pub fn export_to_project(
    canvas_size: Size,
    lines: &[Line],
    sink: &dyn MessageSink,
    options: &ExportOptions,
) -> ExportResult<IframeMessage> {
    let message = build_message(canvas_size, lines, options).inspect_err(|e| {
        log::warn!("export skipped: {}", e);
    })?;
    sink.post(&message).inspect_err(|e| {
        log::warn!("export failed: {}", e);
    })?;
    log::info!(
        "exported {} line(s) as {}x{} {}",
        lines.len(),
        canvas_size.width,
        canvas_size.height,
        options.name
    );
    Ok(message)
}
