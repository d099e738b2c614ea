//! Posts host messages to the parent browser window.

use super::{MessageSink, SinkError, SinkResult};
use crate::message::IframeMessage;
use serde::Serialize;
use wasm_bindgen::JsValue;

/// Sends messages to `window.parent` with `postMessage`.
pub struct ParentWindowSink {
    target_origin: String,
}

impl Default for ParentWindowSink {
    fn default() -> Self {
        Self::new("*")
    }
}

impl ParentWindowSink {
    /// Create a sink posting to the given target origin.
    pub fn new(target_origin: impl Into<String>) -> Self {
        Self {
            target_origin: target_origin.into(),
        }
    }
}

impl MessageSink for ParentWindowSink {
    fn post(&self, message: &IframeMessage) -> SinkResult<()> {
        let window = web_sys::window().ok_or(SinkError::NoWindow)?;
        let parent = window.parent().map_err(js_error)?.ok_or(SinkError::NoWindow)?;

        let value = message
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| SinkError::Serialization(e.to_string()))?;

        parent.post_message(&value, &self.target_origin).map_err(js_error)
    }
}

fn js_error(e: JsValue) -> SinkError {
    SinkError::Post(format!("{:?}", e))
}
