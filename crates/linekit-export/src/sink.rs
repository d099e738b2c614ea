//! Destinations for host messages.

use crate::message::IframeMessage;
use std::sync::RwLock;
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod parent_window;

#[cfg(target_arch = "wasm32")]
pub use parent_window::ParentWindowSink;

/// Sink errors.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("No host window available")]
    NoWindow,
    #[error("Post failed: {0}")]
    Post(String),
    #[error("Sink error: {0}")]
    Other(String),
}

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Something host messages can be posted to. Delivery is fire-and-forget.
///
/// Native sinks must be Send + Sync; the wasm32 trait drops those bounds.
#[cfg(not(target_arch = "wasm32"))]
pub trait MessageSink: Send + Sync {
    /// Post a message.
    fn post(&self, message: &IframeMessage) -> SinkResult<()>;
}

/// Something host messages can be posted to (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait MessageSink {
    /// Post a message.
    fn post(&self, message: &IframeMessage) -> SinkResult<()>;
}

/// Collects messages in memory, for tests and headless hosts.
#[derive(Default)]
pub struct MemorySink {
    messages: RwLock<Vec<IframeMessage>>,
}

impl MemorySink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages posted so far, oldest first.
    pub fn messages(&self) -> SinkResult<Vec<IframeMessage>> {
        let messages = self
            .messages
            .read()
            .map_err(|e| SinkError::Other(format!("Lock error: {}", e)))?;
        Ok(messages.clone())
    }
}

impl MessageSink for MemorySink {
    fn post(&self, message: &IframeMessage) -> SinkResult<()> {
        let mut messages = self
            .messages
            .write()
            .map_err(|e| SinkError::Other(format!("Lock error: {}", e)))?;
        messages.push(message.clone());
        Ok(())
    }
}
