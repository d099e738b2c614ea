//! Messages posted to the host page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message types understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IframeMessageType {
    #[serde(rename = "ADD_OBJECT")]
    AddObject,
}

/// Kind of object the host creates from an `ADD_OBJECT` payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Imagebox,
    #[default]
    Stickerbox,
    Textbox,
    Svg,
}

/// Payload of an `ADD_OBJECT` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddObjectPayload {
    /// Data URI of the object's content.
    pub data_string: String,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<Map<String, Value>>,
}

/// A message for the host window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IframeMessage {
    #[serde(rename = "type")]
    pub message_type: IframeMessageType,
    pub payload: AddObjectPayload,
}

impl IframeMessage {
    /// Build an `ADD_OBJECT` message.
    pub fn add_object(payload: AddObjectPayload) -> Self {
        Self {
            message_type: IframeMessageType::AddObject,
            payload,
        }
    }
}
