//! Frame definitions for the persistent transport.
//!
//! One JSON object per frame, discriminated by a `type` field. The unions
//! are internally tagged so each message kind is an exhaustive variant
//! instead of an untyped map; unrecognized inbound kinds collapse into
//! [`ServerFrame::Unknown`] and are ignored by the router rather than
//! treated as fatal.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

/// One named piece of synchronized state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    pub id: String,
    pub value: Value,
}

impl StateEntry {
    pub fn new(id: impl Into<String>, value: Value) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// One element replacement inside a batched `domUpdate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomReplacement {
    pub id: String,
    pub html: String,
}

/// Facts about a forwarded DOM event, assembled by the runtime when a
/// handler-bound element fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub handler: String,
    pub context_id: String,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_code: Option<u32>,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub shift_key: bool,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub meta_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_y: Option<i32>,
    /// Serialized form fields, present only for form submissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<Value>,
}

/// Frames sent from the client runtime to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientFrame {
    /// Sent once per connection, as soon as the transport opens, when the
    /// hydrated context id is known.
    #[serde(rename_all = "camelCase")]
    Init { context_id: String },

    /// A forwarded DOM event.
    Event(EventPayload),

    /// An optimistic local state write.
    #[serde(rename_all = "camelCase")]
    SetState { state_id: String, value: Value },

    /// Keep-alive.
    Ping,
}

impl ClientFrame {
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}

/// Frames pushed from the server to the client runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerFrame {
    /// Acknowledges the connection and assigns a per-connection session id.
    #[serde(rename_all = "camelCase")]
    Connected { session_id: String },

    /// Authoritative state writes, applied in order.
    StateUpdate { states: Vec<StateEntry> },

    /// Whole-subtree markup replacement. Two accepted shapes: a batch of
    /// `{id, html}` pairs, or a single `{html, targetId?}`. The batch shape
    /// wins when both are present; see [`DomPatch::resolve`].
    #[serde(rename_all = "camelCase")]
    DomUpdate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        updates: Option<Vec<DomReplacement>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        html: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_id: Option<String>,
    },

    /// Server-side failure report. Diagnostic only.
    Error { message: String },

    /// Any unrecognized `type`. Ignored, for forward compatibility.
    #[serde(other)]
    Unknown,
}

impl ServerFrame {
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(raw).map_err(ProtocolError::Decode)
    }
}

/// A `domUpdate` with its two wire shapes resolved into one instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DomPatch {
    /// Replace the outer markup of each named element.
    Batch(Vec<DomReplacement>),
    /// Replace one named element, or the whole body when no target is named.
    Subtree {
        html: String,
        target_id: Option<String>,
    },
}

impl DomPatch {
    /// Resolve the raw `domUpdate` fields, batch shape taking precedence.
    pub fn resolve(
        updates: Option<Vec<DomReplacement>>,
        html: Option<String>,
        target_id: Option<String>,
    ) -> Option<Self> {
        if let Some(updates) = updates {
            return Some(DomPatch::Batch(updates));
        }
        html.map(|html| DomPatch::Subtree { html, target_id })
    }
}
