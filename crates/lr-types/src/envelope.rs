//! # Reply Envelope
//!
//! Typed wrapper for inter-contract replies.
//!
//! A cross-contract call yields a [`ReplyEnvelope`]: a status, an optional
//! message from the target, and a byte payload. On success the payload is
//! the target's serialized entity wrapped in the transport's own framing
//! ([`PayloadFrame`]). Callers strip the frame structurally with serde and
//! then apply the entity deserializer; the frame is never recovered by
//! scanning a stringified buffer.

use serde::{Deserialize, Serialize};

/// Outcome of an inter-contract invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyStatus {
    /// The target executed the operation.
    Ok,
    /// The target rejected or failed the operation.
    Error,
}

impl ReplyStatus {
    /// True for a successful reply.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Reply returned by the transport for one invocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    /// Invocation outcome.
    pub status: ReplyStatus,
    /// Target-supplied message, set on failure.
    pub message: Option<String>,
    /// Framed payload bytes; empty on failure.
    pub payload: Vec<u8>,
}

impl ReplyEnvelope {
    /// Successful reply wrapping framed payload bytes.
    pub fn ok(payload: Vec<u8>) -> Self {
        Self {
            status: ReplyStatus::Ok,
            message: None,
            payload,
        }
    }

    /// Failed reply carrying the target's message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Error,
            message: Some(message.into()),
            payload: Vec::new(),
        }
    }
}

/// Frame kind tag for raw entity bytes.
pub const FRAME_KIND_BYTES: &str = "bytes";

/// The transport's framing around a callee's serialized entity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PayloadFrame {
    /// Frame kind tag; [`FRAME_KIND_BYTES`] for entity payloads.
    #[serde(rename = "type")]
    pub kind: String,
    /// The inner serialized-entity bytes.
    pub data: Vec<u8>,
}

impl PayloadFrame {
    /// Wrap serialized entity bytes for transport.
    pub fn wrap(data: Vec<u8>) -> Self {
        Self {
            kind: FRAME_KIND_BYTES.to_string(),
            data,
        }
    }

    /// Encode the frame to its wire form.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a frame from its wire form.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// True when the frame carries raw entity bytes.
    pub fn is_bytes(&self) -> bool {
        self.kind == FRAME_KIND_BYTES
    }
}
