use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public projection of a client, safe to send to other clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub id: String,
    pub name: String,
}

impl MemberView {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Client -> Server messages, tagged by their `type` field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    /// Claim or reclaim an identity
    Register {
        id: String,
        name: String,
        token: String,
    },
    /// Liveness response to a `ping`
    Pong { token: String, ping_id: String },
    /// Any `type` we don't recognise; accepted and ignored
    #[serde(other)]
    Unknown,
}

/// Server -> Client messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    Registered {
        id: String,
    },
    RegistrationRejected {
        id: String,
        reason: String,
    },
    /// Sent to the client that just joined a room
    Joined {
        room: String,
        members: Vec<MemberView>,
    },
    /// Sent to the existing members whenever membership changes
    MemberUpdate {
        room: String,
        members: Vec<MemberView>,
    },
    /// Directory listing of every registered client
    Clients {
        clients: Vec<MemberView>,
    },
    Ping {
        id: String,
    },
}

impl OutboundMessage {
    /// Wire name of the message, matching the serialized `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::Registered { .. } => "registered",
            OutboundMessage::RegistrationRejected { .. } => "registration-rejected",
            OutboundMessage::Joined { .. } => "joined",
            OutboundMessage::MemberUpdate { .. } => "member-update",
            OutboundMessage::Clients { .. } => "clients",
            OutboundMessage::Ping { .. } => "ping",
        }
    }
}

/// Inbound payload that could not be decoded into an [`InboundMessage`]
#[derive(Debug, Error)]
#[error("malformed inbound message: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Decodes a raw text frame into a typed inbound message
pub fn decode_inbound(payload: &str) -> Result<InboundMessage, DecodeError> {
    Ok(serde_json::from_str(payload)?)
}
