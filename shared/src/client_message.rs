use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

use crate::{ConnectionId, signal::SignalEnvelope};

/// Everything a browser (or the terminal client) may send to the server.
///
/// Frames look like `{"event": "join-room", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom(JoinRequest),
    Signal(SignalEnvelope),
    ShareRequest(ShareRequest),
    #[serde(alias = "sender-share-started")]
    ShareStarted(Option<ShareStarted>),
    #[serde(alias = "share-stopped")]
    SenderShareStopped(Option<ShareStopped>),
    DelRoom(Option<DelRoom>),
}

impl ClientMessage {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Fields are optional on the wire so that a missing role or password can be
/// answered with a join error instead of a dropped frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, alias = "senderName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl JoinRequest {
    pub fn new(role: &str, password: &str, name: Option<&str>) -> Self {
        Self {
            role: Some(role.to_string()),
            password: Some(password.to_string()),
            name: name.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub to: ConnectionId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareStarted {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareStopped {
    #[serde(default, rename = "senderId", skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<ConnectionId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelRoom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
