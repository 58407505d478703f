use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

use crate::{ConnectionId, signal::SignalEnvelope};

/// Everything the server pushes to a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ServerEvent {
    JoinAck(JoinAck),
    JoinedRoom(JoinedRoom),
    JoinComplete(JoinComplete),
    JoinError(String),
    SenderList(Vec<SenderInfo>),
    NewSender(SenderInfo),
    RemoveSender(ConnectionId),
    SenderDisconnected(SenderRef),
    SenderShareStarted(ShareNotice),
    SenderShareStopped(ShareNotice),
    ShareRequest(ShareRequestNotice),
    Signal(SignalEnvelope),
    RoomDeleted,
}

impl ServerEvent {
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

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SenderInfo {
    pub id: ConnectionId,
    pub name: String,
}

/// Authoritative answer to a `join-room` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JoinAck {
    pub fn accepted(name: Option<String>) -> Self {
        Self {
            success: true,
            name,
            message: None,
        }
    }

    pub fn rejected(message: String) -> Self {
        Self {
            success: false,
            name: None,
            message: Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedRoom {
    pub room: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinComplete {
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderRef {
    pub id: ConnectionId,
}

/// Share start/stop notice. Receivers in the field read either `senderId` or
/// `id`, so both carry the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareNotice {
    #[serde(rename = "senderId")]
    pub sender_id: ConnectionId,
    pub id: ConnectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ShareNotice {
    pub fn new(sender_id: ConnectionId, name: Option<String>) -> Self {
        Self {
            id: sender_id.clone(),
            sender_id,
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequestNotice {
    pub from: ConnectionId,
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn to_value(event: &ServerEvent) -> Value {
        serde_json::from_str(&event.to_json().unwrap()).unwrap()
    }

    #[test]
    fn room_deleted_has_no_data() {
        assert_eq!(to_value(&ServerEvent::RoomDeleted), json!({ "event": "room-deleted" }));
        assert_eq!(
            ServerEvent::from_json(r#"{"event":"room-deleted"}"#).unwrap(),
            ServerEvent::RoomDeleted
        );
    }

    #[test]
    fn rejected_ack_omits_name() {
        let event =
            ServerEvent::JoinAck(JoinAck::rejected("이미 사용 중인 이름입니다.".to_string()));

        assert_eq!(
            to_value(&event),
            json!({
                "event": "join-ack",
                "data": { "success": false, "message": "이미 사용 중인 이름입니다." }
            })
        );
    }

    #[test]
    fn share_notice_carries_both_id_spellings() {
        let event = ServerEvent::SenderShareStarted(ShareNotice::new(
            ConnectionId::from("A"),
            Some("Alice".to_string()),
        ));

        assert_eq!(
            to_value(&event),
            json!({
                "event": "sender-share-started",
                "data": { "senderId": "A", "id": "A", "name": "Alice" }
            })
        );
    }

    #[test]
    fn sender_list_and_remove_sender_shapes() {
        let list = ServerEvent::SenderList(vec![SenderInfo {
            id: ConnectionId::from("A"),
            name: "Alice".to_string(),
        }]);
        assert_eq!(
            to_value(&list),
            json!({ "event": "sender-list", "data": [{ "id": "A", "name": "Alice" }] })
        );

        let removed = ServerEvent::RemoveSender(ConnectionId::from("A"));
        assert_eq!(to_value(&removed), json!({ "event": "remove-sender", "data": "A" }));
        assert_eq!(removed.name(), "remove-sender");
    }
}
