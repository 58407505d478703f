use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, IntoStaticStr};

use crate::ConnectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

/// WebRTC negotiation message relayed between a sender and its receiver.
///
/// `payload` is an SDP description or ICE candidate produced by the browser and
/// is never inspected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<ConnectionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ConnectionId>,
    #[serde(rename = "type")]
    pub kind: SignalKind,
    #[serde(default)]
    pub payload: Value,
}

impl SignalEnvelope {
    pub fn new(kind: SignalKind, payload: Value) -> Self {
        Self {
            to: None,
            from: None,
            kind,
            payload,
        }
    }

    pub fn to(mut self, to: ConnectionId) -> Self {
        self.to = Some(to);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_browser_candidate() {
        let envelope: SignalEnvelope = serde_json::from_value(json!({
            "to": "R",
            "from": "spoofed",
            "type": "candidate",
            "payload": {
                "candidate": "candidate:1 1 udp 2122260223 10.0.0.2 54321 typ host",
                "sdpMid": "0"
            }
        }))
        .unwrap();

        assert_eq!(envelope.kind, SignalKind::Candidate);
        assert_eq!(envelope.to, Some(ConnectionId::from("R")));
        assert_eq!(envelope.payload["sdpMid"], "0");
    }

    #[test]
    fn rejects_unknown_kind() {
        let result = serde_json::from_value::<SignalEnvelope>(json!({ "type": "bye" }));
        assert!(result.is_err());
    }
}
