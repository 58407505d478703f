use shared::{
    ConnectionId,
    client_message::{ClientMessage, JoinRequest},
    server_event::ServerEvent,
    signal::SignalEnvelope,
};
use strum_macros::IntoStaticStr;

/// Inbound action from one connection, as seen by the session core.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Event {
    Join(JoinRequest),
    Signal(SignalEnvelope),
    ShareRequest { to: ConnectionId },
    ShareStarted { name: Option<String> },
    ShareStopped,
    DelRoom { role: Option<String> },
    Disconnect,
}

impl Event {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl From<ClientMessage> for Event {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::JoinRoom(request) => Event::Join(request),
            ClientMessage::Signal(envelope) => Event::Signal(envelope),
            ClientMessage::ShareRequest(request) => Event::ShareRequest { to: request.to },
            ClientMessage::ShareStarted(started) => Event::ShareStarted {
                name: started.and_then(|started| started.name),
            },
            ClientMessage::SenderShareStopped(_) => Event::ShareStopped,
            ClientMessage::DelRoom(del) => Event::DelRoom {
                role: del.and_then(|del| del.role),
            },
        }
    }
}

/// One outbound event addressed to one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub event: ServerEvent,
}

impl Delivery {
    pub fn new(to: &ConnectionId, event: ServerEvent) -> Self {
        Self {
            to: to.clone(),
            event,
        }
    }
}
