use log::debug;
use shared::{ConnectionId, server_event::ServerEvent, signal::SignalEnvelope};

use crate::{
    connection_registry::{ConnectionRegistry, ConnectionRole},
    event::Delivery,
    room_registry::RoomRegistry,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    pub relayed: u64,
    pub dropped: u64,
}

/// Routes offer/answer/candidate envelopes between senders and their receiver.
///
/// A sender always talks to its room's current receiver, whatever `to` it
/// supplied. A receiver must name a sender of its own room. Anything else is
/// dropped without telling the client.
#[derive(Debug, Default)]
pub struct SignalRelay {
    stats: RelayStats,
}

impl SignalRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> RelayStats {
        self.stats
    }

    pub fn relay(
        &mut self,
        rooms: &RoomRegistry,
        connections: &ConnectionRegistry,
        from: &ConnectionId,
        mut envelope: SignalEnvelope,
    ) -> Option<Delivery> {
        let destination = match Self::resolve_destination(rooms, connections, from, &envelope) {
            Ok(destination) => destination,
            Err(reason) => {
                self.stats.dropped += 1;
                debug!("Dropping {} from {}: {}", envelope.kind, from, reason);
                return None;
            }
        };

        envelope.from = Some(from.clone());
        envelope.to = Some(destination.clone());

        self.stats.relayed += 1;
        debug!("Relaying {} from {} to {}", envelope.kind, from, destination);

        Some(Delivery {
            to: destination,
            event: ServerEvent::Signal(envelope),
        })
    }

    fn resolve_destination(
        rooms: &RoomRegistry,
        connections: &ConnectionRegistry,
        from: &ConnectionId,
        envelope: &SignalEnvelope,
    ) -> Result<ConnectionId, &'static str> {
        let (role, room_key) = connections
            .binding(from)
            .ok_or("connection has not joined a room")?;

        let room = rooms.get(room_key).ok_or("room no longer exists")?;

        match role {
            ConnectionRole::Sender => room.receiver().cloned().ok_or("room has no receiver"),
            ConnectionRole::Receiver => {
                if !room.is_receiver(from) {
                    return Err("connection is no longer the room's receiver");
                }

                match &envelope.to {
                    Some(to) if room.has_sender(to) => Ok(to.clone()),
                    Some(_) => Err("target is not a sender in this room"),
                    None => Err("receiver signal without target"),
                }
            }
            ConnectionRole::Unbound => Err("connection is unbound"),
        }
    }
}
