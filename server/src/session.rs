use std::str::FromStr;

use log::{debug, info};
use shared::{
    ConnectionId, Role,
    client_message::JoinRequest,
    default_sender_name,
    server_event::{
        JoinAck, JoinComplete, JoinedRoom, SenderInfo, SenderRef, ServerEvent, ShareRequestNotice,
    },
};

use crate::{
    connection_registry::{ConnectionRegistry, ConnectionRole},
    error::JoinError,
    event::{Delivery, Event},
    presence::PresenceBroadcaster,
    room_registry::RoomRegistry,
    signal_relay::{RelayStats, SignalRelay},
};

/// Owns every room and connection binding, and turns each inbound [`Event`]
/// into the deliveries it causes.
///
/// Nothing here performs I/O; the caller is expected to serialize calls (the
/// hub task does) and to push the returned deliveries to the connections.
#[derive(Debug, Default)]
pub struct SessionLifecycle {
    rooms: RoomRegistry,
    connections: ConnectionRegistry,
    relay: SignalRelay,
}

impl SessionLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn connections(&self) -> &ConnectionRegistry {
        &self.connections
    }

    pub fn relay_stats(&self) -> RelayStats {
        self.relay.stats()
    }

    pub fn connect(&mut self, id: ConnectionId) {
        self.connections.register(id);
    }

    pub fn handle(&mut self, from: &ConnectionId, event: Event) -> Vec<Delivery> {
        match event {
            Event::Join(request) => self.join(from, request),
            Event::Signal(envelope) => self
                .relay
                .relay(&self.rooms, &self.connections, from, envelope)
                .into_iter()
                .collect(),
            Event::ShareRequest { to } => vec![Delivery::new(
                &to,
                ServerEvent::ShareRequest(ShareRequestNotice { from: from.clone() }),
            )],
            Event::ShareStarted { name } => self.share_started(from, name.as_deref()),
            Event::ShareStopped => self.share_stopped(from),
            Event::DelRoom { role } => self.delete_room(from, role.as_deref()),
            Event::Disconnect => self.disconnect(from),
        }
    }

    pub fn join(&mut self, from: &ConnectionId, request: JoinRequest) -> Vec<Delivery> {
        let result = Self::validate(&request).and_then(|(role, key)| {
            if self.connections.role_of(from) != ConnectionRole::Unbound {
                return Err(JoinError::Validation("이미 방에 참여 중입니다.".to_string()));
            }

            match role {
                Role::Receiver => Ok(self.join_as_receiver(from, &key)),
                Role::Sender => self.join_as_sender(from, &key, request.name.as_deref()),
            }
        });

        match result {
            Ok(deliveries) => deliveries,
            Err(error) => {
                info!("Rejected join from {}: {}", from, error);

                let message = error.to_string();
                vec![
                    Delivery::new(from, ServerEvent::JoinAck(JoinAck::rejected(message.clone()))),
                    Delivery::new(from, ServerEvent::JoinError(message)),
                ]
            }
        }
    }

    fn validate(request: &JoinRequest) -> Result<(Role, String), JoinError> {
        let role = match request.role.as_deref() {
            None | Some("") => {
                return Err(JoinError::Validation("역할이 필요합니다.".to_string()));
            }
            Some(role) => Role::from_str(role).map_err(|_| {
                JoinError::Validation(format!("알 수 없는 역할입니다: {}", role))
            })?,
        };

        let key = match request.password.as_deref() {
            None | Some("") => {
                return Err(JoinError::Validation("비밀번호가 필요합니다.".to_string()));
            }
            Some(password) => password.to_string(),
        };

        Ok((role, key))
    }

    /// Latest receiver wins; the one it replaces is unbound without notice.
    pub fn join_as_receiver(&mut self, from: &ConnectionId, key: &str) -> Vec<Delivery> {
        let room = self.rooms.get_or_create(key);

        if let Some(previous) = room.bind_receiver(from.clone()) {
            if &previous != from {
                info!("Receiver {} replaced by {} in room '{}'", previous, from, key);
                self.connections.unbind(&previous);
            }
        }

        self.connections.bind(from, Role::Receiver, key);
        info!("{} joined room '{}' as receiver", from, key);

        let mut deliveries = vec![Delivery::new(
            from,
            ServerEvent::JoinAck(JoinAck::accepted(None)),
        )];
        deliveries.extend(self.rooms.get(key).and_then(PresenceBroadcaster::sender_list));

        deliveries
    }

    pub fn join_as_sender(
        &mut self,
        from: &ConnectionId,
        key: &str,
        name: Option<&str>,
    ) -> Result<Vec<Delivery>, JoinError> {
        let room = match self.rooms.get_mut(key) {
            Some(room) if room.receiver().is_some() => room,
            _ => return Err(JoinError::NotFound),
        };

        let assigned_name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_sender_name(from),
        };

        if room.has_sender_named(&assigned_name) {
            return Err(JoinError::Conflict);
        }

        let sender = SenderInfo {
            id: from.clone(),
            name: assigned_name.clone(),
        };
        room.add_sender(sender.clone());

        let mut deliveries = Vec::with_capacity(5);
        deliveries.extend(PresenceBroadcaster::sender_list(room));
        if let Some(receiver) = room.receiver() {
            deliveries.push(Delivery::new(receiver, ServerEvent::NewSender(sender)));
        }

        self.connections.bind(from, Role::Sender, key);
        info!("{} joined room '{}' as sender '{}'", from, key, assigned_name);

        deliveries.push(Delivery::new(
            from,
            ServerEvent::JoinAck(JoinAck::accepted(Some(assigned_name.clone()))),
        ));
        deliveries.push(Delivery::new(
            from,
            ServerEvent::JoinedRoom(JoinedRoom {
                room: key.to_string(),
                name: assigned_name.clone(),
            }),
        ));
        deliveries.push(Delivery::new(
            from,
            ServerEvent::JoinComplete(JoinComplete {
                password: key.to_string(),
                name: assigned_name,
            }),
        ));

        Ok(deliveries)
    }

    /// Only the room's current receiver may delete it.
    pub fn delete_room(&mut self, from: &ConnectionId, role: Option<&str>) -> Vec<Delivery> {
        if role.is_some_and(|role| role != "receiver") {
            debug!("Ignoring del-room from {} with role {:?}", from, role);
            return Vec::new();
        }

        let key = match self.connections.binding(from) {
            Some((ConnectionRole::Receiver, key)) => key.to_string(),
            _ => {
                debug!("Ignoring del-room from {}: not a receiver", from);
                return Vec::new();
            }
        };

        if !self.rooms.get(&key).is_some_and(|room| room.is_receiver(from)) {
            debug!("Ignoring del-room from {}: not the receiver of '{}'", from, key);
            return Vec::new();
        }

        self.destroy_room(&key)
    }

    pub fn disconnect(&mut self, from: &ConnectionId) -> Vec<Delivery> {
        let connection = match self.connections.remove(from) {
            Some(connection) => connection,
            None => return Vec::new(),
        };

        let key = match connection.room_key {
            Some(key) => key,
            None => return Vec::new(),
        };

        match connection.role {
            ConnectionRole::Sender => {
                let room = match self.rooms.get_mut(&key) {
                    Some(room) => room,
                    None => return Vec::new(),
                };

                if room.remove_sender(from).is_none() {
                    return Vec::new();
                }
                info!("Sender {} left room '{}'", from, key);

                let receiver = match room.receiver() {
                    Some(receiver) => receiver.clone(),
                    None => return Vec::new(),
                };

                let mut deliveries = vec![
                    Delivery::new(&receiver, ServerEvent::RemoveSender(from.clone())),
                    Delivery::new(
                        &receiver,
                        ServerEvent::SenderDisconnected(SenderRef { id: from.clone() }),
                    ),
                ];
                deliveries.extend(PresenceBroadcaster::sender_list(room));

                deliveries
            }
            ConnectionRole::Receiver => {
                if self.rooms.get(&key).is_some_and(|room| room.is_receiver(from)) {
                    self.destroy_room(&key)
                } else {
                    Vec::new()
                }
            }
            ConnectionRole::Unbound => Vec::new(),
        }
    }

    pub fn share_started(&self, from: &ConnectionId, name: Option<&str>) -> Vec<Delivery> {
        match self.sender_room(from) {
            Some(key) => self
                .rooms
                .get(key)
                .and_then(|room| PresenceBroadcaster::share_started(room, from, name))
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn share_stopped(&self, from: &ConnectionId) -> Vec<Delivery> {
        match self.sender_room(from) {
            Some(key) => self
                .rooms
                .get(key)
                .and_then(|room| PresenceBroadcaster::share_stopped(room, from))
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    }

    fn sender_room(&self, from: &ConnectionId) -> Option<&str> {
        match self.connections.binding(from) {
            Some((ConnectionRole::Sender, key)) => Some(key),
            _ => None,
        }
    }

    /// Tells every sender the room is gone, then forgets the room and unbinds
    /// all of its members.
    fn destroy_room(&mut self, key: &str) -> Vec<Delivery> {
        let room = match self.rooms.delete(key) {
            Some(room) => room,
            None => return Vec::new(),
        };

        let senders = room.sender_ids();
        let deliveries = senders
            .iter()
            .map(|sender| Delivery::new(sender, ServerEvent::RoomDeleted))
            .collect();

        for sender in &senders {
            self.connections.unbind(sender);
        }
        if let Some(receiver) = room.receiver() {
            self.connections.unbind(receiver);
        }

        info!("Room '{}' deleted ({} senders notified)", key, senders.len());

        deliveries
    }
}
