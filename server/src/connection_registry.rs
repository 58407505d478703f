use std::collections::HashMap;

use shared::{ConnectionId, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionRole {
    Unbound,
    Sender,
    Receiver,
}

impl From<Role> for ConnectionRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Sender => ConnectionRole::Sender,
            Role::Receiver => ConnectionRole::Receiver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub role: ConnectionRole,
    pub room_key: Option<String>,
}

impl Connection {
    fn unbound(id: ConnectionId) -> Self {
        Self {
            id,
            role: ConnectionRole::Unbound,
            room_key: None,
        }
    }
}

/// Role and room of every live connection.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ConnectionId) {
        self.connections
            .entry(id.clone())
            .or_insert_with(|| Connection::unbound(id));
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// Unknown connections read as unbound.
    pub fn role_of(&self, id: &ConnectionId) -> ConnectionRole {
        self.connections
            .get(id)
            .map_or(ConnectionRole::Unbound, |connection| connection.role)
    }

    /// Role and room key of a bound connection.
    pub fn binding(&self, id: &ConnectionId) -> Option<(ConnectionRole, &str)> {
        let connection = self.connections.get(id)?;
        let room_key = connection.room_key.as_deref()?;

        Some((connection.role, room_key))
    }

    pub fn bind(&mut self, id: &ConnectionId, role: Role, room_key: &str) {
        let connection = self
            .connections
            .entry(id.clone())
            .or_insert_with(|| Connection::unbound(id.clone()));

        connection.role = role.into();
        connection.room_key = Some(room_key.to_string());
    }

    pub fn unbind(&mut self, id: &ConnectionId) {
        if let Some(connection) = self.connections.get_mut(id) {
            connection.role = ConnectionRole::Unbound;
            connection.room_key = None;
        }
    }

    pub fn remove(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.remove(id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
