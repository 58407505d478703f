use std::collections::HashMap;

use crate::room::Room;

/// All live rooms, keyed by their password.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, key: &str) -> &mut Room {
        self.rooms
            .entry(key.to_string())
            .or_insert_with(|| Room::new(key))
    }

    pub fn get(&self, key: &str) -> Option<&Room> {
        self.rooms.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Room> {
        self.rooms.get_mut(key)
    }

    pub fn delete(&mut self, key: &str) -> Option<Room> {
        self.rooms.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rooms.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use shared::ConnectionId;

    use super::*;

    #[test]
    fn get_or_create_is_lazy_and_idempotent() {
        let mut registry = RoomRegistry::new();
        assert!(registry.get("1234").is_none());

        registry
            .get_or_create("1234")
            .bind_receiver(ConnectionId::from("R"));
        registry.get_or_create("1234");

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("1234").and_then(|room| room.receiver()),
            Some(&ConnectionId::from("R"))
        );
    }

    #[test]
    fn delete_removes_room() {
        let mut registry = RoomRegistry::new();
        registry.get_or_create("1234");

        assert_eq!(
            registry.delete("1234").map(|room| room.key().to_string()),
            Some("1234".to_string())
        );
        assert!(!registry.contains("1234"));
        assert!(registry.delete("1234").is_none());
        assert!(registry.is_empty());
    }
}
