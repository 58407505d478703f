use std::collections::HashMap;

use shared::{ConnectionId, server_event::SenderInfo};

/// A password-keyed session: at most one receiver and any number of uniquely
/// named senders.
#[derive(Debug, Clone)]
pub struct Room {
    key: String,
    receiver: Option<ConnectionId>,
    senders: HashMap<ConnectionId, SenderInfo>,
}

impl Room {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            receiver: None,
            senders: HashMap::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn receiver(&self) -> Option<&ConnectionId> {
        self.receiver.as_ref()
    }

    pub fn is_receiver(&self, id: &ConnectionId) -> bool {
        self.receiver.as_ref() == Some(id)
    }

    /// Latest receiver wins. Returns whoever held the slot before.
    pub fn bind_receiver(&mut self, id: ConnectionId) -> Option<ConnectionId> {
        self.receiver.replace(id)
    }

    pub fn sender(&self, id: &ConnectionId) -> Option<&SenderInfo> {
        self.senders.get(id)
    }

    pub fn has_sender(&self, id: &ConnectionId) -> bool {
        self.senders.contains_key(id)
    }

    pub fn has_sender_named(&self, name: &str) -> bool {
        self.senders.values().any(|sender| sender.name == name)
    }

    pub fn add_sender(&mut self, sender: SenderInfo) {
        self.senders.insert(sender.id.clone(), sender);
    }

    pub fn remove_sender(&mut self, id: &ConnectionId) -> Option<SenderInfo> {
        self.senders.remove(id)
    }

    pub fn sender_ids(&self) -> Vec<ConnectionId> {
        self.senders.keys().cloned().collect()
    }

    /// Snapshot of the senders, sorted by name so repeated broadcasts read the same.
    pub fn sender_list(&self) -> Vec<SenderInfo> {
        let mut senders: Vec<SenderInfo> = self.senders.values().cloned().collect();
        senders.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        senders
    }

    pub fn sender_count(&self) -> usize {
        self.senders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender(id: &str, name: &str) -> SenderInfo {
        SenderInfo {
            id: ConnectionId::from(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn receiver_slot_is_replaced_not_duplicated() {
        let mut room = Room::new("1234");

        assert_eq!(room.bind_receiver(ConnectionId::from("R1")), None);
        assert_eq!(
            room.bind_receiver(ConnectionId::from("R2")),
            Some(ConnectionId::from("R1"))
        );
        assert!(room.is_receiver(&ConnectionId::from("R2")));
        assert!(!room.is_receiver(&ConnectionId::from("R1")));
    }

    #[test]
    fn sender_names_are_matched_exactly() {
        let mut room = Room::new("1234");
        room.add_sender(sender("A", "Alice"));

        assert!(room.has_sender_named("Alice"));
        assert!(!room.has_sender_named("alice"));
        assert!(room.has_sender(&ConnectionId::from("A")));
    }

    #[test]
    fn sender_list_is_sorted_by_name() {
        let mut room = Room::new("1234");
        room.add_sender(sender("B", "Bob"));
        room.add_sender(sender("A", "Alice"));

        let names: Vec<String> = room.sender_list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);

        assert_eq!(room.remove_sender(&ConnectionId::from("B")), Some(sender("B", "Bob")));
        assert_eq!(room.sender_count(), 1);
    }
}
