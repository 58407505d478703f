use shared::{
    ConnectionId, default_sender_name,
    server_event::{ServerEvent, ShareNotice},
};

use crate::{event::Delivery, room::Room};

/// Builds the membership and share notices a room's receiver sees.
pub struct PresenceBroadcaster;

impl PresenceBroadcaster {
    /// Full sender list for the receiver, if one is bound.
    pub fn sender_list(room: &Room) -> Option<Delivery> {
        let receiver = room.receiver()?;

        Some(Delivery::new(
            receiver,
            ServerEvent::SenderList(room.sender_list()),
        ))
    }

    /// The display name falls back from the registered name to the one the
    /// sender supplied with the event, then to the generated default.
    pub fn share_started(
        room: &Room,
        sender_id: &ConnectionId,
        payload_name: Option<&str>,
    ) -> Option<Delivery> {
        let receiver = room.receiver()?;

        let name = room
            .sender(sender_id)
            .map(|sender| sender.name.clone())
            .or_else(|| {
                payload_name
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| default_sender_name(sender_id));

        Some(Delivery::new(
            receiver,
            ServerEvent::SenderShareStarted(ShareNotice::new(sender_id.clone(), Some(name))),
        ))
    }

    pub fn share_stopped(room: &Room, sender_id: &ConnectionId) -> Option<Delivery> {
        let receiver = room.receiver()?;

        Some(Delivery::new(
            receiver,
            ServerEvent::SenderShareStopped(ShareNotice::new(sender_id.clone(), None)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use shared::server_event::SenderInfo;

    use super::*;

    fn room_with_receiver() -> Room {
        let mut room = Room::new("1234");
        room.bind_receiver(ConnectionId::from("R"));
        room
    }

    fn share_started_name(delivery: Option<Delivery>) -> Option<String> {
        match delivery?.event {
            ServerEvent::SenderShareStarted(notice) => notice.name,
            _ => None,
        }
    }

    #[test]
    fn no_receiver_means_no_broadcast() {
        let room = Room::new("1234");

        assert!(PresenceBroadcaster::sender_list(&room).is_none());
        assert!(PresenceBroadcaster::share_stopped(&room, &ConnectionId::from("A")).is_none());
    }

    #[test]
    fn sender_list_goes_to_receiver() {
        let mut room = room_with_receiver();
        room.add_sender(SenderInfo {
            id: ConnectionId::from("A"),
            name: "Alice".to_string(),
        });

        let delivery = PresenceBroadcaster::sender_list(&room).unwrap();
        assert_eq!(delivery.to, ConnectionId::from("R"));
        assert_eq!(
            delivery.event,
            ServerEvent::SenderList(vec![SenderInfo {
                id: ConnectionId::from("A"),
                name: "Alice".to_string(),
            }])
        );
    }

    #[test]
    fn share_started_name_fallback_chain() {
        let mut room = room_with_receiver();
        let alice = ConnectionId::from("Aaaaaaaa");
        let stranger = ConnectionId::from("Zzzzzzzz");
        room.add_sender(SenderInfo {
            id: alice.clone(),
            name: "Alice".to_string(),
        });

        let registered = PresenceBroadcaster::share_started(&room, &alice, Some("Other"));
        assert_eq!(share_started_name(registered), Some("Alice".to_string()));

        let supplied = PresenceBroadcaster::share_started(&room, &stranger, Some("Zed"));
        assert_eq!(share_started_name(supplied), Some("Zed".to_string()));

        let generated = PresenceBroadcaster::share_started(&room, &stranger, None);
        assert_eq!(share_started_name(generated), Some("Sender-Zzzzz".to_string()));
    }
}
