pub mod client_message;
pub mod connection_id;
pub mod role;
pub mod server_event;
pub mod signal;

pub use connection_id::ConnectionId;
pub use role::Role;

pub const DEFAULT_PORT: u16 = 3001;

/// Fallback display name for a sender that joined without one.
pub fn default_sender_name(id: &ConnectionId) -> String {
    format!("Sender-{}", id.short_id())
}
