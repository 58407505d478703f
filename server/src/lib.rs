pub mod config;
pub mod connection_registry;
pub mod error;
pub mod event;
pub mod hub;
pub mod presence;
pub mod room;
pub mod room_registry;
pub mod session;
pub mod signal_relay;
pub mod signal_server;
pub mod ws_handler;

pub use config::ServerConfig;
pub use signal_server::SignalServer;
