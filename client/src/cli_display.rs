use chrono::Local;
use crossterm::style::Stylize;
use shared::{Role, server_event::ServerEvent};

pub struct CliDisplay;

impl CliDisplay {
    pub fn print_connected_message(url: &str, role: Role) {
        println!("Connected to {} as {}!", url, role);
    }

    pub fn print_event(event: &ServerEvent) {
        let timestamp = Local::now().format("%H:%M:%S");
        let label = format!("[{}]", event.name());

        match event {
            ServerEvent::JoinAck(ack) if !ack.success => {
                println!("{} {} {}", timestamp, label.red(), ack.message.as_deref().unwrap_or(""));
            }
            ServerEvent::JoinError(message) => {
                println!("{} {} {}", timestamp, label.red(), message);
            }
            ServerEvent::RoomDeleted => {
                println!("{} {} The receiver closed the room.", timestamp, label.yellow());
            }
            ServerEvent::SenderList(senders) => {
                println!("{} {} {} sender(s)", timestamp, label.cyan(), senders.len());

                for sender in senders {
                    println!("  * {} ({})", sender.name, sender.id);
                }
            }
            ServerEvent::Signal(envelope) => {
                let from = envelope.from.as_ref().map_or("?", |from| from.as_str());
                println!("{} {} {} from {}", timestamp, label.green(), envelope.kind, from);
            }
            other => {
                let detail = other.to_json().unwrap_or_default();
                println!("{} {} {}", timestamp, label.green(), detail);
            }
        }
    }

    pub fn print_warning(message: &str) {
        eprintln!("{}", message.yellow());
    }
}
