use std::{collections::HashMap, time::Duration};

use log::{debug, info};
use shared::{ConnectionId, server_event::ServerEvent};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::{Instant, interval_at},
};

use crate::{
    error::HubClosed,
    event::{Delivery, Event},
    session::SessionLifecycle,
};

pub enum HubCommand {
    Connect {
        id: ConnectionId,
        outbox: UnboundedSender<ServerEvent>,
    },
    Event {
        from: ConnectionId,
        event: Event,
    },
}

/// Cheap, cloneable entry point into the hub task.
#[derive(Clone)]
pub struct HubHandle {
    tx: UnboundedSender<HubCommand>,
}

impl HubHandle {
    /// Registers a connection and returns the stream of events addressed to it.
    pub fn connect(&self, id: ConnectionId) -> Result<UnboundedReceiver<ServerEvent>, HubClosed> {
        let (outbox, inbox) = mpsc::unbounded_channel();

        self.tx
            .send(HubCommand::Connect { id, outbox })
            .map_err(|_| HubClosed)?;

        Ok(inbox)
    }

    pub fn send(&self, from: &ConnectionId, event: Event) -> Result<(), HubClosed> {
        self.tx
            .send(HubCommand::Event {
                from: from.clone(),
                event,
            })
            .map_err(|_| HubClosed)
    }

    pub fn disconnect(&self, from: &ConnectionId) -> Result<(), HubClosed> {
        self.send(from, Event::Disconnect)
    }
}

/// Single task owning all session state. Commands are applied one at a time,
/// so joins, relays and disconnects never interleave.
pub struct Hub {
    session: SessionLifecycle,
    outboxes: HashMap<ConnectionId, UnboundedSender<ServerEvent>>,
    rx: UnboundedReceiver<HubCommand>,
    stats_interval: Option<Duration>,
}

impl Hub {
    pub fn spawn(stats_interval: Option<Duration>) -> (HubHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let hub = Self {
            session: SessionLifecycle::new(),
            outboxes: HashMap::new(),
            rx,
            stats_interval: stats_interval.filter(|period| !period.is_zero()),
        };

        let task = tokio::spawn(hub.run());

        (HubHandle { tx }, task)
    }

    async fn run(mut self) {
        let stats_enabled = self.stats_interval.is_some();
        let period = self.stats_interval.unwrap_or(Duration::from_secs(60));
        let mut stats_ticker = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                command = self.rx.recv() => {
                    match command {
                        Some(command) => self.apply(command),
                        None => break,
                    }
                }

                _ = stats_ticker.tick(), if stats_enabled => {
                    self.log_stats();
                }
            }
        }

        info!("Session hub stopped");
    }

    fn apply(&mut self, command: HubCommand) {
        match command {
            HubCommand::Connect { id, outbox } => {
                self.session.connect(id.clone());
                self.outboxes.insert(id, outbox);
            }
            HubCommand::Event { from, event } => {
                let disconnecting = matches!(event, Event::Disconnect);
                debug!("{} from {}", event.name(), from);

                let deliveries = self.session.handle(&from, event);

                if disconnecting {
                    self.outboxes.remove(&from);
                }

                self.dispatch(deliveries);
            }
        }
    }

    fn dispatch(&self, deliveries: Vec<Delivery>) {
        for Delivery { to, event } in deliveries {
            match self.outboxes.get(&to) {
                Some(outbox) => {
                    if outbox.send(event).is_err() {
                        debug!("Outbox of {} is closed", to);
                    }
                }
                None => debug!("Dropping {} for unknown connection {}", event.name(), to),
            }
        }
    }

    fn log_stats(&self) {
        let relay = self.session.relay_stats();

        info!(
            "{} rooms, {} connections, {} signals relayed, {} dropped",
            self.session.rooms().len(),
            self.session.connections().len(),
            relay.relayed,
            relay.dropped
        );
    }
}
