use core::error::Error;

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use shared::{ConnectionId, client_message::ClientMessage, server_event::ServerEvent};
use tokio::{net::TcpStream, sync::mpsc::UnboundedReceiver};
use tokio_tungstenite::{WebSocketStream, accept_async, tungstenite::Message};

use crate::{event::Event, hub::HubHandle};

pub struct WsHandler;

impl WsHandler {
    /// Serves one WebSocket client until it closes, then reports the
    /// disconnect to the hub whatever the reason.
    pub async fn handle_stream(
        stream: TcpStream,
        hub: HubHandle,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = stream.peer_addr()?;
        let ws_stream = accept_async(stream).await?;

        let id = ConnectionId::generate();
        let inbox = hub.connect(id.clone())?;
        info!("{} connected from {}", id, addr);

        let result = Self::run_session(ws_stream, &id, &hub, inbox).await;

        if hub.disconnect(&id).is_err() {
            warn!("Hub gone before {} could be cleaned up", id);
        }
        info!("{} has disconnected", id);

        result
    }

    async fn run_session(
        ws_stream: WebSocketStream<TcpStream>,
        id: &ConnectionId,
        hub: &HubHandle,
        mut inbox: UnboundedReceiver<ServerEvent>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let (mut ws_tx, mut ws_rx) = ws_stream.split();

        loop {
            tokio::select! {

                incoming = ws_rx.next() => {

                    let message = match incoming {
                        None => return Ok(()),
                        Some(message) => message?,
                    };

                    match message {
                        Message::Text(text) => Self::handle_text(&text, id, hub)?,
                        Message::Ping(data) => ws_tx.send(Message::Pong(data)).await?,
                        Message::Close(_) => return Ok(()),
                        _ => {}
                    }
                }

                outgoing = inbox.recv() => {

                    let event = match outgoing {
                        Some(event) => event,
                        None => return Ok(()),
                    };

                    ws_tx.send(Message::Text(event.to_json()?)).await?;
                }
            }
        }
    }

    fn handle_text(
        text: &str,
        id: &ConnectionId,
        hub: &HubHandle,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let message = match ClientMessage::from_json(text) {
            Ok(message) => message,
            Err(e) => {
                warn!("Ignoring malformed message from {}: {}", id, e);
                return Ok(());
            }
        };

        debug!("{} sent {}", id, message.name());
        hub.send(id, Event::from(message))?;

        Ok(())
    }
}
