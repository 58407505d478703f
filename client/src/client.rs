use anyhow::{Context, Result, anyhow};
use futures::{SinkExt, StreamExt, stream::SplitSink};
use shared::{
    Role,
    client_message::{ClientMessage, DelRoom, JoinRequest, ShareStarted},
    server_event::ServerEvent,
};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::cli_display::CliDisplay;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

pub struct Client;

impl Client {
    /// Joins a room and prints everything the server sends until the room is
    /// deleted, the server hangs up, or Ctrl-C is pressed.
    pub async fn run(url: &str, role: Role, request: JoinRequest, share: bool) -> Result<()> {
        let (ws_stream, _) = connect_async(url)
            .await
            .with_context(|| format!("Could not connect to {}", url))?;
        CliDisplay::print_connected_message(url, role);

        let (mut write, mut read) = ws_stream.split();
        send(&mut write, ClientMessage::JoinRoom(request)).await?;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut joined = false;

        loop {
            tokio::select! {

                frame = read.next() => {

                    let text = match frame {
                        None => return Ok(()),
                        Some(frame) => match frame? {
                            Message::Text(text) => text,
                            Message::Close(_) => return Ok(()),
                            _ => continue,
                        },
                    };

                    let event = match ServerEvent::from_json(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            CliDisplay::print_warning(&format!("Unreadable event: {}", e));
                            continue;
                        }
                    };

                    CliDisplay::print_event(&event);

                    match event {
                        ServerEvent::JoinAck(ack) if ack.success => {
                            joined = true;

                            if share && role == Role::Sender {
                                let started = ShareStarted { name: ack.name };
                                send(&mut write, ClientMessage::ShareStarted(Some(started))).await?;
                            }
                        }
                        ServerEvent::JoinAck(ack) => {
                            let message =
                                ack.message.unwrap_or_else(|| "Join rejected".to_string());
                            return Err(anyhow!(message));
                        }
                        ServerEvent::RoomDeleted => return Ok(()),
                        _ => {}
                    }
                }

                result = &mut ctrl_c => {

                    result?;

                    if joined {
                        match role {
                            Role::Sender if share => {
                                send(&mut write, ClientMessage::SenderShareStopped(None)).await?;
                            }
                            Role::Receiver => {
                                let del = DelRoom { role: Some(Role::Receiver.to_string()) };
                                send(&mut write, ClientMessage::DelRoom(Some(del))).await?;
                            }
                            Role::Sender => {}
                        }
                    }

                    write.send(Message::Close(None)).await?;
                    return Ok(());
                }
            }
        }
    }
}

async fn send(write: &mut WsSink, message: ClientMessage) -> Result<()> {
    write.send(Message::Text(message.to_json()?)).await?;
    Ok(())
}
