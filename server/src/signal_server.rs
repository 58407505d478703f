use core::error::Error;
use std::{io, net::SocketAddr};

use log::error;
use tokio::net::TcpListener;

use crate::{config::ServerConfig, hub::Hub, ws_handler::WsHandler};

pub struct SignalServer {
    tcp_listener: TcpListener,
    config: ServerConfig,
}

impl SignalServer {
    pub async fn bind(config: ServerConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(Self {
            tcp_listener: TcpListener::bind(&config.bind_addr).await?,
            config,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.tcp_listener.local_addr()
    }

    pub async fn listen(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let (hub, mut hub_task) = Hub::spawn(self.config.stats_interval);

        loop {
            tokio::select! {

                result = &mut hub_task => {

                    result?;
                    return Err("session hub stopped".into());
                }

                result = self.tcp_listener.accept() => {

                    let (tcp_socket, addr) = match result {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            error!("Error accepting connection: {}", e);
                            continue;
                        }
                    };

                    let hub = hub.clone();

                    tokio::spawn(async move {

                        if let Err(e) = WsHandler::handle_stream(tcp_socket, hub).await {

                            error!("Error handling connection from {}: {}", addr, e);
                        }
                    });
                }
            }
        }
    }
}
