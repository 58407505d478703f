use clap::Parser;
use log::{error, info};
use multiflex_server::{ServerConfig, SignalServer};
use shared::DEFAULT_PORT;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds between stats log lines, 0 to disable
    #[arg(long, default_value_t = 60)]
    stats_interval: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::new(&args.host, args.port, args.stats_interval);

    let server = match SignalServer::bind(config.clone()).await {
        Ok(server) => server,
        Err(e) => {
            error!("Error binding {}: {}", config.bind_addr, e);
            return;
        }
    };

    info!("Signaling server listening on {}", config.bind_addr);

    if let Err(e) = server.listen().await {
        error!("{}", e);
    }
}
