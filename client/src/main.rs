mod cli_display;
mod client;

use std::str::FromStr;

use clap::Parser;
use rand::{Rng, rng, seq::IndexedRandom};
use shared::{DEFAULT_PORT, Role, client_message::JoinRequest};

use crate::client::Client;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(short, long, default_value = "sender", value_parser = parse_role)]
    role: Role,

    #[arg(short = 'w', long)]
    password: String,

    #[arg(short, long)]
    name: Option<String>,

    #[arg(short, long, default_value = "127.0.0.1")]
    server_address: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Announce share-started right after joining as a sender
    #[arg(long)]
    share: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let name = match (args.name, args.role) {
        (Some(name), _) => Some(name),
        (None, Role::Sender) => Some(generate_username()),
        (None, Role::Receiver) => None,
    };

    let request = JoinRequest::new(&args.role.to_string(), &args.password, name.as_deref());
    let url = format!("ws://{}:{}", args.server_address, args.port);

    if let Err(e) = Client::run(&url, args.role, request, args.share).await {
        eprintln!("{:#}", e);
    }
}

fn parse_role(role: &str) -> Result<Role, String> {
    Role::from_str(role).map_err(|_| format!("role must be 'sender' or 'receiver', got '{}'", role))
}

fn generate_username() -> String {
    let adjectives = ["fast", "lazy", "cool", "smart", "brave"];
    let nouns = ["tiger", "eagle", "lion", "panda", "wolf"];

    let mut rng = rng();

    let adjective = adjectives.choose(&mut rng).copied().unwrap_or("quiet");
    let noun = nouns.choose(&mut rng).copied().unwrap_or("owl");
    let number: u16 = rng.random_range(1..9999);

    format!("{}-{}{}", adjective, noun, number)
}
