//! Terminal chat widget for the letrades relay.
//!
//! Reads one message per line from stdin and prints the conversation to
//! stdout.

mod chat;
mod error;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use letrades_client::{Capabilities, ChatSession, HttpRelay, RelayEndpoint};
use letrades_core::business::{bundled_directory, load_directory};
use log::info;
use tokio::io::{AsyncWriteExt, BufReader};

pub use error::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "letrades", version, about = "Ask about local businesses and daily tasks")]
struct Args {
    /// Base URL of the relay server.
    #[arg(long, default_value = "http://localhost:3001")]
    relay_url: String,

    /// Explicit chat URL, for relays deployed as a single function.
    #[arg(long, requires = "health_url")]
    chat_url: Option<String>,

    /// Explicit liveness URL, paired with `--chat-url`.
    #[arg(long, requires = "chat_url")]
    health_url: Option<String>,

    /// Business directory file (.json, .yaml or .yml). Defaults to the bundled list.
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Check that the relay is reachable before chatting.
    #[arg(long)]
    status_check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();

    let endpoint = match (&args.chat_url, &args.health_url) {
        (Some(chat), Some(health)) => RelayEndpoint::new(chat, health)?,
        _ => RelayEndpoint::from_base(&args.relay_url)?,
    };
    let businesses = match &args.directory {
        Some(path) => load_directory(path)?,
        None => bundled_directory()?,
    };
    info!(
        "relay {} with {} businesses",
        endpoint.chat_url,
        businesses.len()
    );

    let capabilities = Capabilities {
        status_check: args.status_check,
    };
    let mut session =
        ChatSession::with_capabilities(HttpRelay::new(endpoint), businesses, capabilities);

    let mut stdout = tokio::io::stdout();
    if let Some(online) = session.check_status().await {
        let status = if online { "Relay online" } else { "Relay unreachable" };
        stdout.write_all(format!("{status}\n").as_bytes()).await?;
    }

    let stdin = BufReader::new(tokio::io::stdin());
    chat::run(&mut session, stdin, &mut stdout).await?;
    stdout.flush().await?;

    Ok(())
}
