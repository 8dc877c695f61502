use clap::Parser;
use std::net::TcpListener;

use netwatch::config::{self, RelayConfig};
use netwatch::{logging, relay};

/// Echoes every WebSocket message back to its sender.
#[derive(Parser, Debug)]
#[command(name = "relay", version)]
struct Cli {
    /// Listen port; overrides PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logging::init();
    config::load_env();
    let cli = Cli::parse();

    let mut settings = RelayConfig::from_env()?;
    if let Some(port) = cli.port {
        settings.port = port;
    }

    let listener = TcpListener::bind(settings.bind_addr())?;
    relay::serve(listener).await
}
