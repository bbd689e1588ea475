//! Parlor — anonymous two-party chat with a markov fallback bot

use clap::{Parser, Subcommand};
use parlor_core::ServerConfig;
use parlor_gateway::start_server;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "parlor", about = "Parlor — pairs strangers for chat, bot included")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat server
    Serve {
        /// Chat page + websocket listen address
        #[arg(long, default_value = "127.0.0.1:4000")]
        http_addr: String,
        /// Raw TCP listen address
        #[arg(long, default_value = "127.0.0.1:4001")]
        tcp_addr: String,
        /// Seconds to wait for a human partner before the bot steps in
        #[arg(long, default_value_t = 5)]
        wait_secs: u64,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve {
            http_addr,
            tcp_addr,
            wait_secs,
        }) => {
            init_tracing();
            let mut config = ServerConfig {
                http_addr,
                tcp_addr,
                ..ServerConfig::default()
            };
            config.matching.wait_window = Duration::from_secs(wait_secs);
            start_server(config).await?;
        }

        Some(Commands::Version) => {
            println!("parlor v{}", env!("CARGO_PKG_VERSION"));
        }

        // No subcommand = serve with defaults
        None => {
            init_tracing();
            start_server(ServerConfig::default()).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parlor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
