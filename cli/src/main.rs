mod commands;
mod telemetry;

use clap::Parser;
use feed_core::{Api, ApiConfig};

use commands::Command;

/// Command-line client for the wallet-authenticated social feed.
#[derive(Parser)]
#[command(name = "feed", version)]
struct Cli {
    /// Backend base URL, e.g. http://localhost:3000/api
    #[arg(long, env = "FEED_API_URL", global = true)]
    api_url: Option<String>,

    /// Wallet address to act as
    #[arg(long, env = "FEED_WALLET", global = true)]
    wallet: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let cli = Cli::parse();
    let config = match cli.api_url {
        Some(base_url) => ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
        },
        None => ApiConfig::from_env(),
    };
    tracing::debug!(base_url = %config.base_url, "using backend");

    let api = Api::from_config(&config);
    commands::run(&api, cli.wallet.as_deref(), cli.command)
}
