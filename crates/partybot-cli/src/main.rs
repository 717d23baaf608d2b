//! Party bot binary.
//!
//! # Usage
//!
//! ```bash
//! # Credentials from the environment (or a .env file)
//! USERNAME=bot PASSWORD=secret partybot
//!
//! # Explicit flags, JSON logs
//! partybot --username bot --password secret --log-format json
//! ```
//!
//! No production transport is linked into this binary: it runs the bot
//! against the in-process [`SimNetwork`]. A real client plugs in by
//! implementing `SessionClient` and `CoordinatorClient`.

mod args;
mod logging;

use clap::Parser;
use partybot_app::Bot;
use partybot_harness::{NetworkScript, SimNetwork};

use crate::args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Missing .env is fine: every option also has a flag and a default.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    logging::init(&args.log_level, args.log_format)?;

    let config = args.bot_config();
    tracing::info!("partybot starting");
    tracing::info!(
        server = %config.server_addr,
        username = %config.credentials.username,
        heartbeat_ms = args.heartbeat_ms,
        "Configuration loaded"
    );

    tracing::warn!("No production transport linked - using the in-process simulated network");
    let network = SimNetwork::new(NetworkScript {
        welcome_after_hellos: args.sim_welcome_after,
        ..NetworkScript::demo()
    });

    let bot = Bot::new(config, network.session, network.coordinator);
    bot.run().await?;

    Ok(())
}
