//! Command-line arguments.
//!
//! Every option falls back to an environment variable, and `main` loads a
//! `.env` file before parsing, so a deployment can be configured entirely
//! through the environment.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use partybot_core::{BotConfig, Credentials, DEFAULT_SERVER_ADDR, DOTA2_APP_ID, PARTY_CHANNEL_NAME};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

/// Party bot daemon
#[derive(Parser, Debug)]
#[command(name = "partybot")]
#[command(about = "Keeps a game coordinator session alive and auto-accepts party invites")]
#[command(version)]
pub struct Args {
    /// Network address to connect to (ip:port)
    #[arg(short, long, env = "PARTYBOT_SERVER", default_value = DEFAULT_SERVER_ADDR)]
    pub server: String,

    /// Account name
    #[arg(short, long, env = "USERNAME")]
    pub username: String,

    /// Account password
    #[arg(short, long, env = "PASSWORD", hide_env_values = true)]
    pub password: String,

    /// App id declared as played after log-on
    #[arg(long, env = "PARTYBOT_APP_ID", default_value_t = DOTA2_APP_ID)]
    pub app_id: u32,

    /// Coordinator hello interval in milliseconds
    #[arg(long, env = "PARTYBOT_HEARTBEAT_MS", default_value_t = 1000)]
    pub heartbeat_ms: u64,

    /// Chat channel joined after accepting a party invite
    #[arg(long, env = "PARTYBOT_PARTY_CHANNEL", default_value = PARTY_CHANNEL_NAME)]
    pub party_channel: String,

    /// Hellos the simulated coordinator waits for before welcoming the bot
    #[arg(long, default_value_t = 3)]
    pub sim_welcome_after: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PARTYBOT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "PARTYBOT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    /// Bot configuration described by these arguments.
    pub fn bot_config(&self) -> BotConfig {
        BotConfig {
            server_addr: self.server.clone(),
            credentials: Credentials::new(&self.username, &self.password),
            app_id: self.app_id,
            heartbeat_interval: Duration::from_millis(self.heartbeat_ms),
            party_channel: self.party_channel.clone(),
        }
    }
}
