//! Bot runtime errors.

use partybot_core::ConfigError;
use thiserror::Error;

/// Errors that stop the bot.
///
/// Everything else (collaborator failures on individual actions, chat join
/// failures, subscription failures) is logged and the affected loop keeps
/// running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    /// Configuration rejected at startup.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The transport connection could not be opened.
    #[error("failed to connect to {addr}: {reason}")]
    Connect {
        /// Address we tried to reach
        addr: String,
        /// Collaborator error message
        reason: String,
    },

    /// The session event stream was already taken by another consumer.
    #[error("session event stream already taken")]
    EventsUnavailable,

    /// The session client stopped producing events.
    #[error("session event stream closed")]
    EventStreamClosed,

    /// The session reported an unrecoverable error.
    #[error("fatal: {reason}")]
    Fatal {
        /// What went wrong
        reason: String,
    },
}
