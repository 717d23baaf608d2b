//! Side effects requested by the policy.
//!
//! This module defines [`BotAction`], the instructions produced by the
//! [`crate::Policy`] state machine for the [`crate::Dispatcher`] to execute.

use partybot_core::{PersonaState, SteamId};

/// Actions produced by the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAction {
    /// Request authentication with the configured credentials.
    LogOn,

    /// Advertise a presence state.
    SetPersona(PersonaState),

    /// Declare the game being played.
    SetGamesPlayed {
        /// Game app id.
        app_id: u32,
    },

    /// Record coordinator readiness in the tracker.
    SetCoordinatorReady(bool),

    /// Start the heartbeat and invite responder tasks (at most once).
    LaunchCoordinatorTasks,

    /// Accept a pending friend request.
    AcceptFriend {
        /// Account that sent the request.
        steam_id: SteamId,
    },

    /// Emit a log line.
    Log {
        /// Severity.
        level: LogLevel,
        /// Message to log.
        message: String,
    },

    /// Stop the bot. Unrecoverable.
    Terminate {
        /// Why the bot stops.
        reason: String,
    },
}

impl BotAction {
    pub(crate) fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log { level, message: message.into() }
    }

    /// Whether this action performs a side effect other than logging.
    pub fn is_effect(&self) -> bool {
        !matches!(self, Self::Log { .. })
    }
}

/// Log levels for bot actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace information
    Trace,
    /// Debug information
    Debug,
    /// Informational message
    Info,
    /// Warning
    Warn,
    /// Error
    Error,
}
