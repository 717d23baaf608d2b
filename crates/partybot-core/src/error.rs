//! Configuration errors.

use thiserror::Error;

/// Errors found while validating a [`crate::BotConfig`].
///
/// All of these are fatal at startup: fix the configuration and restart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Server address is not `ip:port`.
    #[error("invalid server address {addr:?}: {reason}")]
    InvalidServerAddr {
        /// Address as configured
        addr: String,
        /// Parser message
        reason: String,
    },

    /// No account name configured.
    #[error("missing username")]
    MissingUsername,

    /// No password configured.
    #[error("missing password")]
    MissingPassword,

    /// Heartbeat interval must be positive.
    #[error("heartbeat interval must be greater than zero")]
    ZeroHeartbeatInterval,

    /// Party channel name must not be empty.
    #[error("party channel name is empty")]
    EmptyPartyChannel,
}
