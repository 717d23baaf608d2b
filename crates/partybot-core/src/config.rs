//! Bot configuration.
//!
//! Loaded once at process start (see the `partybot` binary) and shared
//! read-only afterwards.

use std::{fmt, net::SocketAddr, time::Duration};

use crate::ConfigError;

/// Network entry point used when none is configured.
pub const DEFAULT_SERVER_ADDR: &str = "162.254.196.83:27018";

/// Interval between coordinator hellos while the coordinator is not ready.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

/// App id declared as played after log-on.
pub const DOTA2_APP_ID: u32 = 570;

/// Chat channel joined after accepting a party invite.
pub const PARTY_CHANNEL_NAME: &str = "Party";

/// Account credentials.
///
/// `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Network address (`host:port`).
    pub server_addr: String,
    /// Account credentials.
    pub credentials: Credentials,
    /// App id declared as played after log-on.
    pub app_id: u32,
    /// Coordinator hello interval.
    pub heartbeat_interval: Duration,
    /// Chat channel joined after accepting a party invite.
    pub party_channel: String,
}

impl BotConfig {
    /// Configuration for `credentials` with every other field defaulted.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            credentials,
            app_id: DOTA2_APP_ID,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            party_channel: PARTY_CHANNEL_NAME.to_string(),
        }
    }

    /// Check the configuration and return the parsed server address.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidServerAddr`] if `server_addr` is not `ip:port`
    /// - [`ConfigError::MissingUsername`] / [`ConfigError::MissingPassword`]
    /// - [`ConfigError::ZeroHeartbeatInterval`]
    /// - [`ConfigError::EmptyPartyChannel`]
    pub fn validate(&self) -> Result<SocketAddr, ConfigError> {
        let addr = self.server_addr.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidServerAddr { addr: self.server_addr.clone(), reason: e.to_string() }
        })?;

        if self.credentials.username.is_empty() {
            return Err(ConfigError::MissingUsername);
        }
        if self.credentials.password.is_empty() {
            return Err(ConfigError::MissingPassword);
        }
        if self.heartbeat_interval.is_zero() {
            return Err(ConfigError::ZeroHeartbeatInterval);
        }
        if self.party_channel.is_empty() {
            return Err(ConfigError::EmptyPartyChannel);
        }

        Ok(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BotConfig {
        BotConfig::new(Credentials::new("bot", "hunter2"))
    }

    #[test]
    fn default_config_is_valid() {
        let addr = config().validate();
        assert_eq!(addr.map(|a| a.port()), Ok(27018));
    }

    #[test]
    fn rejects_hostless_address() {
        let mut config = config();
        config.server_addr = "27018".into();

        assert!(matches!(config.validate(), Err(ConfigError::InvalidServerAddr { .. })));
    }

    #[test]
    fn rejects_missing_credentials() {
        let mut config = config();
        config.credentials.password.clear();
        assert_eq!(config.validate(), Err(ConfigError::MissingPassword));

        config.credentials.username.clear();
        assert_eq!(config.validate(), Err(ConfigError::MissingUsername));
    }

    #[test]
    fn rejects_zero_heartbeat() {
        let mut config = config();
        config.heartbeat_interval = Duration::ZERO;

        assert_eq!(config.validate(), Err(ConfigError::ZeroHeartbeatInterval));
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", config().credentials);

        assert!(rendered.contains("bot"));
        assert!(!rendered.contains("hunter2"));
    }
}
