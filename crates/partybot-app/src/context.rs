//! Shared handles passed to every bot task.

use std::sync::Arc;

use partybot_core::{BotConfig, ConnectionTracker};

/// Handles shared by the dispatcher, heartbeat and invite responder.
///
/// Cloning is cheap: every field is reference counted.
pub struct BotContext<S, C> {
    /// Base network session.
    pub session: Arc<S>,
    /// Game coordinator session.
    pub coordinator: Arc<C>,
    /// Coordinator readiness flag.
    pub tracker: Arc<ConnectionTracker>,
    /// Process configuration.
    pub config: Arc<BotConfig>,
}

impl<S, C> BotContext<S, C> {
    /// Create a context with a fresh, not-ready tracker.
    pub fn new(config: BotConfig, session: Arc<S>, coordinator: Arc<C>) -> Self {
        Self {
            session,
            coordinator,
            tracker: Arc::new(ConnectionTracker::new()),
            config: Arc::new(config),
        }
    }
}

impl<S, C> Clone for BotContext<S, C> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            coordinator: Arc::clone(&self.coordinator),
            tracker: Arc::clone(&self.tracker),
            config: Arc::clone(&self.config),
        }
    }
}
