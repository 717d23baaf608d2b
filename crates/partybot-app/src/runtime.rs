//! Bot entry point.
//!
//! The [`Bot`] validates the configuration, takes the session event stream,
//! opens the transport connection and hands over to the [`Dispatcher`] for the
//! rest of the process lifetime.

use std::sync::Arc;

use partybot_core::{BotConfig, ConnectionTracker, CoordinatorClient, SessionClient};

use crate::{BotContext, BotError, Dispatcher};

/// Generic bot runtime over a session and a coordinator client.
///
/// # Type Parameters
///
/// - `S`: Base network session client
/// - `C`: Game coordinator client
pub struct Bot<S, C> {
    ctx: BotContext<S, C>,
}

impl<S, C> Bot<S, C>
where
    S: SessionClient,
    C: CoordinatorClient,
{
    /// Create a bot over the given collaborators.
    pub fn new(config: BotConfig, session: Arc<S>, coordinator: Arc<C>) -> Self {
        Self { ctx: BotContext::new(config, session, coordinator) }
    }

    /// Coordinator readiness flag shared with the bot's tasks.
    pub fn tracker(&self) -> Arc<ConnectionTracker> {
        Arc::clone(&self.ctx.tracker)
    }

    /// Run until a fatal event.
    ///
    /// Never returns `Ok`: the bot runs for the life of the process, and the
    /// only ways out are startup failures, a fatal session event, or the
    /// session dropping its event stream.
    ///
    /// # Errors
    ///
    /// - [`BotError::Config`] if the configuration is invalid
    /// - [`BotError::EventsUnavailable`] if the event stream was already taken
    /// - [`BotError::Connect`] if the transport connection fails
    /// - any error returned by [`Dispatcher::run`]
    pub async fn run(self) -> Result<(), BotError> {
        let addr = self.ctx.config.validate()?.to_string();
        let events = self.ctx.session.take_events().ok_or(BotError::EventsUnavailable)?;

        tracing::info!("Connecting to {addr}");
        self.ctx
            .session
            .connect(&addr)
            .await
            .map_err(|e| BotError::Connect { addr: addr.clone(), reason: e.to_string() })?;
        tracing::info!("Connected to {addr}");

        Dispatcher::new(self.ctx).run(events).await
    }
}
