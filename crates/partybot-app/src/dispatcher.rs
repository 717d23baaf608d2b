//! Session event dispatcher.
//!
//! The [`Dispatcher`] consumes the session event stream in arrival order,
//! runs each event through the [`Policy`] and executes the resulting actions
//! against the collaborators.
//!
//! # Coordinator tasks
//!
//! The first log-on launches the [`Heartbeat`] and [`InviteResponder`] as
//! independent tokio tasks. Later log-ons (a relog after the network ended the
//! session) do not launch them again: both tasks keep running for the life of
//! the dispatcher, and the heartbeat picks up the reset readiness flag on its
//! next tick. The tasks are aborted when the dispatcher is dropped.

use partybot_core::{CoordinatorClient, EventStream, InboundEvent, SessionClient};
use tokio::task::JoinHandle;

use crate::{
    BotAction, BotContext, BotError, Heartbeat, InviteResponder, LogLevel, Policy, SessionState,
};

/// Handles of the tasks launched on log-on.
struct CoordinatorTasks {
    heartbeat: JoinHandle<()>,
    responder: JoinHandle<()>,
}

impl Drop for CoordinatorTasks {
    fn drop(&mut self) {
        self.heartbeat.abort();
        self.responder.abort();
    }
}

/// Executes policy decisions against the collaborators.
pub struct Dispatcher<S, C> {
    ctx: BotContext<S, C>,
    policy: Policy,
    /// `Some` once the coordinator tasks are launched. Never reset.
    tasks: Option<CoordinatorTasks>,
}

impl<S, C> Dispatcher<S, C>
where
    S: SessionClient,
    C: CoordinatorClient,
{
    /// Create a dispatcher over `ctx`.
    pub fn new(ctx: BotContext<S, C>) -> Self {
        let policy = Policy::new(ctx.config.app_id);
        Self { ctx, policy, tasks: None }
    }

    /// Dispatch events until a fatal event arrives or the stream ends.
    ///
    /// # Errors
    ///
    /// - [`BotError::Fatal`] on a log-on failure or fatal session error
    /// - [`BotError::EventStreamClosed`] if the session stops producing events
    pub async fn run(mut self, mut events: EventStream) -> Result<(), BotError> {
        while let Some(event) = events.recv().await {
            self.dispatch(&event)?;
        }

        tracing::warn!("Session event stream ended");
        Err(BotError::EventStreamClosed)
    }

    /// Process a single event.
    ///
    /// Must be called from within a tokio runtime: the first log-on spawns
    /// tasks.
    pub fn dispatch(&mut self, event: &InboundEvent) -> Result<(), BotError> {
        tracing::debug!(kind = event.kind(), "Session event");

        for action in self.policy.react(event) {
            self.execute(action)?;
        }
        Ok(())
    }

    fn execute(&mut self, action: BotAction) -> Result<(), BotError> {
        match action {
            BotAction::LogOn => {
                let credentials = &self.ctx.config.credentials;
                if let Err(e) = self.ctx.session.log_on(credentials) {
                    tracing::warn!(error = %e, "Failed to send log-on request");
                }
            },
            BotAction::SetPersona(state) => {
                if let Err(e) = self.ctx.session.set_persona_state(state) {
                    tracing::warn!(?state, error = %e, "Failed to set persona state");
                }
            },
            BotAction::SetGamesPlayed { app_id } => {
                if let Err(e) = self.ctx.session.set_games_played(app_id) {
                    tracing::warn!(app_id, error = %e, "Failed to declare game");
                }
            },
            BotAction::SetCoordinatorReady(ready) => {
                if self.ctx.tracker.is_ready() != ready {
                    tracing::info!(ready, "Coordinator readiness changed");
                }
                self.ctx.tracker.set_ready(ready);
            },
            BotAction::LaunchCoordinatorTasks => self.launch_coordinator_tasks(),
            BotAction::AcceptFriend { steam_id } => match self.ctx.session.add_friend(steam_id) {
                Ok(()) => tracing::info!("Accepted friend: {steam_id}"),
                Err(e) => tracing::warn!(error = %e, "Failed to accept friend {steam_id}"),
            },
            BotAction::Log { level, message } => match level {
                LogLevel::Trace => tracing::trace!("{}", message),
                LogLevel::Debug => tracing::debug!("{}", message),
                LogLevel::Info => tracing::info!("{}", message),
                LogLevel::Warn => tracing::warn!("{}", message),
                LogLevel::Error => tracing::error!("{}", message),
            },
            BotAction::Terminate { reason } => {
                tracing::error!("{}", reason);
                return Err(BotError::Fatal { reason });
            },
        }
        Ok(())
    }

    fn launch_coordinator_tasks(&mut self) {
        if self.tasks.is_some() {
            tracing::debug!("Coordinator tasks already running");
            return;
        }

        let heartbeat = Heartbeat::new(
            self.ctx.coordinator.clone(),
            self.ctx.tracker.clone(),
            self.ctx.config.heartbeat_interval,
        );
        let responder =
            InviteResponder::new(self.ctx.coordinator.clone(), self.ctx.config.party_channel.clone());

        self.tasks = Some(CoordinatorTasks {
            heartbeat: tokio::spawn(heartbeat.run()),
            responder: tokio::spawn(responder.run()),
        });
        tracing::info!("Coordinator tasks launched");
    }

    /// Whether the coordinator tasks have been launched.
    pub fn tasks_launched(&self) -> bool {
        self.tasks.is_some()
    }

    /// Base session state as seen by the policy.
    pub fn session_state(&self) -> SessionState {
        self.policy.session_state()
    }

    /// Shared context.
    pub fn context(&self) -> &BotContext<S, C> {
        &self.ctx
    }
}
