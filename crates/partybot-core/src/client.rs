//! External collaborator traits.
//!
//! The [`SessionClient`] and [`CoordinatorClient`] traits decouple the bot's
//! orchestration from the transport and cache replication implementations.
//! Production clients speak the real network protocol; the simulation harness
//! implements the same traits in-process so the same orchestration code runs
//! in both.
//!
//! Fire-and-forget operations are synchronous and only enqueue a request.
//! Operations that wait for a response return a future.

use std::{fmt, future::Future};

use tokio::sync::mpsc;

use crate::{
    CacheEventStream, CacheObjectType, ChatChannelType, Credentials, InboundEvent, JoinedChannel,
    PersonaState, SteamId,
};

/// Receiving half of the session event sequence.
pub type EventStream = mpsc::UnboundedReceiver<InboundEvent>;

/// Base network session.
///
/// # Associated Types
///
/// - [`Error`](SessionClient::Error): Client-specific error type
pub trait SessionClient: Send + Sync + 'static {
    /// Client-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open the transport connection to `addr` (`host:port`).
    ///
    /// Success is also reported as [`InboundEvent::Connected`] on the event
    /// stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be reached.
    fn connect(&self, addr: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Take the event stream.
    ///
    /// The stream is unbounded, lives as long as the client and cannot be
    /// restarted: only the first call returns `Some`.
    fn take_events(&self) -> Option<EventStream>;

    /// Request authentication with `credentials`.
    fn log_on(&self, credentials: &Credentials) -> Result<(), Self::Error>;

    /// Advertise a presence state.
    fn set_persona_state(&self, state: PersonaState) -> Result<(), Self::Error>;

    /// Declare the game currently being played.
    fn set_games_played(&self, app_id: u32) -> Result<(), Self::Error>;

    /// Add `steam_id` as a friend, accepting a pending request.
    fn add_friend(&self, steam_id: SteamId) -> Result<(), Self::Error>;
}

/// Game coordinator session layered on a [`SessionClient`].
pub trait CoordinatorClient: Send + Sync + 'static {
    /// Client-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a hello to (re-)establish the coordinator session.
    fn send_hello(&self) -> Result<(), Self::Error>;

    /// Subscribe to cache notifications for one object type.
    ///
    /// Notifications flow until the returned [`Subscription`] is dropped.
    fn subscribe(
        &self,
        object_type: CacheObjectType,
    ) -> Result<(CacheEventStream, Subscription), Self::Error>;

    /// Accept or decline a party invitation.
    fn respond_party_invite(&self, group_id: u64, accept: bool) -> Result<(), Self::Error>;

    /// Mark the bot account as coach of its party.
    fn set_member_party_coach(&self, coach: bool) -> Result<(), Self::Error>;

    /// Join a chat channel and wait for the coordinator's answer.
    fn join_chat_channel(
        &self,
        name: &str,
        channel_type: ChatChannelType,
    ) -> impl Future<Output = Result<JoinedChannel, Self::Error>> + Send;
}

/// Handle keeping a cache subscription alive.
///
/// Dropping the handle (or calling [`Subscription::unsubscribe`]) runs the
/// collaborator's unsubscribe hook exactly once.
pub struct Subscription {
    on_drop: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Subscription that runs `unsubscribe` when released.
    pub fn new(unsubscribe: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { on_drop: Some(Box::new(unsubscribe)) }
    }

    /// Subscription with nothing to release.
    pub fn detached() -> Self {
        Self { on_drop: None }
    }

    /// Release the subscription now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.on_drop.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.on_drop.is_some()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[test]
    fn unsubscribe_hook_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        subscription.unsubscribe();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_releases_subscription() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        {
            let _subscription = Subscription::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn detached_subscription_is_inactive() {
        let subscription = Subscription::detached();

        assert_eq!(format!("{subscription:?}"), "Subscription { active: false }");
        subscription.unsubscribe();
    }
}
