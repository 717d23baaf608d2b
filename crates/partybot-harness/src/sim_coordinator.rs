//! Simulated game coordinator client.
//!
//! `SimCoordinator` implements [`CoordinatorClient`] in-process. It records
//! every call, fans published cache events out to subscribers, and can answer
//! hellos with a welcome on the session's event stream after a configurable
//! number of attempts.
//!
//! Cache events published while nobody is subscribed to their type are held
//! and delivered to the first subscriber, the way a real cache replays its
//! existing objects as creations when a subscription starts.

use std::{
    collections::HashMap,
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use partybot_core::{
    CacheEvent, CacheEventStream, CacheObject, CacheObjectType, ChatChannelType,
    CoordinatorClient, CoordinatorStatus, InboundEvent, JoinedChannel, PartyInvite, Subscription,
};
use tokio::sync::mpsc;

use crate::{EventInjector, SimError, lock};

/// A call the bot made on the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorCall {
    /// `send_hello()`.
    SendHello,
    /// `subscribe(object_type)`.
    Subscribe(CacheObjectType),
    /// `respond_party_invite(group_id, accept)`.
    RespondPartyInvite {
        /// Party group.
        group_id: u64,
        /// Whether the invite was accepted.
        accept: bool,
    },
    /// `set_member_party_coach(coach)`.
    SetMemberPartyCoach(bool),
    /// `join_chat_channel(name, channel_type)`.
    JoinChatChannel {
        /// Channel name.
        name: String,
        /// Channel type.
        channel_type: ChatChannelType,
    },
}

/// Subscriber registry shared with [`Subscription`] release hooks.
#[derive(Default)]
struct Cache {
    next_id: u64,
    subscribers: HashMap<u64, (CacheObjectType, mpsc::UnboundedSender<CacheEvent>)>,
    held: HashMap<CacheObjectType, Vec<CacheEvent>>,
}

/// Welcome behavior: emit a welcome after `after` unanswered hellos.
struct Welcome {
    session: EventInjector,
    after: u64,
    pending_hellos: u64,
    /// Run once, right after the first welcome.
    on_first: Option<Box<dyn FnOnce(&SimCoordinator) + Send>>,
}

/// In-process coordinator client.
pub struct SimCoordinator {
    calls: Mutex<Vec<CoordinatorCall>>,
    cache: Arc<Mutex<Cache>>,
    welcome: Mutex<Option<Welcome>>,
    next_channel_id: AtomicU64,
    fail_hello: AtomicBool,
    fail_subscribe: AtomicBool,
    fail_respond: AtomicBool,
    fail_join: AtomicBool,
}

impl Default for SimCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SimCoordinator {
    /// Coordinator that never answers hellos.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            cache: Arc::new(Mutex::new(Cache::default())),
            welcome: Mutex::new(None),
            next_channel_id: AtomicU64::new(1),
            fail_hello: AtomicBool::new(false),
            fail_subscribe: AtomicBool::new(false),
            fail_respond: AtomicBool::new(false),
            fail_join: AtomicBool::new(false),
        }
    }

    /// Answer every `after`-th hello with [`InboundEvent::CoordinatorWelcome`]
    /// on `session`.
    ///
    /// `after` is clamped to at least one.
    #[must_use]
    pub fn with_welcome(self, session: EventInjector, after: u64) -> Self {
        *lock(&self.welcome) =
            Some(Welcome { session, after: after.max(1), pending_hellos: 0, on_first: None });
        self
    }

    /// Run `hook` once, right after the first welcome is sent.
    ///
    /// Has no effect unless [`SimCoordinator::with_welcome`] was called first.
    #[must_use]
    pub fn on_first_welcome(self, hook: impl FnOnce(&SimCoordinator) + Send + 'static) -> Self {
        if let Some(welcome) = lock(&self.welcome).as_mut() {
            welcome.on_first = Some(Box::new(hook));
        }
        self
    }

    /// Report the coordinator session as lost on the session stream.
    pub fn drop_session(&self, session: &EventInjector) -> bool {
        session.inject(InboundEvent::CoordinatorStatusChanged {
            old: CoordinatorStatus::HaveSession,
            new: CoordinatorStatus::NoSession,
        })
    }

    /// Publish a cache event for `object_type`.
    ///
    /// Returns the number of subscribers it reached. With no subscriber the
    /// event is held for the first one.
    pub fn publish(&self, object_type: CacheObjectType, event: CacheEvent) -> usize {
        let mut cache = lock(&self.cache);
        cache.subscribers.retain(|_, (_, tx)| !tx.is_closed());

        let mut delivered = 0;
        for (subscribed, tx) in cache.subscribers.values() {
            if *subscribed == object_type && tx.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        if delivered == 0 {
            cache.held.entry(object_type).or_default().push(event);
        }
        delivered
    }

    /// Publish the creation of a party invite.
    pub fn publish_invite(&self, invite: PartyInvite) -> usize {
        self.publish(
            CacheObjectType::PartyInvite,
            CacheEvent::created(CacheObject::PartyInvite(invite)),
        )
    }

    /// Number of live subscriptions for `object_type`.
    pub fn subscriber_count(&self, object_type: CacheObjectType) -> usize {
        lock(&self.cache)
            .subscribers
            .values()
            .filter(|(subscribed, tx)| *subscribed == object_type && !tx.is_closed())
            .count()
    }

    /// Make `send_hello` fail (calls are still recorded).
    pub fn fail_hello(&self, fail: bool) {
        self.fail_hello.store(fail, Ordering::SeqCst);
    }

    /// Make `subscribe` fail.
    pub fn fail_subscribe(&self, fail: bool) {
        self.fail_subscribe.store(fail, Ordering::SeqCst);
    }

    /// Make `respond_party_invite` and `set_member_party_coach` fail.
    pub fn fail_respond(&self, fail: bool) {
        self.fail_respond.store(fail, Ordering::SeqCst);
    }

    /// Make `join_chat_channel` fail.
    pub fn fail_join(&self, fail: bool) {
        self.fail_join.store(fail, Ordering::SeqCst);
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<CoordinatorCall> {
        lock(&self.calls).clone()
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&CoordinatorCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|call| predicate(call)).count()
    }

    /// Number of hellos so far.
    pub fn hello_count(&self) -> usize {
        self.count(|call| *call == CoordinatorCall::SendHello)
    }

    /// Calls other than hellos, in order.
    pub fn party_calls(&self) -> Vec<CoordinatorCall> {
        lock(&self.calls)
            .iter()
            .filter(|call| !matches!(call, CoordinatorCall::SendHello | CoordinatorCall::Subscribe(_)))
            .cloned()
            .collect()
    }

    fn record(&self, call: CoordinatorCall) {
        tracing::trace!(?call, "sim coordinator call");
        lock(&self.calls).push(call);
    }

    fn answer_hello(&self) {
        let first_hook = {
            let mut welcome = lock(&self.welcome);
            let Some(welcome) = welcome.as_mut() else {
                return;
            };

            welcome.pending_hellos += 1;
            if welcome.pending_hellos < welcome.after {
                return;
            }
            welcome.pending_hellos = 0;
            welcome.session.inject(InboundEvent::CoordinatorWelcome);
            welcome.on_first.take()
        };

        if let Some(hook) = first_hook {
            hook(self);
        }
    }
}

impl CoordinatorClient for SimCoordinator {
    type Error = SimError;

    fn send_hello(&self) -> Result<(), Self::Error> {
        self.record(CoordinatorCall::SendHello);
        if self.fail_hello.load(Ordering::SeqCst) {
            return Err(SimError::new("hello not delivered"));
        }
        self.answer_hello();
        Ok(())
    }

    fn subscribe(
        &self,
        object_type: CacheObjectType,
    ) -> Result<(CacheEventStream, Subscription), Self::Error> {
        self.record(CoordinatorCall::Subscribe(object_type));
        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(SimError::new("cache unavailable"));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut cache = lock(&self.cache);
            // Cannot fail: `rx` is still alive.
            for event in cache.held.remove(&object_type).unwrap_or_default() {
                let _ = tx.send(event);
            }
            let id = cache.next_id;
            cache.next_id += 1;
            cache.subscribers.insert(id, (object_type, tx));
            id
        };

        let cache = Arc::clone(&self.cache);
        let subscription = Subscription::new(move || {
            lock(&cache).subscribers.remove(&id);
        });
        Ok((rx, subscription))
    }

    fn respond_party_invite(&self, group_id: u64, accept: bool) -> Result<(), Self::Error> {
        self.record(CoordinatorCall::RespondPartyInvite { group_id, accept });
        if self.fail_respond.load(Ordering::SeqCst) {
            return Err(SimError::new("invite expired"));
        }
        Ok(())
    }

    fn set_member_party_coach(&self, coach: bool) -> Result<(), Self::Error> {
        self.record(CoordinatorCall::SetMemberPartyCoach(coach));
        if self.fail_respond.load(Ordering::SeqCst) {
            return Err(SimError::new("not in a party"));
        }
        Ok(())
    }

    fn join_chat_channel(
        &self,
        name: &str,
        channel_type: ChatChannelType,
    ) -> impl Future<Output = Result<JoinedChannel, Self::Error>> + Send {
        self.record(CoordinatorCall::JoinChatChannel { name: name.to_string(), channel_type });

        let result = if self.fail_join.load(Ordering::SeqCst) {
            Err(SimError::new("channel join timed out"))
        } else {
            Ok(JoinedChannel {
                channel_id: self.next_channel_id.fetch_add(1, Ordering::SeqCst),
                channel_name: name.to_string(),
            })
        };
        std::future::ready(result)
    }
}
