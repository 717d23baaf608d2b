//! Simulated session client.
//!
//! `SimSession` implements [`SessionClient`] in-process. Every call is
//! recorded so tests can assert on exactly what the bot asked the network to
//! do, and events can be injected from outside async contexts.
//!
//! By default the session is passive: it only delivers what the test injects.
//! [`SimSession::scripted`] makes it answer `connect` and `log_on` the way a
//! real network does.

use std::{
    future::Future,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use partybot_core::{Credentials, EventStream, InboundEvent, PersonaState, SessionClient, SteamId};
use tokio::sync::mpsc;

use crate::{SimError, lock};

/// A call the bot made on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    /// `connect(addr)`.
    Connect {
        /// Address requested.
        addr: String,
    },
    /// `log_on(credentials)`.
    LogOn {
        /// Account name used.
        username: String,
    },
    /// `set_persona_state(state)`.
    SetPersonaState(PersonaState),
    /// `set_games_played(app_id)`.
    SetGamesPlayed(u32),
    /// `add_friend(steam_id)`.
    AddFriend(SteamId),
}

/// How a scripted session answers a log-on request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOnReply {
    /// Emit nothing; the test drives the outcome.
    Silent,
    /// Emit [`InboundEvent::LoggedOn`].
    Accept,
    /// Emit [`InboundEvent::LogOnFailed`] with this reason.
    Reject(String),
}

/// Cloneable handle for pushing events into a session's stream.
#[derive(Debug, Clone)]
pub struct EventInjector {
    tx: mpsc::UnboundedSender<InboundEvent>,
}

impl EventInjector {
    /// Push an event. Returns `false` if the stream has been dropped.
    pub fn inject(&self, event: InboundEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// In-process session client.
pub struct SimSession {
    injector: EventInjector,
    events: Mutex<Option<EventStream>>,
    calls: Mutex<Vec<SessionCall>>,
    emit_connected: bool,
    log_on_reply: LogOnReply,
    connect_error: Mutex<Option<String>>,
    fail_requests: AtomicBool,
}

impl Default for SimSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SimSession {
    /// Passive session: delivers only injected events.
    pub fn new() -> Self {
        Self::build(false, LogOnReply::Silent)
    }

    /// Session that answers like a network: `connect` emits
    /// [`InboundEvent::Connected`] and `log_on` emits `reply`.
    pub fn scripted(reply: LogOnReply) -> Self {
        Self::build(true, reply)
    }

    fn build(emit_connected: bool, reply: LogOnReply) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            injector: EventInjector { tx },
            events: Mutex::new(Some(rx)),
            calls: Mutex::new(Vec::new()),
            emit_connected,
            log_on_reply: reply,
            connect_error: Mutex::new(None),
            fail_requests: AtomicBool::new(false),
        }
    }

    /// Push an event into the stream.
    pub fn inject(&self, event: InboundEvent) -> bool {
        self.injector.inject(event)
    }

    /// Handle for pushing events from other components.
    pub fn injector(&self) -> EventInjector {
        self.injector.clone()
    }

    /// Make `connect` fail with `reason`.
    pub fn fail_connect(&self, reason: impl Into<String>) {
        *lock(&self.connect_error) = Some(reason.into());
    }

    /// Make every fire-and-forget request fail (calls are still recorded).
    pub fn fail_requests(&self, fail: bool) {
        self.fail_requests.store(fail, Ordering::SeqCst);
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<SessionCall> {
        lock(&self.calls).clone()
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&SessionCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|call| predicate(call)).count()
    }

    /// Number of log-on requests so far.
    pub fn log_on_count(&self) -> usize {
        self.count(|call| matches!(call, SessionCall::LogOn { .. }))
    }

    fn record(&self, call: SessionCall) -> Result<(), SimError> {
        tracing::trace!(?call, "sim session call");
        lock(&self.calls).push(call);
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(SimError::new("request rejected"));
        }
        Ok(())
    }
}

impl SessionClient for SimSession {
    type Error = SimError;

    fn connect(&self, addr: &str) -> impl Future<Output = Result<(), Self::Error>> + Send {
        lock(&self.calls).push(SessionCall::Connect { addr: addr.to_string() });

        let result = match lock(&self.connect_error).clone() {
            Some(reason) => Err(SimError(reason)),
            None => {
                if self.emit_connected {
                    self.inject(InboundEvent::Connected);
                }
                Ok(())
            },
        };
        std::future::ready(result)
    }

    fn take_events(&self) -> Option<EventStream> {
        lock(&self.events).take()
    }

    fn log_on(&self, credentials: &Credentials) -> Result<(), Self::Error> {
        self.record(SessionCall::LogOn { username: credentials.username.clone() })?;

        match &self.log_on_reply {
            LogOnReply::Silent => {},
            LogOnReply::Accept => {
                self.inject(InboundEvent::LoggedOn);
            },
            LogOnReply::Reject(reason) => {
                self.inject(InboundEvent::LogOnFailed { reason: reason.clone() });
            },
        }
        Ok(())
    }

    fn set_persona_state(&self, state: PersonaState) -> Result<(), Self::Error> {
        self.record(SessionCall::SetPersonaState(state))
    }

    fn set_games_played(&self, app_id: u32) -> Result<(), Self::Error> {
        self.record(SessionCall::SetGamesPlayed(app_id))
    }

    fn add_friend(&self, steam_id: SteamId) -> Result<(), Self::Error> {
        self.record(SessionCall::AddFriend(steam_id))
    }
}
