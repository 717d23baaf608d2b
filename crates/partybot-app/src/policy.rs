//! Event reaction policy.
//!
//! This module defines the [`Policy`] state machine, which classifies every
//! [`InboundEvent`] and decides what the bot does about it. It performs no
//! I/O: it consumes events and produces [`BotAction`] instructions for the
//! [`crate::Dispatcher`] to execute.
//!
//! # Reactions
//!
//! | Event | Actions |
//! |---|---|
//! | connected | log on |
//! | logged on | go online, declare the game, mark coordinator not ready, launch coordinator tasks |
//! | log-on failure, fatal error | terminate |
//! | coordinator welcome | mark coordinator ready |
//! | coordinator status | mark ready iff the new status has a session |
//! | friend request (not yet friends) | accept |
//! | logged off, chat, friend removed, error | log only |
//! | anything else | ignored |

use partybot_core::{FriendRelationship, FriendStateEvent, InboundEvent, PersonaState};

use crate::{BotAction, LogLevel};

/// Base session state as observed through events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No transport connection.
    Disconnected,
    /// Transport connected, not authenticated.
    Connected,
    /// Authenticated.
    LoggedOn,
}

/// Event reaction state machine.
///
/// Pure state machine that processes events and produces actions.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Game declared as played after log-on.
    app_id: u32,
    /// Session state.
    state: SessionState,
    /// Number of successful log-ons observed.
    log_ons: u64,
}

impl Policy {
    /// Create a policy declaring `app_id` after log-on.
    pub fn new(app_id: u32) -> Self {
        Self { app_id, state: SessionState::Disconnected, log_ons: 0 }
    }

    /// Process an event and return actions.
    pub fn react(&mut self, event: &InboundEvent) -> Vec<BotAction> {
        match event {
            InboundEvent::Connected => {
                self.state = SessionState::Connected;
                vec![BotAction::log(LogLevel::Info, "Connected, logging on"), BotAction::LogOn]
            },
            InboundEvent::LoggedOn => {
                self.state = SessionState::LoggedOn;
                self.log_ons += 1;
                vec![
                    BotAction::log(LogLevel::Info, "Logged on"),
                    BotAction::SetPersona(PersonaState::Online),
                    BotAction::SetGamesPlayed { app_id: self.app_id },
                    BotAction::SetCoordinatorReady(false),
                    BotAction::LaunchCoordinatorTasks,
                ]
            },
            InboundEvent::LogOnFailed { reason } => {
                vec![BotAction::Terminate { reason: format!("log-on failed: {reason}") }]
            },
            InboundEvent::FatalError { reason } => {
                vec![BotAction::Terminate { reason: format!("fatal session error: {reason}") }]
            },
            InboundEvent::LoggedOff { reason } => {
                self.state = SessionState::Connected;
                vec![BotAction::log(LogLevel::Info, format!("Logged off: {reason}"))]
            },
            InboundEvent::Disconnected => {
                self.state = SessionState::Disconnected;
                vec![BotAction::log(LogLevel::Info, "Disconnected")]
            },
            InboundEvent::CoordinatorWelcome => {
                vec![
                    BotAction::log(LogLevel::Info, "Coordinator welcomed us"),
                    BotAction::SetCoordinatorReady(true),
                ]
            },
            InboundEvent::CoordinatorStatusChanged { old, new } => {
                vec![
                    BotAction::log(LogLevel::Debug, format!("Coordinator status {old} -> {new}")),
                    BotAction::SetCoordinatorReady(new.has_session()),
                ]
            },
            InboundEvent::ChatMessage { from, message } => {
                vec![BotAction::log(LogLevel::Info, format!("Chat from {from}: {message}"))]
            },
            InboundEvent::FriendState(friend) => self.react_to_friend(friend),
            InboundEvent::Error { message } => {
                vec![BotAction::log(LogLevel::Warn, format!("Error: {message}"))]
            },
            other => {
                vec![BotAction::log(LogLevel::Trace, format!("Ignoring {} event", other.kind()))]
            },
        }
    }

    fn react_to_friend(&self, friend: &FriendStateEvent) -> Vec<BotAction> {
        let steam_id = friend.steam_id;
        match friend.relationship {
            FriendRelationship::None => {
                vec![BotAction::log(LogLevel::Info, format!("Friend removed: {steam_id}"))]
            },
            FriendRelationship::RequestRecipient if !friend.is_friend() => vec![
                BotAction::log(LogLevel::Info, format!("New friend request: {steam_id}")),
                BotAction::AcceptFriend { steam_id },
            ],
            _ => vec![],
        }
    }

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        self.state
    }

    /// Number of successful log-ons observed so far.
    pub fn log_on_count(&self) -> u64 {
        self.log_ons
    }
}
