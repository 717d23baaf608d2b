//! Session events.
//!
//! [`InboundEvent`] is everything the session client can report: transport
//! connectivity, authentication outcome, coordinator session status, social
//! notifications and errors. Events are immutable once produced and each one
//! is consumed exactly once by the dispatcher.

use std::fmt;

use crate::SteamId;

/// Notifications emitted by the session client.
///
/// The enum is `#[non_exhaustive]`: the client may grow new notification
/// kinds, and consumers must ignore the ones they do not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InboundEvent {
    /// Transport connection to the network is established.
    Connected,

    /// Authentication succeeded.
    LoggedOn,

    /// Authentication was rejected. Unrecoverable.
    LogOnFailed {
        /// Result reported by the network.
        reason: String,
    },

    /// The session hit an unrecoverable error.
    FatalError {
        /// Error description.
        reason: String,
    },

    /// The network ended the authenticated session.
    LoggedOff {
        /// Result reported by the network.
        reason: String,
    },

    /// Transport connection was lost.
    Disconnected,

    /// The game coordinator answered a hello: its session is established.
    CoordinatorWelcome,

    /// The game coordinator session status changed.
    CoordinatorStatusChanged {
        /// Status before the change.
        old: CoordinatorStatus,
        /// Status after the change.
        new: CoordinatorStatus,
    },

    /// A chat message arrived.
    ChatMessage {
        /// Sender of the message.
        from: SteamId,
        /// Message text.
        message: String,
    },

    /// A friend relationship changed.
    FriendState(FriendStateEvent),

    /// A non-fatal error reported by the session client.
    Error {
        /// Error description.
        message: String,
    },
}

impl InboundEvent {
    /// Short, stable name of the variant, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::LoggedOn => "logged_on",
            Self::LogOnFailed { .. } => "log_on_failed",
            Self::FatalError { .. } => "fatal_error",
            Self::LoggedOff { .. } => "logged_off",
            Self::Disconnected => "disconnected",
            Self::CoordinatorWelcome => "coordinator_welcome",
            Self::CoordinatorStatusChanged { .. } => "coordinator_status_changed",
            Self::ChatMessage { .. } => "chat_message",
            Self::FriendState(_) => "friend_state",
            Self::Error { .. } => "error",
        }
    }

    /// Whether the event ends the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::LogOnFailed { .. } | Self::FatalError { .. })
    }
}

/// Friend relationship change for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendStateEvent {
    /// Account whose relationship changed.
    pub steam_id: SteamId,
    /// New relationship.
    pub relationship: FriendRelationship,
}

impl FriendStateEvent {
    /// Whether the account is already on the friend list.
    pub fn is_friend(&self) -> bool {
        self.relationship == FriendRelationship::Friend
    }
}

/// Relationship between the bot account and another account.
///
/// Discriminants match the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FriendRelationship {
    /// No relationship (friend removed or request withdrawn).
    None = 0,
    /// The account is blocked.
    Blocked = 1,
    /// The account sent us a friend request.
    RequestRecipient = 2,
    /// Mutual friends.
    Friend = 3,
    /// We sent the account a friend request.
    RequestInitiator = 4,
    /// The account is ignored.
    Ignored = 5,
    /// The account is an ignored friend.
    IgnoredFriend = 6,
}

impl FriendRelationship {
    /// Decode a wire value. `None` for unknown values.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Blocked),
            2 => Some(Self::RequestRecipient),
            3 => Some(Self::Friend),
            4 => Some(Self::RequestInitiator),
            5 => Some(Self::Ignored),
            6 => Some(Self::IgnoredFriend),
            _ => None,
        }
    }
}

/// Game coordinator session status.
///
/// Discriminants match the wire values. Only [`CoordinatorStatus::HaveSession`]
/// means the coordinator session is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CoordinatorStatus {
    /// Session established.
    HaveSession = 0,
    /// The coordinator is shutting down.
    GcGoingDown = 1,
    /// No session.
    NoSession = 2,
    /// Waiting in the coordinator logon queue.
    NoSessionInLogonQueue = 3,
    /// The base network session is gone.
    NoSteam = 4,
    /// Account suspended from the coordinator.
    Suspended = 5,
    /// The base network is shutting down.
    SteamGoingDown = 6,
}

impl CoordinatorStatus {
    /// Decode a wire value. `None` for unknown values.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::HaveSession),
            1 => Some(Self::GcGoingDown),
            2 => Some(Self::NoSession),
            3 => Some(Self::NoSessionInLogonQueue),
            4 => Some(Self::NoSteam),
            5 => Some(Self::Suspended),
            6 => Some(Self::SteamGoingDown),
            _ => None,
        }
    }

    /// Whether the coordinator session is established.
    pub fn has_session(self) -> bool {
        self == Self::HaveSession
    }
}

impl fmt::Display for CoordinatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HaveSession => "have_session",
            Self::GcGoingDown => "gc_going_down",
            Self::NoSession => "no_session",
            Self::NoSessionInLogonQueue => "no_session_in_logon_queue",
            Self::NoSteam => "no_steam",
            Self::Suspended => "suspended",
            Self::SteamGoingDown => "steam_going_down",
        };
        f.write_str(name)
    }
}

/// Presence advertised to friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PersonaState {
    /// Appear offline.
    Offline = 0,
    /// Online.
    Online = 1,
    /// Busy.
    Busy = 2,
    /// Away.
    Away = 3,
    /// Snooze.
    Snooze = 4,
    /// Looking to trade.
    LookingToTrade = 5,
    /// Looking to play.
    LookingToPlay = 6,
    /// Online but hidden.
    Invisible = 7,
}
