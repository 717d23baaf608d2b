//! Coordinator object cache notifications.
//!
//! The coordinator replicates typed objects (parties, lobbies, invites) to the
//! client. Replication itself is owned by the coordinator client; the bot only
//! observes change notifications for the types it subscribes to.

use tokio::sync::mpsc;

use crate::SteamId;

/// Receiving half of a cache subscription.
pub type CacheEventStream = mpsc::UnboundedReceiver<CacheEvent>;

/// Object types replicated by the coordinator cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheObjectType {
    /// Party the account belongs to.
    Party,
    /// Lobby the account belongs to.
    Lobby,
    /// Pending invitation to join a party.
    PartyInvite,
    /// Pending invitation to join a lobby.
    LobbyInvite,
}

impl CacheObjectType {
    /// Numeric type id used by the cache protocol.
    pub fn type_id(self) -> u32 {
        match self {
            Self::Party => 2003,
            Self::Lobby => 2004,
            Self::PartyInvite => 2006,
            Self::LobbyInvite => 2011,
        }
    }

    /// Decode a numeric type id. `None` for types the bot does not model.
    pub fn from_type_id(type_id: u32) -> Option<Self> {
        match type_id {
            2003 => Some(Self::Party),
            2004 => Some(Self::Lobby),
            2006 => Some(Self::PartyInvite),
            2011 => Some(Self::LobbyInvite),
            _ => None,
        }
    }
}

/// What happened to a cached object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEventKind {
    /// Object was added to the cache.
    Create,
    /// Object was modified.
    Update,
    /// Object was removed.
    Destroy,
}

/// Payload carried by a cache notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheObject {
    /// A party invitation.
    PartyInvite(PartyInvite),
    /// Any object the bot does not model, identified by its type id.
    Other {
        /// Numeric cache type id.
        type_id: u32,
    },
}

/// One change notification from the object cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEvent {
    /// Kind of change.
    pub kind: CacheEventKind,
    /// Affected object.
    pub object: CacheObject,
}

impl CacheEvent {
    /// Notification that `object` was created.
    pub fn created(object: CacheObject) -> Self {
        Self { kind: CacheEventKind::Create, object }
    }

    /// Notification that `object` was updated.
    pub fn updated(object: CacheObject) -> Self {
        Self { kind: CacheEventKind::Update, object }
    }

    /// Notification that `object` was destroyed.
    pub fn destroyed(object: CacheObject) -> Self {
        Self { kind: CacheEventKind::Destroy, object }
    }
}

/// Invitation to join a party. Owned by the cache; read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyInvite {
    /// Party group the invitation is for.
    pub group_id: u64,
    /// Account that sent the invitation.
    pub sender_id: SteamId,
    /// Display name of the sender.
    pub sender_name: String,
}

/// Chat channel categories understood by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChatChannelType {
    /// User-created channel.
    Custom = 1,
    /// Channel of the current party.
    Party = 2,
    /// Channel of the current lobby.
    Lobby = 3,
    /// Team channel.
    Team = 4,
    /// Guild channel.
    Guild = 5,
    /// Regional channel.
    Regional = 12,
    /// Private conversation.
    Private = 13,
}

/// Coordinator answer to a successful channel join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedChannel {
    /// Coordinator-assigned channel id.
    pub channel_id: u64,
    /// Name of the joined channel.
    pub channel_name: String,
}
