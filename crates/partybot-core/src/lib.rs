//! Core types for the party bot.
//!
//! Domain vocabulary shared by every other crate in the workspace: inbound
//! session events, coordinator cache objects, the collaborator traits the bot
//! drives, and the one piece of state that crosses task boundaries.
//!
//! # Components
//!
//! - [`InboundEvent`]: Notifications produced by the session client
//! - [`CacheEvent`]: Change notifications from the coordinator object cache
//! - [`SessionClient`] / [`CoordinatorClient`]: External collaborators
//! - [`ConnectionTracker`]: Synchronized coordinator readiness flag
//! - [`BotConfig`]: Process configuration
//!
//! Nothing here performs I/O. Transport and cache replication live behind the
//! collaborator traits so the orchestration code runs unchanged against real
//! clients and the in-process simulation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cache;
mod client;
mod config;
mod error;
mod event;
mod id;
mod tracker;

pub use cache::{
    CacheEvent, CacheEventKind, CacheEventStream, CacheObject, CacheObjectType, ChatChannelType,
    JoinedChannel, PartyInvite,
};
pub use client::{CoordinatorClient, EventStream, SessionClient, Subscription};
pub use config::{
    BotConfig, Credentials, DEFAULT_HEARTBEAT_INTERVAL, DEFAULT_SERVER_ADDR, DOTA2_APP_ID,
    PARTY_CHANNEL_NAME,
};
pub use error::ConfigError;
pub use event::{
    CoordinatorStatus, FriendRelationship, FriendStateEvent, InboundEvent, PersonaState,
};
pub use id::SteamId;
pub use tracker::ConnectionTracker;
