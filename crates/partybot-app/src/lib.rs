//! Application layer for the party bot
//!
//! Event-reaction policy and the three long-running loops that drive the bot:
//! session event dispatch, coordinator heartbeat and party invite handling.
//! Everything is generic over the collaborator traits from
//! [`partybot_core`], so the same code runs against real clients and the
//! simulation harness.
//!
//! # Components
//!
//! - [`Policy`]: Pure state machine mapping session events to actions
//! - [`Dispatcher`]: Executes policy actions and launches coordinator tasks
//! - [`Heartbeat`]: Sends coordinator hellos while the coordinator is down
//! - [`InviteResponder`]: Accepts party invites from the object cache
//! - [`Bot`]: Startup glue tying the above together

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod context;
mod dispatcher;
mod error;
mod heartbeat;
mod policy;
mod responder;
mod runtime;

pub use action::{BotAction, LogLevel};
pub use context::BotContext;
pub use dispatcher::Dispatcher;
pub use error::BotError;
pub use heartbeat::Heartbeat;
pub use policy::{Policy, SessionState};
pub use responder::InviteResponder;
pub use runtime::Bot;
