//! Deterministic simulation harness for party bot testing.
//!
//! In-process implementations of the [`partybot_core::SessionClient`] and
//! [`partybot_core::CoordinatorClient`] traits. They record every call the
//! bot makes, accept injected events and failures, and can be scripted to
//! behave like a live network.
//!
//! # Components
//!
//! - [`SimSession`]: Session client with an injectable event stream
//! - [`SimCoordinator`]: Coordinator client with an in-memory object cache
//! - [`SimNetwork`]: Both of the above wired to a [`NetworkScript`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
pub mod network;
pub mod sim_coordinator;
pub mod sim_session;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use error::SimError;
pub use network::{NetworkScript, SimNetwork};
pub use sim_coordinator::{CoordinatorCall, SimCoordinator};
pub use sim_session::{EventInjector, LogOnReply, SessionCall, SimSession};

/// Lock a harness mutex, ignoring poisoning from a panicked test thread.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
