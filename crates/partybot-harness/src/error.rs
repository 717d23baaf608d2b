//! Simulation error type.

use thiserror::Error;

/// Error returned by the simulated collaborators when a failure is injected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("simulated failure: {0}")]
pub struct SimError(pub String);

impl SimError {
    /// Create an error with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
