//! Coordinator heartbeat.
//!
//! While the tracker reports the coordinator as not ready, send one hello per
//! interval. Hellos are fire-and-forget: a failed send looks the same as an
//! unanswered one and is simply retried on the next tick.

use std::{sync::Arc, time::Duration};

use partybot_core::{ConnectionTracker, CoordinatorClient, DEFAULT_HEARTBEAT_INTERVAL};
use tokio::time::MissedTickBehavior;

/// Periodic coordinator hello loop.
pub struct Heartbeat<C> {
    coordinator: Arc<C>,
    tracker: Arc<ConnectionTracker>,
    interval: Duration,
}

impl<C: CoordinatorClient> Heartbeat<C> {
    /// Create a heartbeat probing every `interval`.
    ///
    /// A zero interval falls back to [`DEFAULT_HEARTBEAT_INTERVAL`].
    pub fn new(coordinator: Arc<C>, tracker: Arc<ConnectionTracker>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            tracing::warn!(
                default_ms = DEFAULT_HEARTBEAT_INTERVAL.as_millis() as u64,
                "Zero heartbeat interval, using default"
            );
            DEFAULT_HEARTBEAT_INTERVAL
        } else {
            interval
        };
        Self { coordinator, tracker, interval }
    }

    /// Run one probe. Returns `true` if a hello was sent.
    pub fn tick(&self) -> bool {
        if self.tracker.is_ready() {
            return false;
        }

        if let Err(e) = self.coordinator.send_hello() {
            tracing::debug!(error = %e, "Coordinator hello failed");
        }
        true
    }

    /// Probe forever.
    ///
    /// The first probe runs immediately. Ticks missed while the task was not
    /// scheduled are skipped rather than burst, so there is never more than
    /// one hello per interval.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "Heartbeat started");
        loop {
            interval.tick().await;
            if self.tick() {
                tracing::trace!("Coordinator not ready, sent hello");
            }
        }
    }
}
