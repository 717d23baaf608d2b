//! Coordinator readiness flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the game coordinator session is established.
///
/// Written by the dispatcher when it observes welcome, status or log-on
/// events; read by the heartbeat on every tick. The flag may lag the real
/// coordinator state by up to one heartbeat interval.
#[derive(Debug, Default)]
pub struct ConnectionTracker {
    coordinator_ready: AtomicBool,
}

impl ConnectionTracker {
    /// New tracker, not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record coordinator readiness. Any value is accepted.
    pub fn set_ready(&self, ready: bool) {
        self.coordinator_ready.store(ready, Ordering::Release);
    }

    /// Current coordinator readiness.
    pub fn is_ready(&self) -> bool {
        self.coordinator_ready.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn starts_not_ready() {
        assert!(!ConnectionTracker::new().is_ready());
    }

    #[test]
    fn last_write_wins() {
        let tracker = ConnectionTracker::new();

        tracker.set_ready(true);
        tracker.set_ready(true);
        assert!(tracker.is_ready());

        tracker.set_ready(false);
        assert!(!tracker.is_ready());
    }

    #[test]
    fn visible_across_threads() {
        let tracker = Arc::new(ConnectionTracker::new());
        let writer = Arc::clone(&tracker);

        let handle = std::thread::spawn(move || writer.set_ready(true));
        assert!(handle.join().is_ok());

        assert!(tracker.is_ready());
    }
}
