//! Runtime statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters maintained by the iteration loop.
///
/// Written only by the loop itself; other tasks observe snapshots via
/// [`RuntimeHandle::stats`](crate::application::RuntimeHandle::stats).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeStats {
    /// Completed successful iterations.
    pub ticks: u64,
    /// Order intents forwarded to the publisher.
    pub orders_published: u64,
    /// Failed cycles since the last successful one.
    pub consecutive_errors: u32,
    /// Most recent cycle failure. Sticky: a later success does not clear it.
    pub last_error: Option<String>,
    /// When the last heartbeat publish was attempted.
    pub last_heartbeat_at: Option<DateTime<Utc>>,
}

impl RuntimeStats {
    /// Create zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful cycle.
    ///
    /// Resets the consecutive-error streak; `last_error` keeps the most
    /// recent failure for postmortems.
    pub const fn record_tick(&mut self) {
        self.ticks += 1;
        self.consecutive_errors = 0;
    }

    /// Record one order intent forwarded to the publisher.
    pub const fn record_published(&mut self) {
        self.orders_published += 1;
    }

    /// Record a failed cycle and return the new streak length.
    pub fn record_failure(&mut self, error: &impl fmt::Display) -> u32 {
        self.consecutive_errors += 1;
        self.last_error = Some(error.to_string());
        self.consecutive_errors
    }

    /// Record a heartbeat publish attempt.
    pub const fn record_heartbeat(&mut self, at: DateTime<Utc>) {
        self.last_heartbeat_at = Some(at);
    }
}
