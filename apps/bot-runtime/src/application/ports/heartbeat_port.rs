//! Heartbeat Port (Driven Port)
//!
//! Outbound liveness channel. The runtime publishes on a fixed interval
//! while the loop is alive.

use async_trait::async_trait;

use crate::domain::heartbeat::HeartbeatPayload;

/// Heartbeat publish error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HeartbeatError {
    /// Connection error.
    #[error("Heartbeat connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Payload could not be encoded for the downstream.
    #[error("Heartbeat serialization failed: {message}")]
    Serialization {
        /// Error details.
        message: String,
    },

    /// The sink has shut down.
    #[error("Heartbeat sink closed")]
    Closed,
}

impl From<serde_json::Error> for HeartbeatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Port for publishing heartbeats.
///
/// This is a driven (secondary/outbound) port.
#[async_trait]
pub trait HeartbeatPort: Send + Sync {
    /// Publish one liveness payload.
    async fn publish(&self, payload: HeartbeatPayload) -> Result<(), HeartbeatError>;
}

/// Heartbeat sink that discards payloads.
///
/// The default sink in fresh contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpHeartbeatSink;

#[async_trait]
impl HeartbeatPort for NoOpHeartbeatSink {
    async fn publish(&self, _payload: HeartbeatPayload) -> Result<(), HeartbeatError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::heartbeat::{HealthReport, HeartbeatStats};
    use crate::domain::runtime::RuntimeStats;
    use crate::domain::shared::{AccountId, BotId};

    #[tokio::test]
    async fn no_op_sink_accepts_payloads() {
        let sink = NoOpHeartbeatSink;
        let payload = HeartbeatPayload {
            bot_id: BotId::new("bot-1"),
            account_id: AccountId::new("acct-1"),
            status: HealthReport::healthy(),
            stats: HeartbeatStats::from(&RuntimeStats::new()),
        };

        let result = sink.publish(payload).await;
        assert!(result.is_ok());
    }
}
