//! Order Publisher Port (Driven Port)
//!
//! Interface the runtime forwards order intents through, one at a time,
//! in the order the bot produced them.

use async_trait::async_trait;

use crate::domain::trading::OrderIntent;

/// Order publish error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PublishError {
    /// Connection error.
    #[error("Order publisher connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// The downstream rejected the intent.
    #[error("Order intent rejected: {message}")]
    Rejected {
        /// Rejection details.
        message: String,
    },

    /// Intent could not be encoded for the downstream.
    #[error("Order intent serialization failed: {message}")]
    Serialization {
        /// Error details.
        message: String,
    },

    /// The publisher has shut down.
    #[error("Order publisher closed")]
    Closed,
}

impl From<serde_json::Error> for PublishError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Port for publishing order intents.
///
/// This is a driven (secondary/outbound) port. Delivery guarantees are
/// whatever the implementation provides; the runtime offers at-most-once
/// per intent per cycle.
#[async_trait]
pub trait OrderPublisherPort: Send + Sync {
    /// Forward one intent downstream.
    async fn publish(&self, intent: OrderIntent) -> Result<(), PublishError>;
}

/// Publisher that writes intents to stdout as JSON lines.
///
/// The default publisher in fresh contexts; useful for local runs where
/// no execution venue is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOrderPublisher;

#[async_trait]
impl OrderPublisherPort for StdoutOrderPublisher {
    async fn publish(&self, intent: OrderIntent) -> Result<(), PublishError> {
        let line = serde_json::to_string(&intent)?;
        println!("{line}");
        Ok(())
    }
}
