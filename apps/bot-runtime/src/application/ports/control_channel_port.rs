//! Control Channel Port (Driven Port)
//!
//! Inbound message source drained by the runtime at the top of every
//! cycle before any market data work.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::control::ControlMessage;

/// Control channel error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ControlChannelError {
    /// Connection error.
    #[error("Control channel connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Message could not be decoded.
    #[error("Control message decode failed: {message}")]
    Decode {
        /// Error details.
        message: String,
    },

    /// The channel has shut down.
    #[error("Control channel closed")]
    Closed,
}

/// Port for receiving control messages.
///
/// This is a driven (secondary/outbound) port.
#[async_trait]
pub trait ControlChannelPort: Send + Sync {
    /// Receive the next pending message.
    ///
    /// Waits at most `timeout`; `Duration::ZERO` means a non-blocking
    /// poll. `Ok(None)` means nothing arrived within the timeout, which
    /// is the normal idle result, not an error.
    async fn receive(
        &self,
        timeout: Duration,
    ) -> Result<Option<ControlMessage>, ControlChannelError>;
}

/// Control channel that never delivers a message.
///
/// The default channel in fresh contexts; bots without a control plane
/// run until stopped programmatically or by signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpControlChannel;

#[async_trait]
impl ControlChannelPort for NoOpControlChannel {
    async fn receive(
        &self,
        _timeout: Duration,
    ) -> Result<Option<ControlMessage>, ControlChannelError> {
        Ok(None)
    }
}
