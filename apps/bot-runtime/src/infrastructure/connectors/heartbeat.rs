//! Heartbeat Sinks
//!
//! Two in-process heartbeat destinations: a buffer for tests to assert
//! on, and a log sink for the demo binary.

use parking_lot::Mutex;

use crate::application::ports::{HeartbeatError, HeartbeatPort};
use crate::domain::heartbeat::HeartbeatPayload;

/// Heartbeat sink that appends every payload to an in-memory buffer.
#[derive(Debug, Default)]
pub struct BufferHeartbeatSink {
    items: Mutex<Vec<HeartbeatPayload>>,
}

impl BufferHeartbeatSink {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, in order.
    #[must_use]
    pub fn items(&self) -> Vec<HeartbeatPayload> {
        self.items.lock().clone()
    }

    /// Number of published heartbeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether nothing has been published yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[async_trait::async_trait]
impl HeartbeatPort for BufferHeartbeatSink {
    async fn publish(&self, payload: HeartbeatPayload) -> Result<(), HeartbeatError> {
        self.items.lock().push(payload);
        Ok(())
    }
}

/// Heartbeat sink that emits each payload as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHeartbeatSink;

impl LogHeartbeatSink {
    /// Create the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl HeartbeatPort for LogHeartbeatSink {
    async fn publish(&self, payload: HeartbeatPayload) -> Result<(), HeartbeatError> {
        let encoded = serde_json::to_string(&payload)?;
        tracing::info!(payload = %encoded, "Heartbeat published");
        Ok(())
    }
}
