//! Queue Control Channel
//!
//! In-process control message source backed by an unbounded channel.
//! Tests and operators push commands in; the runtime drains them at the
//! top of each cycle.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::application::ports::{ControlChannelError, ControlChannelPort};
use crate::domain::control::ControlMessage;

/// FIFO control channel.
#[derive(Debug)]
pub struct QueueControlChannel {
    tx: Mutex<Option<mpsc::UnboundedSender<ControlMessage>>>,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<ControlMessage>>,
}

impl QueueControlChannel {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx: Mutex::new(Some(tx)),
            rx: tokio::sync::Mutex::new(rx),
        }
    }

    /// Queue a message for the next drain. Ignored once the channel is
    /// closed.
    pub fn push(&self, message: ControlMessage) {
        let guard = self.tx.lock();
        let Some(tx) = guard.as_ref() else { return };
        let _ = tx.send(message);
    }

    /// Close the intake. Queued messages still drain; after that,
    /// receives yield [`ControlChannelError::Closed`].
    pub fn close(&self) {
        let _ = self.tx.lock().take();
    }
}

impl Default for QueueControlChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ControlChannelPort for QueueControlChannel {
    async fn receive(
        &self,
        timeout: Duration,
    ) -> Result<Option<ControlMessage>, ControlChannelError> {
        let mut rx = self.rx.lock().await;

        if timeout.is_zero() {
            return match rx.try_recv() {
                Ok(message) => Ok(Some(message)),
                Err(mpsc::error::TryRecvError::Empty) => Ok(None),
                Err(mpsc::error::TryRecvError::Disconnected) => Err(ControlChannelError::Closed),
            };
        }

        match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(Some(message)) => Ok(Some(message)),
            Ok(None) => Err(ControlChannelError::Closed),
            Err(_elapsed) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_timeout_drains_without_waiting() {
        let channel = QueueControlChannel::new();
        channel.push(ControlMessage::new("pause"));

        let first = channel.receive(Duration::ZERO).await.unwrap();
        assert_eq!(first.unwrap().kind, "pause");

        let idle = channel.receive(Duration::ZERO).await.unwrap();
        assert!(idle.is_none());
    }

    #[tokio::test]
    async fn positive_timeout_waits_for_a_message() {
        let channel = std::sync::Arc::new(QueueControlChannel::new());

        let pusher = std::sync::Arc::clone(&channel);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            pusher.push(ControlMessage::stop(Some("test")));
        });

        let message = channel
            .receive(Duration::from_secs(1))
            .await
            .unwrap()
            .expect("message should arrive within the timeout");
        assert!(message.is_stop_command());
    }

    #[tokio::test]
    async fn elapsed_timeout_yields_none() {
        let channel = QueueControlChannel::new();
        let idle = channel.receive(Duration::from_millis(10)).await.unwrap();
        assert!(idle.is_none());
    }

    #[tokio::test]
    async fn closed_channel_drains_then_errors() {
        let channel = QueueControlChannel::new();
        channel.push(ControlMessage::new("pause"));
        channel.close();

        assert!(channel.receive(Duration::ZERO).await.unwrap().is_some());
        assert!(matches!(
            channel.receive(Duration::ZERO).await,
            Err(ControlChannelError::Closed)
        ));

        channel.push(ControlMessage::new("dropped"));
        assert!(matches!(
            channel.receive(Duration::ZERO).await,
            Err(ControlChannelError::Closed)
        ));
    }
}
