//! Queue Market Data Feed
//!
//! In-process market data source backed by an unbounded channel. Tests
//! and the demo binary push snapshots in; the runtime fetches them out
//! in order. Every pushed snapshot is also recorded so `fetch_range`
//! can serve history.

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::application::ports::{MarketDataError, MarketDataPort, RangeQuery};
use crate::domain::market_data::MarketSnapshot;

/// FIFO snapshot feed with recorded history.
#[derive(Debug)]
pub struct QueueMarketDataFeed {
    tx: Mutex<Option<mpsc::UnboundedSender<MarketSnapshot>>>,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<MarketSnapshot>>,
    history: Mutex<Vec<MarketSnapshot>>,
}

impl QueueMarketDataFeed {
    /// Create an empty feed.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx: Mutex::new(Some(tx)),
            rx: tokio::sync::Mutex::new(rx),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Queue a snapshot for the next fetch and record it in history.
    /// Ignored once the feed is closed.
    pub fn push(&self, snapshot: MarketSnapshot) {
        let guard = self.tx.lock();
        let Some(tx) = guard.as_ref() else { return };
        self.history.lock().push(snapshot.clone());
        let _ = tx.send(snapshot);
    }

    /// Close the intake. Queued snapshots still drain; after that,
    /// fetches yield [`MarketDataError::FeedClosed`].
    pub fn close(&self) {
        let _ = self.tx.lock().take();
    }

    /// Everything pushed so far, in order.
    #[must_use]
    pub fn history(&self) -> Vec<MarketSnapshot> {
        self.history.lock().clone()
    }
}

impl Default for QueueMarketDataFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MarketDataPort for QueueMarketDataFeed {
    /// Await the next pushed snapshot.
    async fn fetch(&self) -> Result<MarketSnapshot, MarketDataError> {
        self.rx
            .lock()
            .await
            .recv()
            .await
            .ok_or(MarketDataError::FeedClosed)
    }

    /// Serve the recorded history. Pushed snapshots carry no
    /// timestamps, so only `count` (keep the most recent entries) is
    /// honored; `start` and `end` are ignored.
    async fn fetch_range(&self, query: RangeQuery) -> Result<Vec<MarketSnapshot>, MarketDataError> {
        let history = self.history.lock();
        let skip = query
            .count
            .map_or(0, |count| history.len().saturating_sub(count));
        Ok(history[skip..].to_vec())
    }
}
