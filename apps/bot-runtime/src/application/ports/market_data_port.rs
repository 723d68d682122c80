//! Market Data Port (Driven Port)
//!
//! Interface the runtime polls for snapshots once per cycle. Feeds may
//! block until data is available; the loop simply waits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::market_data::MarketSnapshot;

/// Bounds for a historical snapshot query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    /// Earliest timestamp to include.
    pub start: Option<DateTime<Utc>>,
    /// Latest timestamp to include.
    pub end: Option<DateTime<Utc>>,
    /// Maximum number of snapshots, newest last.
    pub count: Option<usize>,
}

impl RangeQuery {
    /// Query the most recent `count` snapshots.
    #[must_use]
    pub const fn latest(count: usize) -> Self {
        Self {
            start: None,
            end: None,
            count: Some(count),
        }
    }

    /// Query everything the feed has.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: None,
            end: None,
            count: None,
        }
    }
}

/// Market data error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("Market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// The feed has shut down and will produce no more snapshots.
    #[error("Market data feed closed")]
    FeedClosed,

    /// Data unavailable.
    #[error("Market data unavailable: {message}")]
    DataUnavailable {
        /// Error details.
        message: String,
    },

    /// The feed does not keep history.
    #[error("Historical snapshots not supported by this feed")]
    HistoryUnsupported,
}

/// Port for fetching market data.
///
/// This is a driven (secondary/outbound) port. The infrastructure layer
/// provides implementations (in-memory queue, static fixture, or a
/// platform-backed feed).
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch the next snapshot.
    ///
    /// May suspend until the feed produces one. Called once per cycle by
    /// the runtime.
    async fn fetch(&self) -> Result<MarketSnapshot, MarketDataError>;

    /// Fetch historical snapshots.
    ///
    /// Optional; feeds without history return
    /// [`MarketDataError::HistoryUnsupported`]. The runtime never calls
    /// this, it exists for strategies that want lookback data.
    async fn fetch_range(&self, query: RangeQuery) -> Result<Vec<MarketSnapshot>, MarketDataError> {
        let _ = query;
        Err(MarketDataError::HistoryUnsupported)
    }
}

/// Feed that returns the same snapshot on every fetch.
///
/// The default instance returns an empty snapshot, which makes it a
/// stand-in for "no market data" in tests and default contexts.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataFeed {
    snapshot: MarketSnapshot,
}

impl StaticMarketDataFeed {
    /// Create a feed that always returns `snapshot`.
    #[must_use]
    pub const fn new(snapshot: MarketSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl MarketDataPort for StaticMarketDataFeed {
    async fn fetch(&self) -> Result<MarketSnapshot, MarketDataError> {
        Ok(self.snapshot.clone())
    }
}
