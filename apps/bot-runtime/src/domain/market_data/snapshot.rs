//! Market data snapshot.
//!
//! Snapshots are whatever the configured feed produces. The runtime only
//! moves them from the feed to the bot, so every field is optional and
//! unknown fields are preserved.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observation from the market data feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Instrument symbol, when the feed provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Last observed price, when the feed provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Additional feed-defined fields, preserved as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MarketSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot carrying a symbol and a price.
    #[must_use]
    pub fn quote(symbol: impl Into<String>, price: Decimal) -> Self {
        Self {
            symbol: Some(symbol.into()),
            price: Some(price),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach a feed-defined field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Look up a feed-defined field.
    #[must_use]
    pub fn extra_field(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}
