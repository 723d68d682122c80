//! Market Data Types
//!
//! Snapshot shape handed from the feed to the bot. Codec-agnostic; the
//! feed decides what fields are present.

mod snapshot;

pub use snapshot::MarketSnapshot;
