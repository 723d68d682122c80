//! Bot collaborator bundle.
//!
//! Everything a bot can reach during its lifecycle, assembled by the
//! embedder before the runtime starts. Fresh contexts come wired to
//! harmless local connectors so a bot can run with no platform at all.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::application::ports::{
    ControlChannelPort, HeartbeatPort, InMemoryStateStore, MarketDataPort, NoOpControlChannel,
    NoOpHeartbeatSink, OrderPublisherPort, StateStorePort, StaticMarketDataFeed,
    StdoutOrderPublisher,
};
use crate::domain::shared::{AccountId, BotId};

/// Shared string-keyed extension map.
///
/// Lets the embedder hand bots extra collaborators or settings without
/// changing the context shape. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct Extras {
    inner: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl Extras {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing one.
    pub fn insert(&self, key: impl Into<String>, value: serde_json::Value) {
        self.inner.write().insert(key.into(), value);
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.inner.read().get(key).cloned()
    }

    /// Look up a value, falling back to `default` when absent.
    #[must_use]
    pub fn get_or(&self, key: &str, default: serde_json::Value) -> serde_json::Value {
        self.get(key).unwrap_or(default)
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// Collaborators handed to every bot hook.
///
/// Connectors are shared trait objects; cloning the context clones the
/// handles, not the connectors. The control channel and heartbeat sink
/// are optional at the runtime level: [`BotRuntime`] skips draining and
/// heartbeats when they are absent.
///
/// [`BotRuntime`]: crate::application::BotRuntime
#[derive(Clone)]
pub struct BotContext {
    /// Bot instance identifier, included in logs and heartbeats.
    pub bot_id: BotId,
    /// Account the bot acts on.
    pub account_id: AccountId,
    /// Snapshot source polled once per cycle.
    pub market_data: Arc<dyn MarketDataPort>,
    /// Destination for order intents.
    pub orders: Arc<dyn OrderPublisherPort>,
    /// Key-value state for the strategy.
    pub state: Arc<dyn StateStorePort>,
    /// Inbound control messages, if a control plane is wired up.
    pub control: Option<Arc<dyn ControlChannelPort>>,
    /// Liveness sink, if heartbeats are wanted.
    pub heartbeat: Option<Arc<dyn HeartbeatPort>>,
    /// Embedder-defined extension map.
    pub extras: Extras,
}

impl BotContext {
    /// Create a context wired to local defaults.
    ///
    /// Empty static feed, stdout order publisher, in-memory state, and
    /// no-op control/heartbeat connectors.
    #[must_use]
    pub fn new(bot_id: BotId, account_id: AccountId) -> Self {
        Self {
            bot_id,
            account_id,
            market_data: Arc::new(StaticMarketDataFeed::default()),
            orders: Arc::new(StdoutOrderPublisher),
            state: Arc::new(InMemoryStateStore::new()),
            control: Some(Arc::new(NoOpControlChannel)),
            heartbeat: Some(Arc::new(NoOpHeartbeatSink)),
            extras: Extras::new(),
        }
    }

    /// Replace the market data feed.
    #[must_use]
    pub fn with_market_data(mut self, feed: Arc<dyn MarketDataPort>) -> Self {
        self.market_data = feed;
        self
    }

    /// Replace the order publisher.
    #[must_use]
    pub fn with_orders(mut self, publisher: Arc<dyn OrderPublisherPort>) -> Self {
        self.orders = publisher;
        self
    }

    /// Replace the state store.
    #[must_use]
    pub fn with_state(mut self, store: Arc<dyn StateStorePort>) -> Self {
        self.state = store;
        self
    }

    /// Replace the control channel.
    #[must_use]
    pub fn with_control(mut self, channel: Arc<dyn ControlChannelPort>) -> Self {
        self.control = Some(channel);
        self
    }

    /// Run without a control channel; the drain step becomes a no-op.
    #[must_use]
    pub fn without_control(mut self) -> Self {
        self.control = None;
        self
    }

    /// Replace the heartbeat sink.
    #[must_use]
    pub fn with_heartbeat(mut self, sink: Arc<dyn HeartbeatPort>) -> Self {
        self.heartbeat = Some(sink);
        self
    }

    /// Run without heartbeats.
    #[must_use]
    pub fn without_heartbeat(mut self) -> Self {
        self.heartbeat = None;
        self
    }
}

impl fmt::Debug for BotContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotContext")
            .field("bot_id", &self.bot_id)
            .field("account_id", &self.account_id)
            .field("control", &self.control.is_some())
            .field("heartbeat", &self.heartbeat.is_some())
            .finish_non_exhaustive()
    }
}
