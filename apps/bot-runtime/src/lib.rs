// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Bot Runtime - Rust Core Library
//!
//! Lifecycle runtime for trading bots on the Qubit platform. A bot
//! implements the [`Bot`] trait; the [`BotRuntime`] drives it through
//! start, tick, and stop while handling control commands, error
//! escalation, and heartbeats.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core runtime types with no external integrations
//!   - `trading`: Order intents and sides
//!   - `market_data`: Free-form market snapshots
//!   - `control`: Out-of-band control messages
//!   - `heartbeat`: Health reports and heartbeat payloads
//!   - `runtime`: Lifecycle phases, stop reasons, counters
//!   - `shared`: Identifier value objects
//!
//! - **Application**: The bot contract and its orchestration
//!   - `bot`: The [`Bot`] trait and the [`BotContext`] handed to hooks
//!   - `ports`: Interfaces for market data, orders, state, control,
//!     heartbeats
//!   - `services`: The runtime loop and its stop latch
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `connectors`: In-memory queue and buffer connectors
//!   - `config`: Environment-driven settings

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core runtime types with no external integrations.
pub mod domain;

/// Application layer - Bot contract, port definitions, and the runtime.
pub mod application;

/// Infrastructure layer - Adapters and configuration.
pub mod infrastructure;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::control::ControlMessage;
pub use domain::heartbeat::{HealthReport, HeartbeatPayload, HeartbeatStats};
pub use domain::market_data::MarketSnapshot;
pub use domain::runtime::{RuntimePhase, RuntimeStats, StopReason};
pub use domain::shared::{AccountId, BotId};
pub use domain::trading::{OrderIntent, OrderSide};

// Application re-exports
pub use application::bot::{Bot, BotContext, BotError, BoxedBot, Extras};
pub use application::ports::{
    ControlChannelError, ControlChannelPort, HeartbeatError, HeartbeatPort, InMemoryStateStore,
    MarketDataError, MarketDataPort, NoOpControlChannel, NoOpHeartbeatSink, OrderPublisherPort,
    PublishError, RangeQuery, StateStoreError, StateStorePort, StaticMarketDataFeed,
    StdoutOrderPublisher,
};
pub use application::services::{
    BotRuntime, RuntimeConfig, RuntimeError, RuntimeHandle, StopSignal,
};

// Infrastructure re-exports
pub use infrastructure::config::{ConfigError, RuntimeSettings};
pub use infrastructure::connectors::{
    BufferHeartbeatSink, BufferOrderPublisher, LogHeartbeatSink, QueueControlChannel,
    QueueMarketDataFeed,
};
