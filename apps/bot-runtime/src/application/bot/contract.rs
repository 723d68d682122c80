//! Bot lifecycle contract.

use async_trait::async_trait;

use crate::application::ports::{MarketDataError, PublishError, StateStoreError};
use crate::domain::control::ControlMessage;
use crate::domain::heartbeat::HealthReport;
use crate::domain::market_data::MarketSnapshot;
use crate::domain::runtime::StopReason;
use crate::domain::trading::OrderIntent;

use super::BotContext;

/// Error returned by a bot hook.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BotError {
    /// A market data call made by the bot failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// A state store call made by the bot failed.
    #[error(transparent)]
    StateStore(#[from] StateStoreError),

    /// A publish call made by the bot failed.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Strategy-level failure.
    #[error("Strategy error: {message}")]
    Strategy {
        /// Error details.
        message: String,
    },
}

impl BotError {
    /// Create a strategy-level error.
    #[must_use]
    pub fn strategy(message: impl Into<String>) -> Self {
        Self::Strategy {
            message: message.into(),
        }
    }
}

/// Core trait for implementing trading bots.
///
/// Bots receive market snapshots and control messages from the runtime
/// and respond with order intents.
///
/// # Lifecycle
///
/// 1. `on_start` - Called once before the first cycle
/// 2. `on_event` - Called for each control message drained from the channel
/// 3. `on_tick` - Called once per cycle with a fresh snapshot
/// 4. `health` - Polled when a heartbeat is due
/// 5. `on_stop` - Called exactly once during shutdown, with the stop reason
///
/// Only `on_tick` is mandatory; every other hook has a no-op default.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use bot_runtime::{Bot, BotContext, BotError, MarketSnapshot, OrderIntent, OrderSide};
/// use rust_decimal::Decimal;
///
/// struct Threshold {
///     limit: Decimal,
/// }
///
/// #[async_trait]
/// impl Bot for Threshold {
///     async fn on_tick(
///         &mut self,
///         snapshot: &MarketSnapshot,
///         _ctx: &BotContext,
///     ) -> Result<Vec<OrderIntent>, BotError> {
///         match (snapshot.symbol.as_deref(), snapshot.price) {
///             (Some(symbol), Some(price)) if price < self.limit => Ok(vec![
///                 OrderIntent::new(symbol, OrderSide::Buy, Decimal::ONE),
///             ]),
///             _ => Ok(Vec::new()),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Bot: Send + Sync {
    /// Called once before the first cycle.
    ///
    /// Use this to warm caches, restore state, or validate configuration.
    /// A failure here aborts the run; the stop hook still fires.
    async fn on_start(&mut self, _ctx: &BotContext) -> Result<(), BotError> {
        Ok(())
    }

    /// Called once per cycle with the latest snapshot.
    ///
    /// Return the order intents to publish this cycle; an empty vec means
    /// no action. Errors are counted against the consecutive-error
    /// threshold.
    async fn on_tick(
        &mut self,
        snapshot: &MarketSnapshot,
        ctx: &BotContext,
    ) -> Result<Vec<OrderIntent>, BotError>;

    /// Called for each control message drained from the channel.
    ///
    /// Stop commands are routed here too before the runtime acts on them.
    /// Errors are logged and do not interrupt draining.
    async fn on_event(
        &mut self,
        _message: &ControlMessage,
        _ctx: &BotContext,
    ) -> Result<(), BotError> {
        Ok(())
    }

    /// Called exactly once during shutdown.
    ///
    /// Use this to flatten positions, flush state, or cancel orders.
    /// Errors are logged and never propagate.
    async fn on_stop(&mut self, _reason: &StopReason, _ctx: &BotContext) -> Result<(), BotError> {
        Ok(())
    }

    /// Health snapshot included in heartbeats.
    async fn health(&self) -> HealthReport {
        HealthReport::default()
    }
}

/// A boxed bot trait object.
pub type BoxedBot = Box<dyn Bot>;

#[async_trait]
impl Bot for BoxedBot {
    async fn on_start(&mut self, ctx: &BotContext) -> Result<(), BotError> {
        self.as_mut().on_start(ctx).await
    }

    async fn on_tick(
        &mut self,
        snapshot: &MarketSnapshot,
        ctx: &BotContext,
    ) -> Result<Vec<OrderIntent>, BotError> {
        self.as_mut().on_tick(snapshot, ctx).await
    }

    async fn on_event(
        &mut self,
        message: &ControlMessage,
        ctx: &BotContext,
    ) -> Result<(), BotError> {
        self.as_mut().on_event(message, ctx).await
    }

    async fn on_stop(&mut self, reason: &StopReason, ctx: &BotContext) -> Result<(), BotError> {
        self.as_mut().on_stop(reason, ctx).await
    }

    async fn health(&self) -> HealthReport {
        self.as_ref().health().await
    }
}
