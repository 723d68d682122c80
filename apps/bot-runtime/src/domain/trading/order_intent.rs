//! Order intent published by a bot.
//!
//! Intents are forwarded to the order publisher verbatim. The runtime
//! never inspects, validates, or transforms them; any extra fields a
//! strategy attaches travel through untouched.

use super::OrderSide;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single order instruction produced by [`Bot::on_tick`].
///
/// [`Bot::on_tick`]: crate::application::Bot::on_tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Instrument symbol the order targets.
    pub symbol: String,
    /// Buy or sell.
    pub side: OrderSide,
    /// Order quantity.
    #[serde(rename = "qty")]
    pub quantity: Decimal,
    /// Limit price, if the strategy wants a limit order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    /// Additional strategy-defined fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl OrderIntent {
    /// Create a market-style intent with no extra fields.
    #[must_use]
    pub fn new(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
            limit_price: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Attach a limit price.
    #[must_use]
    pub const fn with_limit_price(mut self, price: Decimal) -> Self {
        self.limit_price = Some(price);
        self
    }

    /// Attach a strategy-defined field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
