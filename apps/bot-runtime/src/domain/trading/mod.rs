//! Trading Types
//!
//! Order intents produced by strategies and forwarded verbatim.

mod order_intent;
mod order_side;

pub use order_intent::OrderIntent;
pub use order_side::OrderSide;
