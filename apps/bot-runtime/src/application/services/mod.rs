//! Application Services
//!
//! Long-running coordination built on the bot contract and the ports.
//! The runtime service owns the lifecycle loop; the stop signal is the
//! one-shot latch every stop path funnels into.

mod runtime;
mod stop_signal;

pub use runtime::{BotRuntime, RuntimeConfig, RuntimeError, RuntimeHandle};
pub use stop_signal::StopSignal;
