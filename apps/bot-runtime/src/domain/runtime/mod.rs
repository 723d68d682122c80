//! Runtime State Types
//!
//! Lifecycle phases, counters, and stop reasons observed through the
//! runtime handle.

mod phase;
mod stats;
mod stop_reason;

pub use phase::RuntimePhase;
pub use stats::RuntimeStats;
pub use stop_reason::StopReason;
