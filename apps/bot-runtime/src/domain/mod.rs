//! Domain Layer - Core runtime types.
//!
//! The innermost layer: value types with no infrastructure dependencies.
//! Everything here is pure data with serialization support; behavior
//! lives in the application layer.

/// Control-plane messages.
pub mod control;

/// Heartbeat payloads and bot health.
pub mod heartbeat;

/// Market data snapshots.
pub mod market_data;

/// Lifecycle phase, stats, and stop reasons.
pub mod runtime;

/// Shared identifiers.
pub mod shared;

/// Order intents.
pub mod trading;
