//! Heartbeat Types
//!
//! Liveness payloads built from bot health and runtime counters.

mod health_report;
mod payload;

pub use health_report::HealthReport;
pub use payload::{HeartbeatPayload, HeartbeatStats};
