//! Infrastructure Layer
//!
//! Concrete adapters for the ports defined in the application layer.
//! Following hexagonal architecture:
//!
//! - `connectors/`: In-memory implementations of the market data,
//!   order, control, and heartbeat ports
//! - `config/`: Environment-driven settings for the binary

pub mod config;
pub mod connectors;
