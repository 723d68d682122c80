//! Configuration
//!
//! Environment-driven settings for the runtime binary.

mod settings;

pub use settings::{ConfigError, RuntimeSettings};
