//! Shared Domain Types
//!
//! Identifiers used across the runtime.

mod identifiers;

pub use identifiers::{AccountId, BotId};
