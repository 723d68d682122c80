//! Application Layer
//!
//! The application layer orchestrates the bot lifecycle around the
//! domain types. It defines:
//!
//! - **Bot contract**: The trait a strategy implements, plus the
//!   context handed to every hook
//! - **Ports**: Interfaces for the external systems a bot touches
//! - **Services**: The runtime loop and its stop latch

pub mod bot;
pub mod ports;
pub mod services;

pub use bot::*;
pub use ports::*;
pub use services::*;
