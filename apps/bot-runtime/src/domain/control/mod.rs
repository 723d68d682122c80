//! Control-Plane Types
//!
//! Messages delivered to a running bot, including stop commands.

mod control_message;

pub use control_message::ControlMessage;
