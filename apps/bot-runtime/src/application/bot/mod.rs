//! Bot Contract and Context
//!
//! The lifecycle trait bots implement and the collaborator bundle the
//! runtime hands to every hook.

mod context;
mod contract;

pub use context::{BotContext, Extras};
pub use contract::{Bot, BotError, BoxedBot};
