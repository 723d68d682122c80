//! In-Memory Connectors
//!
//! Queue and buffer implementations of the application ports, used by
//! tests and the demo binary. Production deployments swap in real
//! adapters; these keep everything observable in process.

mod control;
mod heartbeat;
mod market_data;
mod orders;

pub use control::QueueControlChannel;
pub use heartbeat::{BufferHeartbeatSink, LogHeartbeatSink};
pub use market_data::QueueMarketDataFeed;
pub use orders::BufferOrderPublisher;
