//! Application Ports (Driven)
//!
//! Ports define the interfaces the runtime uses to reach external
//! systems. All five are driven (secondary/outbound) ports; the
//! infrastructure layer provides the adapters.

mod control_channel_port;
mod heartbeat_port;
mod market_data_port;
mod order_publisher_port;
mod state_store_port;

pub use control_channel_port::{ControlChannelError, ControlChannelPort, NoOpControlChannel};
pub use heartbeat_port::{HeartbeatError, HeartbeatPort, NoOpHeartbeatSink};
pub use market_data_port::{MarketDataError, MarketDataPort, RangeQuery, StaticMarketDataFeed};
pub use order_publisher_port::{OrderPublisherPort, PublishError, StdoutOrderPublisher};
pub use state_store_port::{InMemoryStateStore, StateStoreError, StateStorePort};
