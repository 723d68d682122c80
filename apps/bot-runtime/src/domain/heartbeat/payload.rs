//! Heartbeat wire payload.

use super::HealthReport;
use crate::domain::runtime::RuntimeStats;
use crate::domain::shared::{AccountId, BotId};
use serde::{Deserialize, Serialize};

/// Counter excerpt carried inside each heartbeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatStats {
    /// Completed successful iterations.
    pub ticks: u64,
    /// Order intents forwarded to the publisher.
    pub orders_published: u64,
    /// Most recent cycle failure, if any. Serialized as `null` when absent.
    pub last_error: Option<String>,
}

impl From<&RuntimeStats> for HeartbeatStats {
    fn from(stats: &RuntimeStats) -> Self {
        Self {
            ticks: stats.ticks,
            orders_published: stats.orders_published,
            last_error: stats.last_error.clone(),
        }
    }
}

/// Liveness report published on the heartbeat channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatPayload {
    /// Bot instance the heartbeat belongs to.
    pub bot_id: BotId,
    /// Account the bot acts on.
    pub account_id: AccountId,
    /// Bot-reported health, unmodified.
    pub status: HealthReport,
    /// Runtime counter excerpt.
    pub stats: HeartbeatStats,
}
