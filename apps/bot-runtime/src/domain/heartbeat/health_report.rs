//! Bot-reported health.

use serde::{Deserialize, Serialize};

/// Health snapshot produced by a bot's health hook.
///
/// Forwarded inside heartbeat payloads without interpretation; the
/// runtime never acts on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Whether the bot considers itself healthy.
    pub ok: bool,
    /// Additional bot-defined detail, passed through untouched.
    #[serde(flatten)]
    pub detail: serde_json::Map<String, serde_json::Value>,
}

impl HealthReport {
    /// A healthy report with no detail.
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            ok: true,
            detail: serde_json::Map::new(),
        }
    }

    /// An unhealthy report with no detail.
    #[must_use]
    pub fn unhealthy() -> Self {
        Self {
            ok: false,
            detail: serde_json::Map::new(),
        }
    }

    /// Attach a bot-defined detail field.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.detail.insert(key.into(), value);
        self
    }
}

impl Default for HealthReport {
    /// Bots are healthy unless they say otherwise.
    fn default() -> Self {
        Self::healthy()
    }
}
