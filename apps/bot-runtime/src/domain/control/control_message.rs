//! Control-plane message delivered to a running bot.

use crate::domain::runtime::StopReason;
use serde::{Deserialize, Serialize};

/// Message types that request runtime shutdown.
const STOP_KINDS: [&str; 2] = ["stop", "bot.stop"];

/// A message received from the control channel.
///
/// The `type` field routes the message; everything else is forwarded to
/// the bot's event hook untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlMessage {
    /// Message type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional human-readable reason, used by stop commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Additional message fields, passed to the bot untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ControlMessage {
    /// Create a message with the given type tag.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            reason: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Create a stop command, optionally carrying a reason.
    #[must_use]
    pub fn stop(reason: Option<&str>) -> Self {
        Self {
            kind: "bot.stop".to_string(),
            reason: reason.map(str::to_string),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an additional field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether this message requests runtime shutdown.
    ///
    /// Matching is case-insensitive on the `type` tag.
    #[must_use]
    pub fn is_stop_command(&self) -> bool {
        STOP_KINDS
            .iter()
            .any(|kind| self.kind.eq_ignore_ascii_case(kind))
    }

    /// Stop reason carried by this message.
    ///
    /// Falls back to `stop-command` when the reason is absent or empty.
    #[must_use]
    pub fn stop_reason(&self) -> StopReason {
        self.reason
            .as_deref()
            .filter(|reason| !reason.is_empty())
            .map_or_else(StopReason::stop_command, StopReason::new)
    }
}
