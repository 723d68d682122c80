//! Stop reason recorded by the first shutdown request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the runtime stopped (or is stopping).
///
/// Free-form string with a handful of well-known values produced by the
/// runtime itself. Whichever shutdown trigger fires first wins; the
/// recorded reason never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopReason(String);

impl StopReason {
    /// Create a reason from a string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Consecutive-error threshold reached.
    #[must_use]
    pub fn max_errors() -> Self {
        Self("max-errors".to_string())
    }

    /// Stop command arrived on the control channel without a reason.
    #[must_use]
    pub fn stop_command() -> Self {
        Self("stop-command".to_string())
    }

    /// Programmatic stop with no caller-supplied reason.
    #[must_use]
    pub fn external_request() -> Self {
        Self("external-request".to_string())
    }

    /// The start hook failed before the loop began.
    #[must_use]
    pub fn start_failed() -> Self {
        Self("start-failed".to_string())
    }

    /// Operating system signal, e.g. `signal-sigterm`.
    #[must_use]
    pub fn signal(name: &str) -> Self {
        Self(format!("signal-{}", name.to_lowercase()))
    }

    /// The reason string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StopReason {
    /// Fallback used when shutdown runs without a recorded reason.
    fn default() -> Self {
        Self("runtime_shutdown".to_string())
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for StopReason {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for StopReason {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StopReason {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
