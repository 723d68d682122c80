//! Runtime lifecycle phase.

use std::fmt;

/// Where the runtime is in its lifecycle.
///
/// Phases only move forward: `Starting` → `Running` → `Stopping` →
/// `Stopped`. The discriminants are ordered so the transition can be
/// enforced with an atomic `fetch_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuntimePhase {
    /// Constructed, start hook not yet complete.
    Starting = 0,
    /// Iteration loop in progress.
    Running = 1,
    /// Stop requested, shutdown sequence in progress.
    Stopping = 2,
    /// Shutdown sequence complete. Terminal.
    Stopped = 3,
}

impl RuntimePhase {
    /// Phase name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
        }
    }

    /// Whether this phase is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl From<u8> for RuntimePhase {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Stopping,
            3 => Self::Stopped,
            _ => Self::Starting,
        }
    }
}

impl fmt::Display for RuntimePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
