//! One-shot stop latch.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::domain::runtime::StopReason;

/// Shutdown latch shared by the runtime loop and its handles.
///
/// The first [`request`](Self::request) records the reason and trips the
/// latch; every later request is a no-op. Clones share the same latch.
///
/// Once tripped, [`reason`](Self::reason) is guaranteed to return the
/// winning reason: it is stored before the token cancels.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    token: CancellationToken,
    reason: Arc<Mutex<Option<StopReason>>>,
}

impl StopSignal {
    /// Create an untripped latch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the latch with `reason`.
    ///
    /// Returns `true` if this call won the race and its reason was
    /// recorded, `false` if the latch was already tripped.
    #[must_use]
    pub fn request(&self, reason: StopReason) -> bool {
        let mut slot = self.reason.lock();
        if slot.is_some() {
            return false;
        }
        *slot = Some(reason);
        drop(slot);
        self.token.cancel();
        true
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The recorded reason, once tripped.
    #[must_use]
    pub fn reason(&self) -> Option<StopReason> {
        self.reason.lock().clone()
    }

    /// Wait until the latch trips. Returns immediately if it already has.
    pub async fn requested(&self) {
        self.token.cancelled().await;
    }
}
