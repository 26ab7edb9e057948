//! Re-entrancy guard for one-at-a-time async actions (generate, export, share).
//!
//! A second attempt while one is outstanding is rejected rather than queued,
//! so a stale response can never land after a newer one.

#[cfg(test)]
#[path = "inflight_test.rs"]
mod inflight_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared busy flag for one action.
#[derive(Debug, Clone, Default)]
pub struct InFlightSlot {
    busy: Arc<AtomicBool>,
}

impl InFlightSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot. `None` while another claim is still alive.
    #[must_use]
    pub fn try_acquire(&self) -> Option<InFlight> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { busy: Arc::clone(&self.busy) })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of a claimed slot. Releases the slot when dropped, on every path.
#[must_use = "dropping the guard releases the slot immediately"]
#[derive(Debug)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
