// src/mirror/cancel.rs
// =============================================================================
// Cooperative cancellation for a mirror run.
//
// The engine checks the flag before starting each new fetch. Fetches that
// are already running finish and write their file, so a cancelled run
// leaves a valid partial mirror behind.
// =============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
