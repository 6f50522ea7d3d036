use crate::errors::{AtollError, AtollResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation shared between a caller and a running generation
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Fail with `Cancelled` if the flag is set, naming the stage about to run
    pub fn checkpoint(&self, stage: &'static str) -> AtollResult<()> {
        if self.is_cancelled() {
            tracing::debug!(stage, "generation cancelled");
            return Err(AtollError::Cancelled { stage });
        }
        Ok(())
    }
}
