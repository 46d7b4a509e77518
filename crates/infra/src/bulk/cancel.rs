//! Cooperative cancellation token.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared, one-way abort signal.
///
/// The engine checks the token at defined checkpoints (top of every batch,
/// after every unit in sequential mode, immediately after an inter-batch
/// delay). There is no preemption: work already in flight finishes.
///
/// Cloning shares the underlying flag; `cancel` is idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    aborted: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Repeated calls are no-ops.
    pub fn cancel(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }
}
