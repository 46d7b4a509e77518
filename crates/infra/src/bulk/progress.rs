//! Progress reporting with a caller-supplied, possibly-async callback.

use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use wagemill_core::EmployeeId;

/// Future returned by a progress callback.
pub type ProgressFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Caller-supplied progress observer.
///
/// The engine awaits the returned future before starting the next unit or
/// batch (backpressure), so a slow observer slows the run rather than being
/// dropped.
pub type ProgressCallback = Box<dyn Fn(ProgressSnapshot) -> ProgressFuture + Send + Sync>;

/// Point-in-time view of a running bulk payroll run.
///
/// A value type recomputed at each reporting point, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ProgressSnapshot {
    pub processed: usize,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// `processed / total` rounded to the nearest whole percent; 0 when the
    /// population is empty.
    pub percentage: u32,
    /// The employee just processed (sequential mode only).
    pub current_employee: Option<EmployeeId>,
}

impl ProgressSnapshot {
    pub(crate) fn percentage_of(processed: usize, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        ((processed * 100 + total / 2) / total) as u32
    }
}

/// Guarded invoker around the caller's callback.
///
/// A callback error never faults the run; it is logged and swallowed.
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
}

impl ProgressReporter {
    pub fn new(callback: Option<ProgressCallback>) -> Self {
        Self { callback }
    }

    pub async fn report(&self, snapshot: ProgressSnapshot) {
        let Some(callback) = &self.callback else {
            return;
        };
        if let Err(err) = callback(snapshot).await {
            warn!(
                processed = snapshot.processed,
                total = snapshot.total,
                error = %err,
                "progress callback failed; continuing run"
            );
        }
    }
}
