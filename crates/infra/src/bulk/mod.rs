//! Bulk payroll batch engine.
//!
//! Runs the per-employee unit processor across an organization's workforce:
//! fixed-size batches, bounded concurrency within a batch, optional pause
//! between batches, cooperative cancellation, progress reporting, and a
//! streaming population mode that bounds peak memory to one batch.
//!
//! Execution model in one paragraph: batches are strictly sequential (one in
//! flight at a time). With `concurrency == 1` units run in population order
//! and progress is reported after every unit; with `concurrency > 1` a batch
//! fans out onto a semaphore-bounded task set, runs to completion even if
//! cancellation is requested mid-batch, and reports progress once per batch.
//! Unit failures are data (collected into the report); only cancellation and
//! misconfiguration abort the run.

pub mod cancel;
pub mod config;
pub mod error;
pub mod executor;
pub mod outcome;
pub mod progress;
pub mod runner;

pub use cancel::CancelToken;
pub use config::{RunConfig, StreamingMode};
pub use error::BulkRunError;
pub use outcome::{BulkRunReport, RunLedger, UnitFailure, UnitOutcome};
pub use progress::{ProgressCallback, ProgressFuture, ProgressSnapshot};
pub use runner::BulkPayrollRunner;
