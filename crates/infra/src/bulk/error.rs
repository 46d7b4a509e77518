//! Error taxonomy for bulk runs.
//!
//! Unit failures and callback failures are recovered locally and never
//! appear here. The only abnormal terminations are cancellation and
//! misconfiguration.

use thiserror::Error;

use crate::directory::DirectoryError;

/// Terminal errors of a bulk payroll run.
#[derive(Debug, Error)]
pub enum BulkRunError {
    /// The cancellation token was observed aborted. Carries the partial
    /// counts accumulated before the run stopped.
    #[error("payroll run cancelled after {processed} of {total} employees")]
    Cancelled {
        processed: usize,
        successful: usize,
        failed: usize,
        total: usize,
    },

    /// Invalid `RunConfig`; rejected before any unit runs.
    #[error("invalid run configuration: {0}")]
    Configuration(String),

    /// The population source failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
