//! Batch execution: strictly-ordered sequential path and bounded concurrent
//! fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use wagemill_core::{EmployeeId, PayPeriod};
use wagemill_payroll::PaymentRecord;

use super::cancel::CancelToken;
use super::error::BulkRunError;
use super::outcome::{RunLedger, UnitFailure, UnitOutcome};
use super::progress::ProgressReporter;
use crate::processor::{UnitError, UnitProcessor};

fn outcome_of(result: Result<PaymentRecord, UnitError>, employee_id: EmployeeId) -> UnitOutcome {
    match result {
        Ok(record) => UnitOutcome::Paid(record),
        Err(err) => UnitOutcome::Failed(UnitFailure {
            employee_id,
            error: err.to_string(),
        }),
    }
}

/// Process one batch strictly in order.
///
/// After every unit: record the outcome, report progress (awaiting the
/// callback), then check the token. An observed abort stops the run before
/// the next unit starts.
pub(crate) async fn run_batch_sequential<P>(
    processor: &P,
    batch: &[EmployeeId],
    period: PayPeriod,
    ledger: &mut RunLedger,
    reporter: &ProgressReporter,
    cancel: &CancelToken,
) -> Result<(), BulkRunError>
where
    P: UnitProcessor + ?Sized,
{
    for &employee_id in batch {
        let outcome = outcome_of(processor.process_unit(employee_id, period).await, employee_id);
        ledger.record(outcome);
        reporter.report(ledger.snapshot(Some(employee_id))).await;

        if cancel.is_cancelled() {
            return Err(BulkRunError::Cancelled {
                processed: ledger.processed(),
                successful: ledger.successful_count(),
                failed: ledger.failed_count(),
                total: ledger.total(),
            });
        }
    }
    Ok(())
}

/// Fan one batch out onto at most `concurrency` simultaneous units.
///
/// Waits for every unit (successes and failures) before returning; outcome
/// order need not match batch order. A panicking unit is captured as that
/// unit's failure and never aborts its siblings.
pub(crate) async fn run_batch_concurrent<P>(
    processor: &Arc<P>,
    batch: &[EmployeeId],
    period: PayPeriod,
    concurrency: usize,
) -> Vec<UnitOutcome>
where
    P: UnitProcessor + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks: JoinSet<UnitOutcome> = JoinSet::new();
    let mut employee_of_task: HashMap<tokio::task::Id, EmployeeId> =
        HashMap::with_capacity(batch.len());

    for &employee_id in batch {
        let semaphore = Arc::clone(&semaphore);
        let processor = Arc::clone(processor);
        let handle = tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("run-scoped semaphore is never closed");
            outcome_of(processor.process_unit(employee_id, period).await, employee_id)
        });
        employee_of_task.insert(handle.id(), employee_id);
    }

    let mut outcomes = Vec::with_capacity(batch.len());
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((_task_id, outcome)) => outcomes.push(outcome),
            Err(join_err) => {
                warn!(error = %join_err, "payroll unit task aborted");
                if let Some(&employee_id) = employee_of_task.get(&join_err.id()) {
                    outcomes.push(UnitOutcome::Failed(UnitFailure {
                        employee_id,
                        error: format!("unit processor panicked: {join_err}"),
                    }));
                }
            }
        }
    }
    outcomes
}
