//! Unit outcomes and the run-level result aggregator.

use serde::Serialize;

use wagemill_core::{EmployeeId, Money};
use wagemill_payroll::{PaymentRecord, RunTotals};

use super::progress::ProgressSnapshot;

/// One employee's failure, recorded and moved past.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub employee_id: EmployeeId,
    pub error: String,
}

/// Result of one unit of work. Failures are data here, not control flow.
#[derive(Debug, Clone)]
pub enum UnitOutcome {
    Paid(PaymentRecord),
    Failed(UnitFailure),
}

/// Final report of a bulk payroll run.
///
/// Invariant: `successful.len() + failed.len() == total` (a cancelled run
/// never produces a report; it surfaces `BulkRunError::Cancelled` instead).
#[derive(Debug, Clone)]
pub struct BulkRunReport {
    pub successful: Vec<PaymentRecord>,
    pub failed: Vec<UnitFailure>,
    pub total: usize,
}

impl BulkRunReport {
    /// Sum of net amounts across successful payments.
    pub fn total_amount(&self) -> Money {
        self.successful.iter().map(|p| p.amount).sum()
    }

    pub fn totals(&self) -> RunTotals {
        RunTotals {
            total: self.total,
            successful: self.successful.len(),
            failed: self.failed.len(),
            total_amount: self.total_amount(),
        }
    }
}

/// Accumulates unit outcomes for one run.
///
/// Single mutation point: concurrent units hand their outcomes back through
/// the executor's join, and only the run driver appends here. Counts are
/// recomputed from the vectors, so a snapshot can never disagree with the
/// stored outcomes.
#[derive(Debug)]
pub struct RunLedger {
    successful: Vec<PaymentRecord>,
    failed: Vec<UnitFailure>,
    total: usize,
}

impl RunLedger {
    pub fn new(total: usize) -> Self {
        Self {
            successful: Vec::new(),
            failed: Vec::new(),
            total,
        }
    }

    pub fn record(&mut self, outcome: UnitOutcome) {
        match outcome {
            UnitOutcome::Paid(record) => self.successful.push(record),
            UnitOutcome::Failed(failure) => self.failed.push(failure),
        }
    }

    pub fn processed(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    pub fn successful_count(&self) -> usize {
        self.successful.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn snapshot(&self, current_employee: Option<EmployeeId>) -> ProgressSnapshot {
        let processed = self.processed();
        ProgressSnapshot {
            processed,
            total: self.total,
            successful: self.successful.len(),
            failed: self.failed.len(),
            percentage: ProgressSnapshot::percentage_of(processed, self.total),
            current_employee,
        }
    }

    pub fn into_report(self) -> BulkRunReport {
        BulkRunReport {
            successful: self.successful,
            failed: self.failed,
            total: self.total,
        }
    }
}
