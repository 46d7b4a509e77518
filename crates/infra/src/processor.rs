//! Per-employee unit processing.
//!
//! A unit is one employee's salary computation plus its persistence write.
//! The engine treats the processor as an opaque, possibly-failing,
//! possibly-slow operation; everything it can go wrong with is returned as a
//! `UnitError`, never thrown across the batch.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use wagemill_core::{DomainError, EmployeeId, PayPeriod, PaymentId};
use wagemill_payroll::{PaymentRecord, TaxSchedule, calculate_payslip};

use crate::directory::EmployeeDirectory;
use crate::ledger::PaymentLedger;

/// Error type for one unit of work.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("employee not found")]
    NotFound,

    #[error(transparent)]
    Computation(#[from] DomainError),

    #[error("employee directory error: {0}")]
    Directory(String),

    #[error("payment ledger error: {0}")]
    Ledger(String),
}

/// Process one employee for one period.
#[async_trait]
pub trait UnitProcessor: Send + Sync {
    async fn process_unit(
        &self,
        employee_id: EmployeeId,
        period: PayPeriod,
    ) -> Result<PaymentRecord, UnitError>;
}

/// The standard unit processor: load, compute, post.
pub struct PayrollUnitProcessor<D, L> {
    directory: Arc<D>,
    ledger: Arc<L>,
    schedule: TaxSchedule,
}

impl<D, L> PayrollUnitProcessor<D, L> {
    pub fn new(directory: Arc<D>, ledger: Arc<L>, schedule: TaxSchedule) -> Self {
        Self {
            directory,
            ledger,
            schedule,
        }
    }
}

#[async_trait]
impl<D, L> UnitProcessor for PayrollUnitProcessor<D, L>
where
    D: EmployeeDirectory,
    L: PaymentLedger,
{
    async fn process_unit(
        &self,
        employee_id: EmployeeId,
        period: PayPeriod,
    ) -> Result<PaymentRecord, UnitError> {
        let employee = self
            .directory
            .load(employee_id)
            .await
            .map_err(|e| UnitError::Directory(e.to_string()))?
            .ok_or(UnitError::NotFound)?;
        let attendance = self
            .directory
            .attendance_for(employee_id, period)
            .await
            .map_err(|e| UnitError::Directory(e.to_string()))?;

        let slip = calculate_payslip(&employee, &attendance, &self.schedule, &period)?;

        let record = PaymentRecord {
            employee_id,
            amount: slip.net,
            transaction_ref: format!("PAY-{}", PaymentId::new()),
        };
        self.ledger
            .post(record.clone())
            .await
            .map_err(|e| UnitError::Ledger(e.to_string()))?;

        debug!(
            employee_id = %employee_id,
            period = %period,
            net = %record.amount,
            transaction_ref = %record.transaction_ref,
            "posted salary payment"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wagemill_core::{Entity, Money, OrganizationId};
    use wagemill_employees::{CompensationPlan, Employee};
    use wagemill_payroll::AttendanceSummary;

    use crate::directory::InMemoryDirectory;
    use crate::ledger::InMemoryPaymentLedger;

    fn setup() -> (
        Arc<InMemoryDirectory>,
        Arc<InMemoryPaymentLedger>,
        PayrollUnitProcessor<InMemoryDirectory, InMemoryPaymentLedger>,
    ) {
        let directory = Arc::new(InMemoryDirectory::new());
        let ledger = Arc::new(InMemoryPaymentLedger::new());
        let processor = PayrollUnitProcessor::new(
            directory.clone(),
            ledger.clone(),
            TaxSchedule::flat(1_000).unwrap(),
        );
        (directory, ledger, processor)
    }

    fn hire(directory: &InMemoryDirectory, organization_id: OrganizationId) -> EmployeeId {
        let employee = Employee::hire(
            EmployeeId::new(),
            organization_id,
            "Test Employee",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            CompensationPlan::base_only(Money::from_cents(300_000)).unwrap(),
        )
        .unwrap();
        let id = *employee.id();
        directory.insert(employee);
        id
    }

    #[tokio::test]
    async fn computes_and_posts_a_payment() {
        let (directory, ledger, processor) = setup();
        let id = hire(&directory, OrganizationId::new());
        let period = PayPeriod::new(6, 2026).unwrap();

        let record = processor.process_unit(id, period).await.unwrap();

        // 3000.00 gross, 10% flat tax.
        assert_eq!(record.amount, Money::from_cents(270_000));
        assert!(record.transaction_ref.starts_with("PAY-"));
        assert_eq!(ledger.posted(), vec![record]);
    }

    #[tokio::test]
    async fn unknown_employee_is_not_found() {
        let (_directory, ledger, processor) = setup();
        let period = PayPeriod::new(6, 2026).unwrap();

        let err = processor
            .process_unit(EmployeeId::new(), period)
            .await
            .unwrap_err();
        match err {
            UnitError::NotFound => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(ledger.posted().is_empty());
    }

    #[tokio::test]
    async fn invalid_attendance_surfaces_as_computation_error() {
        let (directory, ledger, processor) = setup();
        let id = hire(&directory, OrganizationId::new());
        let period = PayPeriod::new(6, 2026).unwrap();
        directory.record_attendance(
            id,
            period,
            AttendanceSummary {
                working_days: 10,
                unpaid_leave_days: 11,
            },
        );

        let err = processor.process_unit(id, period).await.unwrap_err();
        match err {
            UnitError::Computation(DomainError::Validation(_)) => {}
            other => panic!("expected Computation(Validation), got {other:?}"),
        }
        assert!(ledger.posted().is_empty());
    }
}
