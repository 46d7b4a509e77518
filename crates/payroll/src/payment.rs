//! Posted payments and run-level totals.

use serde::{Deserialize, Serialize};

use wagemill_core::{EmployeeId, Money};

/// A successfully posted salary payment for one employee in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub employee_id: EmployeeId,
    pub amount: Money,
    pub transaction_ref: String,
}

/// Summary totals of one bulk payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Sum of net amounts across successful payments.
    pub total_amount: Money,
}
