//! Employee population source (directory port).
//!
//! The directory answers "who gets paid this period" and hands out the
//! per-employee facts the unit processor needs. Implementations back onto
//! whatever stores the workforce; this crate ships an in-memory one for
//! tests and development.

pub mod in_memory;

use async_trait::async_trait;
use thiserror::Error;

use wagemill_core::{EmployeeId, OrganizationId, PayPeriod};
use wagemill_employees::Employee;
use wagemill_payroll::AttendanceSummary;

pub use in_memory::InMemoryDirectory;

/// Error type for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory backend error: {0}")]
    Backend(String),

    #[error("directory query error: {0}")]
    Query(String),
}

/// A server-side cursor over one organization's eligible employees.
///
/// Pages are fetched lazily, bounding peak memory to one page. The cursor is
/// owned by exactly one consumer; it is never shared across tasks. Page
/// order must match [`EmployeeDirectory::list_eligible`] for the same
/// population, so streaming and in-memory runs see the same sequence.
#[async_trait]
pub trait EmployeeCursor: Send {
    /// Fetch up to `limit` employee ids. An empty page means exhaustion.
    async fn next_page(&mut self, limit: usize) -> Result<Vec<EmployeeId>, DirectoryError>;
}

/// Read-side port for the employee population.
///
/// Eligibility means the employee has at least one employed day in the
/// period. Ordering is stable creation order, so repeated queries over an
/// unchanged population return the same sequence.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Number of employees eligible for payroll in `period`.
    async fn count_eligible(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
    ) -> Result<usize, DirectoryError>;

    /// All eligible employee ids, materialized, in stable creation order.
    async fn list_eligible(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
    ) -> Result<Vec<EmployeeId>, DirectoryError>;

    /// Load one employee by id.
    async fn load(&self, employee_id: EmployeeId) -> Result<Option<Employee>, DirectoryError>;

    /// Attendance facts for one employee in one period.
    async fn attendance_for(
        &self,
        employee_id: EmployeeId,
        period: PayPeriod,
    ) -> Result<AttendanceSummary, DirectoryError>;

    /// Open a paging cursor over the eligible population.
    async fn open_cursor(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
    ) -> Result<Box<dyn EmployeeCursor>, DirectoryError>;
}
