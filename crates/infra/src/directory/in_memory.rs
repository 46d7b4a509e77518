//! In-memory employee directory for tests/dev.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use wagemill_core::{EmployeeId, Entity, OrganizationId, PayPeriod};
use wagemill_employees::Employee;
use wagemill_payroll::AttendanceSummary;

use super::{DirectoryError, EmployeeCursor, EmployeeDirectory};

/// Expected working days per month when no attendance record exists.
const DEFAULT_WORKING_DAYS: u32 = 22;

/// In-memory directory.
///
/// Employees are kept in insertion order, which doubles as the stable
/// "creation order" the engine's ordering guarantee is defined over.
/// Intended for tests/dev; not optimized.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    employees: RwLock<Vec<Employee>>,
    attendance: RwLock<HashMap<(EmployeeId, PayPeriod), AttendanceSummary>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, employee: Employee) {
        if let Ok(mut employees) = self.employees.write() {
            employees.push(employee);
        }
    }

    /// Record attendance facts for one employee in one period.
    pub fn record_attendance(
        &self,
        employee_id: EmployeeId,
        period: PayPeriod,
        summary: AttendanceSummary,
    ) {
        if let Ok(mut attendance) = self.attendance.write() {
            attendance.insert((employee_id, period), summary);
        }
    }

    fn eligible_ids(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
    ) -> Result<Vec<EmployeeId>, DirectoryError> {
        let employees = self
            .employees
            .read()
            .map_err(|_| DirectoryError::Backend("lock poisoned".to_string()))?;
        Ok(employees
            .iter()
            .filter(|e| e.organization_id() == organization_id && e.is_payable_in(&period))
            .map(|e| *e.id())
            .collect())
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryDirectory {
    async fn count_eligible(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
    ) -> Result<usize, DirectoryError> {
        Ok(self.eligible_ids(organization_id, period)?.len())
    }

    async fn list_eligible(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
    ) -> Result<Vec<EmployeeId>, DirectoryError> {
        self.eligible_ids(organization_id, period)
    }

    async fn load(&self, employee_id: EmployeeId) -> Result<Option<Employee>, DirectoryError> {
        let employees = self
            .employees
            .read()
            .map_err(|_| DirectoryError::Backend("lock poisoned".to_string()))?;
        Ok(employees.iter().find(|e| *e.id() == employee_id).cloned())
    }

    async fn attendance_for(
        &self,
        employee_id: EmployeeId,
        period: PayPeriod,
    ) -> Result<AttendanceSummary, DirectoryError> {
        let attendance = self
            .attendance
            .read()
            .map_err(|_| DirectoryError::Backend("lock poisoned".to_string()))?;
        Ok(attendance
            .get(&(employee_id, period))
            .copied()
            .unwrap_or_else(|| AttendanceSummary::clean(DEFAULT_WORKING_DAYS)))
    }

    async fn open_cursor(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
    ) -> Result<Box<dyn EmployeeCursor>, DirectoryError> {
        // Snapshot at open so a run observes a stable population even if the
        // directory changes mid-run.
        let ids = self.eligible_ids(organization_id, period)?;
        Ok(Box::new(SnapshotCursor {
            ids: Arc::from(ids),
            offset: 0,
        }))
    }
}

/// Cursor over an immutable snapshot of eligible ids.
struct SnapshotCursor {
    ids: Arc<[EmployeeId]>,
    offset: usize,
}

#[async_trait]
impl EmployeeCursor for SnapshotCursor {
    async fn next_page(&mut self, limit: usize) -> Result<Vec<EmployeeId>, DirectoryError> {
        if self.offset >= self.ids.len() {
            return Ok(Vec::new());
        }
        let end = (self.offset + limit).min(self.ids.len());
        let page = self.ids[self.offset..end].to_vec();
        self.offset = end;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wagemill_core::Money;
    use wagemill_employees::CompensationPlan;

    fn employee(organization_id: OrganizationId, hired_on: NaiveDate) -> Employee {
        Employee::hire(
            EmployeeId::new(),
            organization_id,
            "Test Employee",
            hired_on,
            CompensationPlan::base_only(Money::from_cents(250_000)).unwrap(),
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn lists_in_insertion_order_and_filters_by_organization() {
        let directory = InMemoryDirectory::new();
        let org = OrganizationId::new();
        let other_org = OrganizationId::new();
        let period = PayPeriod::new(8, 2026).unwrap();

        let a = employee(org, date(2025, 1, 1));
        let b = employee(org, date(2025, 6, 1));
        let foreign = employee(other_org, date(2025, 1, 1));
        let ids = vec![*a.id(), *b.id()];

        directory.insert(a);
        directory.insert(foreign);
        directory.insert(b);

        assert_eq!(directory.list_eligible(org, period).await.unwrap(), ids);
        assert_eq!(directory.count_eligible(org, period).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn employees_hired_after_the_period_are_not_eligible() {
        let directory = InMemoryDirectory::new();
        let org = OrganizationId::new();
        let period = PayPeriod::new(8, 2026).unwrap();

        directory.insert(employee(org, date(2026, 9, 1)));

        assert_eq!(directory.count_eligible(org, period).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn cursor_pages_match_the_materialized_list() {
        let directory = InMemoryDirectory::new();
        let org = OrganizationId::new();
        let period = PayPeriod::new(8, 2026).unwrap();

        for _ in 0..7 {
            directory.insert(employee(org, date(2025, 1, 1)));
        }
        let all = directory.list_eligible(org, period).await.unwrap();

        let mut cursor = directory.open_cursor(org, period).await.unwrap();
        let mut paged = Vec::new();
        loop {
            let page = cursor.next_page(3).await.unwrap();
            if page.is_empty() {
                break;
            }
            assert!(page.len() <= 3);
            paged.extend(page);
        }

        assert_eq!(paged, all);
    }

    #[tokio::test]
    async fn attendance_defaults_to_full_presence() {
        let directory = InMemoryDirectory::new();
        let org = OrganizationId::new();
        let period = PayPeriod::new(8, 2026).unwrap();
        let e = employee(org, date(2025, 1, 1));
        let id = *e.id();
        directory.insert(e);

        let summary = directory.attendance_for(id, period).await.unwrap();
        assert_eq!(summary.unpaid_leave_days, 0);

        directory.record_attendance(
            id,
            period,
            AttendanceSummary {
                working_days: 22,
                unpaid_leave_days: 4,
            },
        );
        let summary = directory.attendance_for(id, period).await.unwrap();
        assert_eq!(summary.unpaid_leave_days, 4);
    }
}
