//! Employee entity: identity, employment interval, compensation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use wagemill_core::{DomainError, DomainResult, EmployeeId, Entity, OrganizationId, PayPeriod};

use crate::compensation::CompensationPlan;

/// Employment status lifecycle.
///
/// `OnLeave` covers paid leave; unpaid absence is carried in attendance
/// records, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Active,
    OnLeave,
    Terminated,
}

/// An employee of one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    organization_id: OrganizationId,
    name: String,
    status: EmploymentStatus,
    hired_on: NaiveDate,
    terminated_on: Option<NaiveDate>,
    compensation: CompensationPlan,
}

impl Employee {
    /// Hire an employee. Name must be non-empty.
    pub fn hire(
        id: EmployeeId,
        organization_id: OrganizationId,
        name: impl Into<String>,
        hired_on: NaiveDate,
        compensation: CompensationPlan,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("employee name must not be empty"));
        }
        Ok(Self {
            id,
            organization_id,
            name,
            status: EmploymentStatus::Active,
            hired_on,
            terminated_on: None,
            compensation,
        })
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> EmploymentStatus {
        self.status
    }

    pub fn hired_on(&self) -> NaiveDate {
        self.hired_on
    }

    pub fn terminated_on(&self) -> Option<NaiveDate> {
        self.terminated_on
    }

    pub fn compensation(&self) -> &CompensationPlan {
        &self.compensation
    }

    pub fn place_on_leave(&mut self) -> DomainResult<()> {
        match self.status {
            EmploymentStatus::Active => {
                self.status = EmploymentStatus::OnLeave;
                Ok(())
            }
            EmploymentStatus::OnLeave => Err(DomainError::conflict("already on leave")),
            EmploymentStatus::Terminated => {
                Err(DomainError::conflict("terminated employees cannot take leave"))
            }
        }
    }

    pub fn reinstate(&mut self) -> DomainResult<()> {
        match self.status {
            EmploymentStatus::OnLeave => {
                self.status = EmploymentStatus::Active;
                Ok(())
            }
            _ => Err(DomainError::conflict("only employees on leave can be reinstated")),
        }
    }

    /// Terminate employment effective `last_day` (inclusive).
    pub fn terminate(&mut self, last_day: NaiveDate) -> DomainResult<()> {
        if self.status == EmploymentStatus::Terminated {
            return Err(DomainError::conflict("already terminated"));
        }
        if last_day < self.hired_on {
            return Err(DomainError::validation(
                "termination date precedes hire date",
            ));
        }
        self.status = EmploymentStatus::Terminated;
        self.terminated_on = Some(last_day);
        Ok(())
    }

    /// Number of days this employee was employed within `period` (inclusive).
    ///
    /// Drives pro-rating: mid-month hires and terminations earn a fraction of
    /// the monthly base.
    pub fn employed_days_in(&self, period: &PayPeriod) -> u32 {
        let start = self.hired_on.max(period.first_day());
        let end = match self.terminated_on {
            Some(last) => last.min(period.last_day()),
            None => period.last_day(),
        };
        if start > end {
            return 0;
        }
        (end - start).num_days() as u32 + 1
    }

    /// Whether this employee earns anything in `period`.
    ///
    /// Employees on paid leave stay payable; terminated employees are payable
    /// for the final, partial month.
    pub fn is_payable_in(&self, period: &PayPeriod) -> bool {
        self.employed_days_in(period) > 0
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
