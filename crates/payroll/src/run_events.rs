//! Events emitted by payroll runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wagemill_core::{OrganizationId, PayPeriod};
use wagemill_events::{Event, OrganizationScoped};

use crate::payment::RunTotals;

/// A bulk payroll run finished normally.
///
/// Published once per completed run for logging/notification consumers.
/// Cancelled runs do not emit this event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunCompleted {
    pub organization_id: OrganizationId,
    pub period: PayPeriod,
    pub totals: RunTotals,
    pub occurred_at: DateTime<Utc>,
}

impl Event for PayrollRunCompleted {
    fn event_type(&self) -> &'static str {
        "payroll.run.completed"
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

impl OrganizationScoped for PayrollRunCompleted {
    fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}
