//! Monthly payslip computation.
//!
//! Pure arithmetic: pro-rate the compensation plan over the days actually
//! employed, deduct unpaid absence at the daily base rate, then withhold tax
//! on what remains. No IO and no rounding surprises (integer cents,
//! truncation toward zero).

use serde::{Deserialize, Serialize};

use wagemill_core::{DomainError, DomainResult, Money, PayPeriod};
use wagemill_employees::Employee;

use crate::tax::TaxSchedule;

/// Attendance facts for one employee in one period.
///
/// `working_days` is how many days the employee was expected in;
/// `unpaid_leave_days` is absence outside any paid-leave arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub working_days: u32,
    pub unpaid_leave_days: u32,
}

impl AttendanceSummary {
    /// Full attendance: present every expected day.
    pub fn clean(working_days: u32) -> Self {
        Self {
            working_days,
            unpaid_leave_days: 0,
        }
    }
}

/// The computed lines of one payslip.
///
/// Invariant: `net + tax + attendance_deduction == gross`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipBreakdown {
    pub base_pay: Money,
    pub allowance_pay: Money,
    pub gross: Money,
    pub attendance_deduction: Money,
    pub taxable: Money,
    pub tax: Money,
    pub net: Money,
}

/// Compute one employee's payslip for one period.
///
/// Errors: `Ineligible` when the employee has no employed days in the period;
/// `Validation` when attendance claims more unpaid absence than expected
/// working days.
pub fn calculate_payslip(
    employee: &Employee,
    attendance: &AttendanceSummary,
    schedule: &TaxSchedule,
    period: &PayPeriod,
) -> DomainResult<PayslipBreakdown> {
    let employed_days = employee.employed_days_in(period);
    if employed_days == 0 {
        return Err(DomainError::ineligible(format!(
            "no employed days in {period}"
        )));
    }
    if attendance.unpaid_leave_days > attendance.working_days {
        return Err(DomainError::validation(format!(
            "unpaid leave days ({}) exceed working days ({})",
            attendance.unpaid_leave_days, attendance.working_days
        )));
    }

    let days_in_month = period.days();
    let plan = employee.compensation();

    let base_pay = plan
        .monthly_base()
        .prorate(employed_days, days_in_month)
        .ok_or_else(|| DomainError::invariant("period has zero days"))?;
    let allowance_pay = plan
        .total_allowances()
        .prorate(employed_days, days_in_month)
        .ok_or_else(|| DomainError::invariant("period has zero days"))?;
    let gross = base_pay + allowance_pay;

    // Unpaid absence beyond the employed window deducts nothing extra.
    let unpaid_days = attendance.unpaid_leave_days.min(employed_days);
    let attendance_deduction = plan
        .monthly_base()
        .prorate(unpaid_days, days_in_month)
        .ok_or_else(|| DomainError::invariant("period has zero days"))?;

    let taxable = gross.sub_clamped(attendance_deduction);
    let tax = schedule.tax_on(taxable);
    let net = taxable - tax;

    Ok(PayslipBreakdown {
        base_pay,
        allowance_pay,
        gross,
        attendance_deduction,
        taxable,
        tax,
        net,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wagemill_core::{EmployeeId, OrganizationId};
    use wagemill_employees::{Allowance, CompensationPlan};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee_with(base_cents: i64, allowance_cents: i64, hired_on: NaiveDate) -> Employee {
        let allowances = if allowance_cents > 0 {
            vec![Allowance {
                name: "housing".to_string(),
                amount: Money::from_cents(allowance_cents),
            }]
        } else {
            Vec::new()
        };
        let plan =
            CompensationPlan::new(Money::from_cents(base_cents), allowances).unwrap();
        Employee::hire(
            EmployeeId::new(),
            OrganizationId::new(),
            "Test Employee",
            hired_on,
            plan,
        )
        .unwrap()
    }

    // June 2026 has 30 days; convenient divisors.
    fn june() -> PayPeriod {
        PayPeriod::new(6, 2026).unwrap()
    }

    #[test]
    fn full_month_flat_tax() {
        let employee = employee_with(300_000, 30_000, date(2025, 1, 1));
        let schedule = TaxSchedule::flat(1_000).unwrap(); // 10%
        let slip = calculate_payslip(
            &employee,
            &AttendanceSummary::clean(22),
            &schedule,
            &june(),
        )
        .unwrap();

        assert_eq!(slip.base_pay, Money::from_cents(300_000));
        assert_eq!(slip.allowance_pay, Money::from_cents(30_000));
        assert_eq!(slip.gross, Money::from_cents(330_000));
        assert_eq!(slip.attendance_deduction, Money::ZERO);
        assert_eq!(slip.tax, Money::from_cents(33_000));
        assert_eq!(slip.net, Money::from_cents(297_000));
    }

    #[test]
    fn mid_month_hire_is_prorated() {
        // Hired June 16: 15 of 30 days.
        let employee = employee_with(300_000, 0, date(2026, 6, 16));
        let slip = calculate_payslip(
            &employee,
            &AttendanceSummary::clean(11),
            &TaxSchedule::exempt(),
            &june(),
        )
        .unwrap();

        assert_eq!(slip.base_pay, Money::from_cents(150_000));
        assert_eq!(slip.net, Money::from_cents(150_000));
    }

    #[test]
    fn unpaid_leave_deducts_daily_base_rate() {
        let employee = employee_with(300_000, 0, date(2025, 1, 1));
        let attendance = AttendanceSummary {
            working_days: 22,
            unpaid_leave_days: 3,
        };
        let slip =
            calculate_payslip(&employee, &attendance, &TaxSchedule::exempt(), &june()).unwrap();

        // 3/30 of 3000.00
        assert_eq!(slip.attendance_deduction, Money::from_cents(30_000));
        assert_eq!(slip.net, Money::from_cents(270_000));
    }

    #[test]
    fn ineligible_employee_is_rejected() {
        let employee = employee_with(300_000, 0, date(2026, 7, 1));
        let err = calculate_payslip(
            &employee,
            &AttendanceSummary::clean(22),
            &TaxSchedule::exempt(),
            &june(),
        )
        .unwrap_err();
        match err {
            DomainError::Ineligible(_) => {}
            other => panic!("expected Ineligible error, got {other:?}"),
        }
    }

    #[test]
    fn absurd_attendance_is_rejected() {
        let employee = employee_with(300_000, 0, date(2025, 1, 1));
        let attendance = AttendanceSummary {
            working_days: 20,
            unpaid_leave_days: 21,
        };
        let err =
            calculate_payslip(&employee, &attendance, &TaxSchedule::exempt(), &june()).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: the payslip lines always reconcile to gross.
            #[test]
            fn lines_reconcile_to_gross(
                base in 0i64..100_000_000,
                allowance in 0i64..10_000_000,
                hire_day in 1u32..=30,
                unpaid in 0u32..=22,
            ) {
                let employee = employee_with(base, allowance, date(2026, 6, hire_day));
                let attendance = AttendanceSummary {
                    working_days: 22,
                    unpaid_leave_days: unpaid,
                };
                let schedule = TaxSchedule::flat(1_500).unwrap();
                let slip =
                    calculate_payslip(&employee, &attendance, &schedule, &june()).unwrap();

                prop_assert_eq!(
                    slip.net + slip.tax + slip.attendance_deduction,
                    slip.gross
                );
                prop_assert!(!slip.net.is_negative());
            }
        }
    }
}
