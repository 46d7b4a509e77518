//! `wagemill-payroll` — salary computation and run events.
//!
//! Pure payroll arithmetic (tax schedules, pro-rating, attendance
//! deductions) plus the event types a payroll run emits. Running payroll
//! across a workforce lives in `wagemill-infra`.

pub mod calculation;
pub mod payment;
pub mod run_events;
pub mod tax;

pub use calculation::{AttendanceSummary, PayslipBreakdown, calculate_payslip};
pub use payment::{PaymentRecord, RunTotals};
pub use run_events::PayrollRunCompleted;
pub use tax::{TaxBracket, TaxSchedule};
