use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use wagemill_core::{EmployeeId, Money, OrganizationId, PayPeriod};
use wagemill_employees::{Allowance, CompensationPlan, Employee};
use wagemill_payroll::{AttendanceSummary, TaxBracket, TaxSchedule, calculate_payslip};

fn sample_schedule() -> TaxSchedule {
    TaxSchedule::new(vec![
        TaxBracket {
            up_to: Some(Money::from_cents(100_000)),
            rate_bps: 500,
        },
        TaxBracket {
            up_to: Some(Money::from_cents(400_000)),
            rate_bps: 1_500,
        },
        TaxBracket {
            up_to: None,
            rate_bps: 3_000,
        },
    ])
    .unwrap()
}

fn sample_employee() -> Employee {
    let plan = CompensationPlan::new(
        Money::from_cents(550_000),
        vec![
            Allowance {
                name: "housing".to_string(),
                amount: Money::from_cents(80_000),
            },
            Allowance {
                name: "transport".to_string(),
                amount: Money::from_cents(20_000),
            },
        ],
    )
    .unwrap();
    Employee::hire(
        EmployeeId::new(),
        OrganizationId::new(),
        "Bench Employee",
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
        plan,
    )
    .unwrap()
}

fn bench_tax_on(c: &mut Criterion) {
    let schedule = sample_schedule();
    let mut group = c.benchmark_group("tax_on");
    for cents in [50_000i64, 350_000, 2_500_000] {
        group.bench_with_input(BenchmarkId::from_parameter(cents), &cents, |b, &cents| {
            b.iter(|| schedule.tax_on(black_box(Money::from_cents(cents))));
        });
    }
    group.finish();
}

fn bench_calculate_payslip(c: &mut Criterion) {
    let employee = sample_employee();
    let schedule = sample_schedule();
    let period = PayPeriod::new(8, 2026).unwrap();
    let attendance = AttendanceSummary {
        working_days: 21,
        unpaid_leave_days: 2,
    };

    c.bench_function("calculate_payslip", |b| {
        b.iter(|| {
            calculate_payslip(
                black_box(&employee),
                black_box(&attendance),
                black_box(&schedule),
                black_box(&period),
            )
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_tax_on, bench_calculate_payslip);
criterion_main!(benches);
