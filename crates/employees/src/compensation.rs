//! Compensation plans: base salary plus recurring allowances.

use serde::{Deserialize, Serialize};

use wagemill_core::{DomainError, DomainResult, Money, ValueObject};

/// A recurring monthly allowance (housing, transport, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    pub name: String,
    pub amount: Money,
}

/// What an employee earns per month, before deductions and tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationPlan {
    monthly_base: Money,
    allowances: Vec<Allowance>,
}

impl CompensationPlan {
    /// Build a plan, rejecting negative amounts and unnamed allowances.
    pub fn new(monthly_base: Money, allowances: Vec<Allowance>) -> DomainResult<Self> {
        if monthly_base.is_negative() {
            return Err(DomainError::validation(format!(
                "monthly base must not be negative, got {monthly_base}"
            )));
        }
        for allowance in &allowances {
            if allowance.name.trim().is_empty() {
                return Err(DomainError::validation("allowance name must not be empty"));
            }
            if allowance.amount.is_negative() {
                return Err(DomainError::validation(format!(
                    "allowance '{}' must not be negative",
                    allowance.name
                )));
            }
        }
        Ok(Self {
            monthly_base,
            allowances,
        })
    }

    /// Plan with a base salary and no allowances.
    pub fn base_only(monthly_base: Money) -> DomainResult<Self> {
        Self::new(monthly_base, Vec::new())
    }

    pub fn monthly_base(&self) -> Money {
        self.monthly_base
    }

    pub fn allowances(&self) -> &[Allowance] {
        &self.allowances
    }

    pub fn total_allowances(&self) -> Money {
        self.allowances.iter().map(|a| a.amount).sum()
    }
}

impl ValueObject for CompensationPlan {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_base() {
        let err = CompensationPlan::base_only(Money::from_cents(-1)).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unnamed_allowance() {
        let err = CompensationPlan::new(
            Money::from_cents(100_000),
            vec![Allowance {
                name: "  ".to_string(),
                amount: Money::from_cents(5_000),
            }],
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn totals_allowances() {
        let plan = CompensationPlan::new(
            Money::from_cents(100_000),
            vec![
                Allowance {
                    name: "housing".to_string(),
                    amount: Money::from_cents(20_000),
                },
                Allowance {
                    name: "transport".to_string(),
                    amount: Money::from_cents(5_000),
                },
            ],
        )
        .unwrap();
        assert_eq!(plan.total_allowances(), Money::from_cents(25_000));
    }
}
