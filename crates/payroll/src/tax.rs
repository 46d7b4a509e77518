//! Progressive tax schedules.
//!
//! A schedule is a sorted list of marginal brackets. Each bracket taxes the
//! slice of income between the previous bound and its own `up_to` bound at
//! `rate_bps`; the final bracket is open-ended. Amounts are truncated toward
//! zero per bracket.

use serde::{Deserialize, Serialize};

use wagemill_core::{DomainError, DomainResult, Money};

/// One marginal bracket. `up_to` is the inclusive upper bound of taxable
/// income this bracket covers; `None` marks the open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub up_to: Option<Money>,
    pub rate_bps: u32,
}

/// A validated progressive tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Build a schedule from ordered brackets.
    ///
    /// Rules: at least one bracket; only the last may be open-ended (and must
    /// be); bounds strictly ascending and positive; rates at most 100%.
    pub fn new(brackets: Vec<TaxBracket>) -> DomainResult<Self> {
        if brackets.is_empty() {
            return Err(DomainError::validation("tax schedule needs at least one bracket"));
        }
        let mut previous_bound = Money::ZERO;
        for (idx, bracket) in brackets.iter().enumerate() {
            if bracket.rate_bps > 10_000 {
                return Err(DomainError::validation(format!(
                    "bracket {idx} rate exceeds 100% ({} bps)",
                    bracket.rate_bps
                )));
            }
            let is_last = idx == brackets.len() - 1;
            match bracket.up_to {
                Some(bound) => {
                    if is_last {
                        return Err(DomainError::validation(
                            "final bracket must be open-ended (up_to = None)",
                        ));
                    }
                    if bound <= previous_bound {
                        return Err(DomainError::validation(format!(
                            "bracket {idx} bound {bound} does not ascend"
                        )));
                    }
                    previous_bound = bound;
                }
                None => {
                    if !is_last {
                        return Err(DomainError::validation(format!(
                            "bracket {idx} is open-ended but not last"
                        )));
                    }
                }
            }
        }
        Ok(Self { brackets })
    }

    /// Single open-ended bracket at a flat rate.
    pub fn flat(rate_bps: u32) -> DomainResult<Self> {
        Self::new(vec![TaxBracket {
            up_to: None,
            rate_bps,
        }])
    }

    /// Zero-rate schedule (no withholding).
    pub fn exempt() -> Self {
        Self {
            brackets: vec![TaxBracket {
                up_to: None,
                rate_bps: 0,
            }],
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Marginal tax on `taxable`. Negative input taxes as zero.
    pub fn tax_on(&self, taxable: Money) -> Money {
        if taxable <= Money::ZERO {
            return Money::ZERO;
        }
        let mut tax = Money::ZERO;
        let mut lower = Money::ZERO;
        for bracket in &self.brackets {
            let upper = match bracket.up_to {
                Some(bound) => taxable.min(bound),
                None => taxable,
            };
            if upper <= lower {
                break;
            }
            tax += (upper - lower).mul_bps(bracket.rate_bps);
            lower = upper;
        }
        tax
    }
}
