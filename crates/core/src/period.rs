//! Pay periods (calendar months).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A single pay period: one calendar month of one year.
///
/// Construction is validated; a `PayPeriod` value always denotes a real
/// calendar month.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    month: u32,
    year: i32,
}

impl PayPeriod {
    /// Create a period, rejecting out-of-range months and years.
    pub fn new(month: u32, year: i32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(format!(
                "month must be 1..=12, got {month}"
            )));
        }
        if !(1970..=9999).contains(&year) {
            return Err(DomainError::validation(format!(
                "year out of range: {year}"
            )));
        }
        Ok(Self { month, year })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated in `new`; a (year, month, 1) date always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("PayPeriod holds a valid month")
    }

    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("PayPeriod holds a valid month")
            .pred_opt()
            .expect("first of month has a predecessor")
    }

    /// Number of calendar days in the period.
    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

impl ValueObject for PayPeriod {}

impl core::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
