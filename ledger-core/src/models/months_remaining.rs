use std::num::NonZeroU32;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonthsRemainingError {
    #[error("months remaining must be at least 1")]
    Zero,
}

/// Number of months left in the tax year, never zero.
///
/// The withholding formulas divide by this value, so a zero count is
/// rejected at construction instead of at calculation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MonthsRemaining(NonZeroU32);

impl MonthsRemaining {
    pub fn new(months: u32) -> Result<Self, MonthsRemainingError> {
        NonZeroU32::new(months)
            .map(Self)
            .ok_or(MonthsRemainingError::Zero)
    }

    /// Months from `date` through December, counting the month of `date`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use ledger_core::MonthsRemaining;
    ///
    /// let july = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
    /// assert_eq!(MonthsRemaining::through_year_end(july).get(), 6);
    /// ```
    pub fn through_year_end(date: NaiveDate) -> Self {
        // month() is 1..=12, so the difference is 1..=12
        Self(NonZeroU32::new(13 - date.month()).unwrap_or(NonZeroU32::MIN))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.get())
    }
}

impl TryFrom<u32> for MonthsRemaining {
    type Error = MonthsRemainingError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Self::new(months)
    }
}

impl From<MonthsRemaining> for u32 {
    fn from(months: MonthsRemaining) -> Self {
        months.get()
    }
}
