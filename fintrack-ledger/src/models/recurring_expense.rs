use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Steps `from` forward by one period.
    ///
    /// Month and year steps land on the last day of the target month when the
    /// day does not exist there, so Jan 31 becomes Feb 29 (or 28) and Feb 29
    /// becomes Feb 28 the next year. Returns `None` past the end of the
    /// supported calendar.
    pub fn advance(
        &self,
        from: NaiveDate,
    ) -> Option<NaiveDate> {
        match self {
            Self::Daily => from.checked_add_days(Days::new(1)),
            Self::Weekly => from.checked_add_days(Days::new(7)),
            Self::Monthly => from.checked_add_months(Months::new(1)),
            Self::Yearly => from.checked_add_months(Months::new(12)),
        }
    }
}

impl FromStr for Frequency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(LedgerError::InvalidFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bill or subscription that repeats on a fixed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: Option<u64>,
    pub amount: Decimal,
    pub description: String,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
    pub category: Option<String>,
}

impl RecurringExpense {
    /// # Errors
    ///
    /// Returns [`LedgerError::NonPositiveAmount`] unless `amount` is above zero.
    pub fn new(
        amount: Decimal,
        description: impl Into<String>,
        frequency: Frequency,
        next_due_date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }

        Ok(Self {
            id: None,
            amount,
            description: description.into(),
            frequency,
            next_due_date,
            category: None,
        })
    }

    pub fn with_category(
        mut self,
        category: impl Into<String>,
    ) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Due on or after the due date.
    pub fn is_due(
        &self,
        check: NaiveDate,
    ) -> bool {
        check >= self.next_due_date
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::DateOutOfRange`] past the end of the calendar.
    pub fn following_due_date(&self) -> Result<NaiveDate, LedgerError> {
        self.frequency
            .advance(self.next_due_date)
            .ok_or(LedgerError::DateOutOfRange(self.next_due_date))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rent(
        frequency: Frequency,
        due: NaiveDate,
    ) -> RecurringExpense {
        RecurringExpense::new(dec!(15000), "Monthly rent", frequency, due).unwrap()
    }

    #[test]
    fn is_due_on_and_after_due_date() {
        let expense = rent(Frequency::Monthly, date(2024, 10, 25));

        assert!(!expense.is_due(date(2024, 10, 20)));
        assert!(expense.is_due(date(2024, 10, 25)));
        assert!(expense.is_due(date(2024, 10, 30)));
    }

    #[test]
    fn daily_and_weekly_steps() {
        assert_eq!(
            rent(Frequency::Daily, date(2024, 12, 31)).following_due_date().unwrap(),
            date(2025, 1, 1)
        );
        assert_eq!(
            rent(Frequency::Weekly, date(2024, 2, 26)).following_due_date().unwrap(),
            date(2024, 3, 4)
        );
    }

    #[test]
    fn monthly_step_clamps_to_leap_february() {
        let expense = rent(Frequency::Monthly, date(2024, 1, 31));

        assert_eq!(expense.following_due_date().unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn monthly_step_clamps_to_common_february() {
        let expense = rent(Frequency::Monthly, date(2023, 1, 31));

        assert_eq!(expense.following_due_date().unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn monthly_step_clamps_to_thirty_day_month() {
        let expense = rent(Frequency::Monthly, date(2024, 3, 31));

        assert_eq!(expense.following_due_date().unwrap(), date(2024, 4, 30));
    }

    #[test]
    fn monthly_step_rolls_over_year() {
        let expense = rent(Frequency::Monthly, date(2024, 12, 31));

        assert_eq!(expense.following_due_date().unwrap(), date(2025, 1, 31));
    }

    #[test]
    fn yearly_step_from_leap_day() {
        let expense = rent(Frequency::Yearly, date(2024, 2, 29));

        assert_eq!(expense.following_due_date().unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let result = RecurringExpense::new(Decimal::ZERO, "Nothing", Frequency::Daily, date(2024, 1, 1));

        assert!(matches!(result, Err(LedgerError::NonPositiveAmount(_))));
    }

    #[test]
    fn frequency_parses_case_insensitively() {
        assert_eq!("Monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert!(matches!(
            "biweekly".parse::<Frequency>(),
            Err(LedgerError::InvalidFrequency(f)) if f == "biweekly"
        ));
    }
}
