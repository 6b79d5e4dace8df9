use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Days counted as one month when planning contributions.
pub(crate) const DAYS_PER_MONTH: i64 = 30;

/// A target amount to save by a deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: Option<u64>,
    pub name: String,
    pub target_amount: Decimal,
    pub current_saved: Decimal,
    pub deadline: NaiveDateTime,
}

impl SavingsGoal {
    /// # Errors
    ///
    /// Returns [`LedgerError`] if:
    /// - `target_amount` is not positive
    /// - `current_saved` is negative
    /// - `deadline` is not after `now`
    pub fn new(
        name: impl Into<String>,
        target_amount: Decimal,
        current_saved: Decimal,
        deadline: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<Self, LedgerError> {
        if target_amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidSavingsGoal(format!(
                "target amount must be positive, got {target_amount}"
            )));
        }
        if current_saved < Decimal::ZERO {
            return Err(LedgerError::InvalidSavingsGoal(format!(
                "current saved amount cannot be negative, got {current_saved}"
            )));
        }
        if deadline <= now {
            return Err(LedgerError::DeadlineNotInFuture(deadline));
        }

        Ok(Self {
            id: None,
            name: name.into(),
            target_amount,
            current_saved,
            deadline,
        })
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::NonPositiveAmount`] unless `amount` is above zero.
    pub fn add_contribution(
        &mut self,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        self.current_saved += amount;
        Ok(())
    }

    /// Capped at 100.
    pub fn progress_percentage(&self) -> Decimal {
        (self.current_saved / self.target_amount * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    }

    /// Negative once the goal is exceeded.
    pub fn remaining_amount(&self) -> Decimal {
        self.target_amount - self.current_saved
    }

    pub fn is_exceeded(&self) -> bool {
        self.current_saved > self.target_amount
    }

    pub fn excess_amount(&self) -> Decimal {
        (self.current_saved - self.target_amount).max(Decimal::ZERO)
    }

    /// Whole 30-day months until the deadline, never negative.
    pub fn months_remaining(
        &self,
        now: NaiveDateTime,
    ) -> i64 {
        ((self.deadline - now).num_days() / DAYS_PER_MONTH).max(0)
    }

    /// Contribution needed each month to reach the target; zero once met.
    pub fn monthly_required(
        &self,
        now: NaiveDateTime,
    ) -> Decimal {
        let remaining = self.remaining_amount();
        if remaining <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        remaining / Decimal::from(self.months_remaining(now).max(1))
    }

    pub fn is_on_track(
        &self,
        monthly_savings: Decimal,
        now: NaiveDateTime,
    ) -> bool {
        monthly_savings >= self.monthly_required(now)
    }
}
