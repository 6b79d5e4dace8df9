use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// A single expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned by [`crate::ExpenseLogger`]; `None` until logged.
    pub id: Option<u64>,
    pub amount: Decimal,
    pub description: String,
    pub category: Option<String>,
    pub date: NaiveDateTime,
}

impl Transaction {
    /// Creates an uncategorised transaction. Zero amounts are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeAmount`] if `amount` is below zero.
    pub fn new(
        amount: Decimal,
        description: impl Into<String>,
        date: NaiveDateTime,
    ) -> Result<Self, LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(amount));
        }

        Ok(Self {
            id: None,
            amount,
            description: description.into(),
            category: None,
            date,
        })
    }

    pub fn with_category(
        mut self,
        category: impl Into<String>,
    ) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Same amount on the same day with the same description, ignoring case
    /// and surrounding whitespace.
    pub fn is_duplicate_of(
        &self,
        other: &Transaction,
    ) -> bool {
        self.amount == other.amount
            && self.date.date() == other.date.date()
            && self.description.trim().to_lowercase() == other.description.trim().to_lowercase()
    }
}
