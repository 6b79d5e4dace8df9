use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Capitalised name for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(LedgerError::InvalidPeriod(s.to_string())),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spending allowance for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub spent: Decimal,
}

impl Budget {
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeAmount`] if `amount` is below zero.
    pub fn new(
        category: impl Into<String>,
        amount: Decimal,
        period: BudgetPeriod,
    ) -> Result<Self, LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(amount));
        }

        Ok(Self {
            category: category.into(),
            amount,
            period,
            spent: Decimal::ZERO,
        })
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeAmount`] if `amount` is below zero.
    pub fn add_expense(
        &mut self,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(amount));
        }
        self.spent += amount;
        Ok(())
    }

    /// Negative once the budget is exceeded.
    pub fn remaining(&self) -> Decimal {
        self.amount - self.spent
    }

    pub fn is_exceeded(&self) -> bool {
        self.spent > self.amount
    }

    /// Spent as a percentage of the allowance; zero for a zero allowance.
    pub fn utilization_percentage(&self) -> Decimal {
        if self.amount.is_zero() {
            return Decimal::ZERO;
        }
        self.spent / self.amount * Decimal::ONE_HUNDRED
    }
}
