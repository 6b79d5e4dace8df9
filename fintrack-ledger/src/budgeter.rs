//! Per-category budgets.

use rust_decimal::Decimal;
use tracing::debug;

use crate::{Budget, BudgetPeriod, LedgerError};

/// Budgets keyed by category, kept in creation order.
#[derive(Debug, Clone, Default)]
pub struct BudgetManager {
    budgets: Vec<Budget>,
}

impl BudgetManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`LedgerError`] if:
    /// - a budget already exists for `category`
    /// - `amount` is negative
    pub fn create_budget(
        &mut self,
        category: &str,
        amount: Decimal,
        period: BudgetPeriod,
    ) -> Result<&Budget, LedgerError> {
        if self.budget(category).is_some() {
            return Err(LedgerError::DuplicateBudget(category.to_string()));
        }

        self.budgets.push(Budget::new(category, amount, period)?);
        debug!(category, %amount, period = period.as_str(), "budget created");
        Ok(&self.budgets[self.budgets.len() - 1])
    }

    pub fn budget(
        &self,
        category: &str,
    ) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }

    /// Adds `amount` to the category's spending. Categories without a budget
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeAmount`] if `amount` is below zero.
    pub fn record_expense(
        &mut self,
        category: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        match self.budgets.iter_mut().find(|b| b.category == category) {
            Some(budget) => budget.add_expense(amount),
            None => {
                debug!(category, %amount, "no budget for category; expense not tracked");
                Ok(())
            }
        }
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }
}
