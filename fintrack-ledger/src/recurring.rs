//! Scheduling for rent, bills and subscriptions.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{Frequency, LedgerError, RecurringExpense, Transaction};

/// Owns recurring expenses and turns due ones into transactions.
#[derive(Debug, Clone)]
pub struct RecurringExpenseManager {
    expenses: Vec<RecurringExpense>,
    next_id: u64,
}

impl Default for RecurringExpenseManager {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            next_id: 1,
        }
    }
}

impl RecurringExpenseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::NonPositiveAmount`] unless `amount` is above zero.
    pub fn add(
        &mut self,
        amount: Decimal,
        description: &str,
        frequency: Frequency,
        next_due_date: NaiveDate,
        category: Option<&str>,
    ) -> Result<RecurringExpense, LedgerError> {
        let mut expense = RecurringExpense::new(amount, description, frequency, next_due_date)?;
        expense.category = category.map(str::to_string);
        expense.id = Some(self.next_id);
        self.next_id += 1;

        debug!(id = ?expense.id, %next_due_date, frequency = frequency.as_str(), "recurring expense added");
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Expenses due on or before `check`.
    pub fn due_expenses(
        &self,
        check: NaiveDate,
    ) -> Vec<&RecurringExpense> {
        self.expenses.iter().filter(|e| e.is_due(check)).collect()
    }

    /// Builds an unlogged transaction dated at the expense's due date.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RecurringExpenseNotFound`] for an unknown id.
    pub fn generate_transaction(
        &self,
        id: u64,
    ) -> Result<Transaction, LedgerError> {
        let expense = self
            .recurring_expense(id)
            .ok_or(LedgerError::RecurringExpenseNotFound(id))?;

        let mut txn = Transaction::new(
            expense.amount,
            expense.description.clone(),
            expense.next_due_date.and_time(NaiveTime::MIN),
        )?;
        txn.category = expense.category.clone();
        Ok(txn)
    }

    /// Moves the due date forward one period and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] for an unknown id or a date past the calendar's end.
    pub fn mark_as_paid(
        &mut self,
        id: u64,
    ) -> Result<NaiveDate, LedgerError> {
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.id == Some(id))
            .ok_or(LedgerError::RecurringExpenseNotFound(id))?;

        let next = expense.following_due_date()?;
        debug!(id, from = %expense.next_due_date, to = %next, "recurring expense paid");
        expense.next_due_date = next;
        Ok(next)
    }

    pub fn recurring_expense(
        &self,
        id: u64,
    ) -> Option<&RecurringExpense> {
        self.expenses.iter().find(|e| e.id == Some(id))
    }

    pub fn list(&self) -> &[RecurringExpense] {
        &self.expenses
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::RecurringExpenseNotFound`] for an unknown id.
    pub fn remove(
        &mut self,
        id: u64,
    ) -> Result<RecurringExpense, LedgerError> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == Some(id))
            .ok_or(LedgerError::RecurringExpenseNotFound(id))?;
        Ok(self.expenses.remove(index))
    }
}
