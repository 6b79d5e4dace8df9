//! In-memory expense log with sequential ids and duplicate detection.

use chrono::NaiveDateTime;
use fintrack_core::format_inr;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{LedgerError, Transaction};

/// Records expenses and assigns each one an id, starting at 1.
#[derive(Debug, Clone)]
pub struct ExpenseLogger {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl Default for ExpenseLogger {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 1,
        }
    }
}

impl ExpenseLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs a new expense and returns the stored transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if:
    /// - `amount` is negative
    /// - an existing transaction is a duplicate and `allow_duplicates` is false
    pub fn log_expense(
        &mut self,
        amount: Decimal,
        description: &str,
        category: Option<&str>,
        date: NaiveDateTime,
        allow_duplicates: bool,
    ) -> Result<Transaction, LedgerError> {
        let mut txn = Transaction::new(amount, description, date)?;
        txn.category = category.map(str::to_string);
        self.record(txn, allow_duplicates)
    }

    /// Logs an already-built transaction, replacing any id it carries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] under the same conditions as [`Self::log_expense`].
    pub fn record(
        &mut self,
        mut txn: Transaction,
        allow_duplicates: bool,
    ) -> Result<Transaction, LedgerError> {
        if txn.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(txn.amount));
        }

        if !allow_duplicates && self.transactions.iter().any(|t| txn.is_duplicate_of(t)) {
            warn!(
                description = %txn.description,
                amount = %txn.amount,
                "rejecting duplicate transaction"
            );
            return Err(LedgerError::DuplicateTransaction {
                description: txn.description,
                amount: format_inr(txn.amount),
            });
        }

        txn.id = Some(self.next_id);
        self.next_id += 1;
        debug!(id = ?txn.id, amount = %txn.amount, "expense logged");

        self.transactions.push(txn.clone());
        Ok(txn)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn total_expenses(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, d)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    /// Initializes tracing subscriber for tests that verify log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut logger = ExpenseLogger::new();

        let first = logger.log_expense(dec!(20), "Chai", None, day(15), false).unwrap();
        let second = logger
            .log_expense(dec!(150), "Auto fare", Some("Transport"), day(15), false)
            .unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(second.category.as_deref(), Some("Transport"));
    }

    #[test]
    fn total_sums_all_amounts() {
        let mut logger = ExpenseLogger::new();
        logger.log_expense(dec!(20.50), "Chai", None, day(15), false).unwrap();
        logger.log_expense(dec!(5000), "Groceries", None, day(16), false).unwrap();

        assert_eq!(logger.total_expenses(), dec!(5020.50));
        assert_eq!(logger.transactions().len(), 2);
    }

    #[test]
    fn empty_logger_totals_zero() {
        assert_eq!(ExpenseLogger::new().total_expenses(), Decimal::ZERO);
    }

    #[test]
    fn duplicate_is_rejected_and_id_not_consumed() {
        let _guard = init_test_tracing();
        let mut logger = ExpenseLogger::new();
        logger.log_expense(dec!(20), "Chai", None, day(15), false).unwrap();

        let result = logger.log_expense(dec!(20), " chai ", None, day(15), false);
        let next = logger.log_expense(dec!(25), "Chai", None, day(15), false).unwrap();

        assert!(matches!(
            result,
            Err(LedgerError::DuplicateTransaction { ref amount, .. }) if amount == "₹20.00"
        ));
        assert_eq!(next.id, Some(2));
    }

    #[test]
    fn duplicate_allowed_when_requested() {
        let mut logger = ExpenseLogger::new();
        logger.log_expense(dec!(20), "Chai", None, day(15), false).unwrap();

        let result = logger.log_expense(dec!(20), "Chai", None, day(15), true);

        assert!(result.is_ok());
        assert_eq!(logger.transactions().len(), 2);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut logger = ExpenseLogger::new();

        let result = logger.log_expense(dec!(-1), "Refund", None, day(15), false);

        assert!(matches!(result, Err(LedgerError::NegativeAmount(_))));
        assert!(logger.transactions().is_empty());
    }
}
