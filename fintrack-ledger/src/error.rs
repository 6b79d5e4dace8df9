use chrono::{NaiveDate, NaiveDateTime};
use fintrack_core::InrFormatError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the ledger collaborators.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount cannot be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("duplicate transaction detected: {description} for {amount}")]
    DuplicateTransaction { description: String, amount: String },

    #[error("budget already exists for category: {0}")]
    DuplicateBudget(String),

    #[error("invalid category '{category}'. Valid categories: {valid}")]
    InvalidCategory { category: String, valid: String },

    #[error("transaction already has category '{0}'; set overwrite to change it")]
    AlreadyCategorized(String),

    #[error("recurring expense with id {0} not found")]
    RecurringExpenseNotFound(u64),

    #[error("savings goal with id {0} not found")]
    SavingsGoalNotFound(u64),

    #[error("frequency must be one of daily, weekly, monthly, yearly; got '{0}'")]
    InvalidFrequency(String),

    #[error("budget period must be one of weekly, monthly, yearly; got '{0}'")]
    InvalidPeriod(String),

    #[error("invalid sort field '{0}': must be one of date, amount, category, description")]
    InvalidSortField(String),

    #[error("start date {start} cannot be after end date {end}")]
    InvalidDateRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("invalid amount range: {0}")]
    InvalidAmountRange(String),

    #[error("invalid savings goal: {0}")]
    InvalidSavingsGoal(String),

    #[error("deadline {0} must be in the future")]
    DeadlineNotInFuture(NaiveDateTime),

    #[error("no date follows {0} in the supported calendar range")]
    DateOutOfRange(NaiveDate),

    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("invalid date format string '{0}'")]
    InvalidDateFormat(String),

    #[error("row {row}: invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: {source}")]
    InvalidAmount {
        row: usize,
        #[source]
        source: InrFormatError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
