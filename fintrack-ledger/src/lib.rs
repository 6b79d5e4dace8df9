//! Ledger collaborators for personal expense tracking in rupees.
//!
//! Everything here works on in-memory values: transactions are logged,
//! budgeted, categorised, filtered, analysed and reported, then optionally
//! exported to CSV or JSON. Amounts are formatted with `fintrack_core`.

pub mod analytics;
pub mod budgeter;
pub mod categorizer;
pub mod error;
pub mod exporter;
pub mod filter;
pub mod importer;
pub mod logger;
pub mod models;
pub mod recurring;
pub mod reporter;
pub mod savings;

pub use analytics::{Analytics, FestivalSpending};
pub use budgeter::BudgetManager;
pub use categorizer::{Categorizer, DEFAULT_CATEGORIES};
pub use error::LedgerError;
pub use exporter::{BudgetExporter, DEFAULT_CSV_DATE_FORMAT, TransactionExporter, write_to};
pub use filter::{FilterCriteria, SortField, TransactionFilter, filter_transactions};
pub use importer::ExpenseImporter;
pub use logger::ExpenseLogger;
pub use models::*;
pub use recurring::RecurringExpenseManager;
pub use reporter::{GstOptions, Reporter};
pub use savings::SavingsGoalManager;
