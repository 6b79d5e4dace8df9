//! CSV importer for expense statements.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column        | Required | Notes                                          |
//! |---------------|----------|------------------------------------------------|
//! | `date`        | yes      | `YYYY-MM-DD`                                   |
//! | `description` | yes      |                                                |
//! | `amount`      | yes      | May carry `₹` and commas, e.g. `"₹1,250.50"`  |
//! | `category`    | no       | Leave the cell empty for an uncategorised row  |
//!
//! ```csv
//! date,description,amount,category
//! 2024-10-30,Diwali sweets,"₹3,000.00",Festivals
//! 2024-10-31,Chai,20,
//! ```

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use fintrack_core::parse_inr;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{LedgerError, Transaction};

const IMPORT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct ExpenseRow {
    date: String,
    description: String,
    amount: String,
    #[serde(default)]
    category: Option<String>,
}

/// Reads transactions from CSV exports of bank or wallet statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseImporter;

impl ExpenseImporter {
    /// Parses every row into an unlogged [`Transaction`] dated at midnight.
    ///
    /// Rows are returned in file order; row numbers in errors are 1-based
    /// and do not count the header.
    ///
    /// # Errors
    ///
    /// * [`LedgerError::Csv`] when the CSV is malformed or a column is missing.
    /// * [`LedgerError::InvalidDate`] / [`LedgerError::InvalidAmount`] for a bad cell.
    /// * [`LedgerError::NegativeAmount`] for a negative amount.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Transaction>, LedgerError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let transactions = reader
            .deserialize::<ExpenseRow>()
            .enumerate()
            .map(|(idx, result)| convert_row(result?, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = transactions.len(), "expenses imported");
        Ok(transactions)
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] when the file cannot be opened, otherwise
    /// the errors of [`ExpenseImporter::parse`].
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Transaction>, LedgerError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::parse(file)
    }
}

fn convert_row(
    row: ExpenseRow,
    row_number: usize,
) -> Result<Transaction, LedgerError> {
    let date = NaiveDate::parse_from_str(&row.date, IMPORT_DATE_FORMAT).map_err(|_| {
        warn!(row = row_number, value = %row.date, "rejected import date");
        LedgerError::InvalidDate {
            row: row_number,
            value: row.date.clone(),
        }
    })?;

    let amount = parse_inr(&row.amount).map_err(|source| LedgerError::InvalidAmount {
        row: row_number,
        source,
    })?;

    let txn = Transaction::new(amount, row.description, date.and_time(NaiveTime::MIN))?;
    Ok(match row.category.filter(|c| !c.is_empty()) {
        Some(category) => txn.with_category(category),
        None => txn,
    })
}
