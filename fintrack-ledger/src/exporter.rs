//! CSV and JSON export of transactions and budgets.

use std::fmt::Write as _;
use std::path::Path;

use chrono::NaiveDateTime;
use fintrack_core::{fiscal_year, format_inr};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::{Budget, LedgerError, Transaction};

/// Indian day-first date layout used by default in CSV exports.
pub const DEFAULT_CSV_DATE_FORMAT: &str = "%d-%m-%Y";

const JSON_DATE_FORMAT: &str = "%Y-%m-%d";
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Serialized shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct TransactionRecord<'a> {
    date: String,
    description: &'a str,
    amount: Decimal,
    category: Option<&'a str>,
    id: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TransactionMetadata {
    export_date: String,
    fiscal_year: String,
    total_count: usize,
    total_amount: Decimal,
    formatted_total: String,
}

#[derive(Debug, Serialize)]
struct TransactionExport<'a> {
    transactions: Vec<TransactionRecord<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<TransactionMetadata>,
}

#[derive(Debug, Serialize)]
struct BudgetRecord<'a> {
    category: &'a str,
    amount: Decimal,
    spent: Decimal,
    period: &'static str,
    remaining: Decimal,
    exceeded: bool,
    utilization: Decimal,
}

#[derive(Debug, Serialize)]
struct BudgetMetadata {
    export_date: String,
    fiscal_year: String,
    budget_count: usize,
    total_budget: Decimal,
    total_spent: Decimal,
    formatted_budget: String,
    formatted_spent: String,
}

#[derive(Debug, Serialize)]
struct BudgetExport<'a> {
    budgets: Vec<BudgetRecord<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<BudgetMetadata>,
}

// ---------------------------------------------------------------------------
// Exporters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct TransactionExporter<'a> {
    transactions: &'a [Transaction],
}

impl<'a> TransactionExporter<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// One row per transaction under a `Date,Description,Amount (₹),Category`
    /// header. Amounts are INR-formatted and missing categories are written
    /// as `Uncategorized`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidDateFormat`] for an unusable
    /// `date_format` and [`LedgerError::Csv`] if writing a record fails.
    pub fn to_csv(
        &self,
        date_format: &str,
    ) -> Result<String, LedgerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["Date", "Description", "Amount (₹)", "Category"])?;

        for txn in self.transactions {
            let date = format_date(txn.date, date_format)?;
            let amount = format_inr(txn.amount);
            let category = txn.category.as_deref().unwrap_or("Uncategorized");
            writer.write_record([date.as_str(), txn.description.as_str(), amount.as_str(), category])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| LedgerError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| LedgerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Pretty-printed JSON; `metadata` adds export time, fiscal year and totals.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Json`] if serialization fails.
    pub fn to_json(
        &self,
        include_metadata: bool,
        now: NaiveDateTime,
    ) -> Result<String, LedgerError> {
        let transactions = self
            .transactions
            .iter()
            .map(|txn| TransactionRecord {
                date: txn.date.format(JSON_DATE_FORMAT).to_string(),
                description: &txn.description,
                amount: txn.amount,
                category: txn.category.as_deref(),
                id: txn.id,
            })
            .collect();

        let metadata = include_metadata.then(|| {
            let total_amount: Decimal = self.transactions.iter().map(|t| t.amount).sum();
            TransactionMetadata {
                export_date: now.format(EXPORT_TIMESTAMP_FORMAT).to_string(),
                fiscal_year: fiscal_year(&now),
                total_count: self.transactions.len(),
                total_amount,
                formatted_total: format_inr(total_amount),
            }
        });

        let export = TransactionExport {
            transactions,
            metadata,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BudgetExporter<'a> {
    budgets: &'a [Budget],
}

impl<'a> BudgetExporter<'a> {
    pub fn new(budgets: &'a [Budget]) -> Self {
        Self { budgets }
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::Json`] if serialization fails.
    pub fn to_json(
        &self,
        include_metadata: bool,
        now: NaiveDateTime,
    ) -> Result<String, LedgerError> {
        let budgets = self
            .budgets
            .iter()
            .map(|budget| BudgetRecord {
                category: &budget.category,
                amount: budget.amount,
                spent: budget.spent,
                period: budget.period.as_str(),
                remaining: budget.remaining(),
                exceeded: budget.is_exceeded(),
                utilization: budget.utilization_percentage(),
            })
            .collect();

        let metadata = include_metadata.then(|| {
            let total_budget: Decimal = self.budgets.iter().map(|b| b.amount).sum();
            let total_spent: Decimal = self.budgets.iter().map(|b| b.spent).sum();
            BudgetMetadata {
                export_date: now.format(EXPORT_TIMESTAMP_FORMAT).to_string(),
                fiscal_year: fiscal_year(&now),
                budget_count: self.budgets.len(),
                total_budget,
                total_spent,
                formatted_budget: format_inr(total_budget),
                formatted_spent: format_inr(total_spent),
            }
        });

        Ok(serde_json::to_string_pretty(&BudgetExport { budgets, metadata })?)
    }
}

/// Writes an export to disk, replacing any existing file.
///
/// # Errors
///
/// Returns [`LedgerError::Io`] if the file cannot be written.
pub fn write_to(
    path: impl AsRef<Path>,
    contents: &str,
) -> Result<(), LedgerError> {
    let path = path.as_ref();
    std::fs::write(path, contents)?;
    debug!(path = %path.display(), bytes = contents.len(), "export written");
    Ok(())
}

/// chrono reports bad format strings through `fmt::Error`.
fn format_date(
    date: NaiveDateTime,
    format: &str,
) -> Result<String, LedgerError> {
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| LedgerError::InvalidDateFormat(format.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    use super::*;
    use crate::BudgetPeriod;

    fn on(
        month: u32,
        day: u32,
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    }

    fn transactions() -> Vec<Transaction> {
        let mut rent = Transaction::new(dec!(15000), "Rent, October", on(10, 1))
            .unwrap()
            .with_category("Utilities");
        rent.id = Some(1);
        let mut chai = Transaction::new(dec!(20), "Chai", on(10, 2)).unwrap();
        chai.id = Some(2);
        vec![rent, chai]
    }

    // =========================================================================
    // CSV
    // =========================================================================

    #[test]
    fn csv_uses_indian_dates_and_amounts() {
        let txns = transactions();

        let csv = TransactionExporter::new(&txns)
            .to_csv(DEFAULT_CSV_DATE_FORMAT)
            .unwrap();

        let expected = "\
Date,Description,Amount (₹),Category
01-10-2024,\"Rent, October\",\"₹15,000.00\",Utilities
02-10-2024,Chai,₹20.00,Uncategorized
";
        assert_eq!(csv, expected);
    }

    #[test]
    fn csv_custom_date_format() {
        let txns = transactions();

        let csv = TransactionExporter::new(&txns).to_csv("%Y/%m/%d").unwrap();

        assert!(csv.contains("2024/10/02,Chai"));
    }

    #[test]
    fn csv_rejects_bad_date_format() {
        let txns = transactions();

        let result = TransactionExporter::new(&txns).to_csv("%Q");

        assert!(matches!(result, Err(LedgerError::InvalidDateFormat(f)) if f == "%Q"));
    }

    #[test]
    fn csv_with_no_transactions_is_header_only() {
        let csv = TransactionExporter::new(&[]).to_csv(DEFAULT_CSV_DATE_FORMAT).unwrap();

        assert_eq!(csv, "Date,Description,Amount (₹),Category\n");
    }

    // =========================================================================
    // JSON
    // =========================================================================

    #[test]
    fn transaction_json_with_metadata() {
        let txns = transactions();

        let raw = TransactionExporter::new(&txns).to_json(true, on(10, 31)).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(
            value["transactions"][0],
            json!({
                "date": "2024-10-01",
                "description": "Rent, October",
                "amount": "15000",
                "category": "Utilities",
                "id": 1
            })
        );
        assert_eq!(value["transactions"][1]["category"], Value::Null);
        assert_eq!(
            value["metadata"],
            json!({
                "export_date": "2024-10-31 08:15:00",
                "fiscal_year": "FY2024-25",
                "total_count": 2,
                "total_amount": "15020",
                "formatted_total": "₹15,020.00"
            })
        );
    }

    #[test]
    fn transaction_json_without_metadata() {
        let txns = transactions();

        let raw = TransactionExporter::new(&txns).to_json(false, on(10, 31)).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();

        assert!(value.get("metadata").is_none());
        assert_eq!(value["transactions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn budget_json_reports_utilisation() {
        let mut food = Budget::new("Street Food", dec!(2000), BudgetPeriod::Monthly).unwrap();
        food.add_expense(dec!(2500)).unwrap();
        let budgets = vec![food];

        let raw = BudgetExporter::new(&budgets).to_json(true, on(3, 31)).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["budgets"][0]["period"], "monthly");
        assert_eq!(value["budgets"][0]["remaining"], "-500");
        assert_eq!(value["budgets"][0]["exceeded"], true);
        let utilization: Decimal = value["budgets"][0]["utilization"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(utilization, dec!(125));
        assert_eq!(value["metadata"]["fiscal_year"], "FY2023-24");
        assert_eq!(value["metadata"]["formatted_spent"], "₹2,500.00");
        assert_eq!(value["metadata"]["budget_count"], 1);
    }

    #[test]
    fn write_to_creates_file() {
        let path = std::env::temp_dir().join(format!("fintrack-export-{}.csv", std::process::id()));

        write_to(&path, "Date,Description\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Date,Description\n");
        std::fs::remove_file(&path).unwrap();
    }
}
