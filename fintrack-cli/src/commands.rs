//! Subcommand handlers. Each returns the text to print.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use fintrack_core::calculations::common::round_half_up;
use fintrack_core::{
    Deductions, RegimeRecommendation, TaxCalculator, TaxRegime, fiscal_year, format_compact,
    format_inr, parse_inr, validate_inr_format,
};
use fintrack_ledger::{
    Categorizer, ExpenseImporter, ExpenseLogger, GstOptions, LedgerError, Reporter, Transaction,
    TransactionExporter, write_to,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::ExportConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

pub fn format_amount(amount: Decimal) -> String {
    format_inr(amount)
}

pub fn parse_amount(text: &str) -> Result<String> {
    let amount = parse_inr(text).with_context(|| format!("Failed to parse amount: {text}"))?;
    Ok(amount.to_string())
}

pub fn validate(text: &str) -> String {
    if validate_inr_format(text) {
        format!("✓ '{text}' is a valid INR amount")
    } else {
        format!("✗ '{text}' is not a valid INR amount")
    }
}

pub fn compact(amount: Decimal) -> String {
    format_compact(amount)
}

pub fn fiscal_year_of(
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> String {
    fiscal_year(&date.unwrap_or(today))
}

pub fn tax(
    calculator: &TaxCalculator,
    income: Decimal,
    regime: TaxRegime,
    deductions: &Deductions,
) -> Result<String> {
    calculator
        .render_breakdown(income, regime, deductions)
        .context("Failed to calculate tax")
}

pub fn compare(
    calculator: &TaxCalculator,
    income: Decimal,
    deductions: &Deductions,
) -> Result<String> {
    let comparison = calculator
        .compare_regimes(income, deductions)
        .context("Failed to compare regimes")?;

    let verdict = match comparison.recommendation {
        RegimeRecommendation::New => format!(
            "{} (saves {})",
            TaxRegime::New.label(),
            format_inr(comparison.savings)
        ),
        RegimeRecommendation::Old => format!(
            "{} (saves {})",
            TaxRegime::Old.label(),
            format_inr(comparison.savings)
        ),
        RegimeRecommendation::Equal => "either regime (same tax)".to_string(),
    };

    let lines = [
        format!("Annual Income: {}", format_inr(income)),
        format!(
            "New regime tax: {} (effective {:.2}%)",
            format_inr(comparison.new_regime.final_tax),
            round_half_up(comparison.new_regime.effective_rate)
        ),
        format!(
            "Old regime tax: {} (effective {:.2}%)",
            format_inr(comparison.old_regime.final_tax),
            round_half_up(comparison.old_regime.effective_rate)
        ),
        format!("Recommendation: {verdict}"),
    ];
    Ok(lines.join("\n"))
}

/// Imports a CSV statement, drops duplicate rows and auto-categorises the rest.
pub fn load_statement(path: &Path) -> Result<Vec<Transaction>> {
    let imported = ExpenseImporter::parse_file(path)
        .with_context(|| format!("Failed to import expenses from: {}", path.display()))?;

    let mut logger = ExpenseLogger::new();
    for txn in imported {
        match logger.record(txn, false) {
            // the logger has already warned about the skipped row
            Ok(_) | Err(LedgerError::DuplicateTransaction { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let categorizer = Categorizer::new();
    let mut transactions = logger.transactions().to_vec();
    for txn in transactions.iter_mut().filter(|t| t.category.is_none()) {
        categorizer.auto_categorize(txn);
    }

    info!(count = transactions.len(), path = %path.display(), "statement loaded");
    Ok(transactions)
}

/// `YYYY-MM` to a (year, month) pair.
pub fn parse_month(text: &str) -> Result<(i32, u32)> {
    let Some((year, month)) = text.trim().split_once('-') else {
        bail!("Invalid month '{text}': expected YYYY-MM");
    };
    let year = year
        .parse()
        .with_context(|| format!("Invalid year in '{text}'"))?;
    let month = month
        .parse()
        .with_context(|| format!("Invalid month in '{text}'"))?;
    Ok((year, month))
}

pub fn report(
    transactions: &[Transaction],
    month: Option<(i32, u32)>,
    gst: Option<GstOptions>,
) -> Result<String> {
    let reporter = match gst {
        Some(options) => Reporter::with_gst(options),
        None => Reporter::new(),
    };

    match month {
        Some((year, month)) => Ok(reporter.monthly_report(transactions, year, month)?),
        None => Ok(reporter.expense_summary(transactions)),
    }
}

pub fn export(
    transactions: &[Transaction],
    format: ExportFormat,
    config: &ExportConfig,
    output: Option<&Path>,
    now: NaiveDateTime,
) -> Result<String> {
    let exporter = TransactionExporter::new(transactions);
    let contents = match format {
        ExportFormat::Csv => exporter.to_csv(&config.date_format)?,
        ExportFormat::Json => exporter.to_json(config.include_metadata, now)?,
    };
    debug!(?format, bytes = contents.len(), "export rendered");

    match output {
        Some(path) => {
            write_to(path, &contents)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            Ok(format!(
                "Exported {} transactions to {}",
                transactions.len(),
                path.display()
            ))
        }
        None => Ok(contents),
    }
}

#[cfg(test)]
mod tests {
    use fintrack_core::{GstSupply, MarginalReliefMethod};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn statement() -> Vec<Transaction> {
        let at = date(2024, 10, 30).and_hms_opt(0, 0, 0).unwrap();
        vec![
            Transaction::new(dec!(3000), "Diwali sweets", at)
                .unwrap()
                .with_category("Festivals"),
            Transaction::new(dec!(20), "Chai", at).unwrap(),
        ]
    }

    // =========================================================================
    // INR utilities
    // =========================================================================

    #[test]
    fn format_parse_and_compact() {
        assert_eq!(format_amount(dec!(1234567.891)), "₹12,34,567.89");
        assert_eq!(parse_amount("₹1,00,000.50").unwrap(), "100000.50");
        assert_eq!(compact(dec!(250000)), "₹2.5 lakhs");
    }

    #[test]
    fn parse_failure_has_context() {
        let err = parse_amount("abc").unwrap_err();

        assert_eq!(err.to_string(), "Failed to parse amount: abc");
    }

    #[test]
    fn validate_reports_both_outcomes() {
        assert_eq!(validate("₹1,00,000.00"), "✓ '₹1,00,000.00' is a valid INR amount");
        assert_eq!(validate("₹100,000.00"), "✗ '₹100,000.00' is not a valid INR amount");
    }

    #[test]
    fn fiscal_year_defaults_to_today() {
        assert_eq!(fiscal_year_of(None, date(2025, 3, 31)), "FY2024-25");
        assert_eq!(fiscal_year_of(Some(date(2025, 4, 1)), date(2025, 3, 31)), "FY2025-26");
    }

    // =========================================================================
    // Tax
    // =========================================================================

    #[test]
    fn compare_recommends_new_regime() {
        let calculator = TaxCalculator::new();

        let output = compare(&calculator, dec!(1000000), &Deductions::default()).unwrap();

        assert_eq!(
            output,
            [
                "Annual Income: ₹10,00,000.00",
                "New regime tax: ₹45,000.00 (effective 4.50%)",
                "Old regime tax: ₹1,02,500.00 (effective 10.25%)",
                "Recommendation: NEW REGIME (saves ₹57,500.00)",
            ]
            .join("\n")
        );
    }

    #[test]
    fn tax_rejects_negative_income() {
        let calculator = TaxCalculator::with_marginal_relief(MarginalReliefMethod::Exact);

        let err = tax(&calculator, dec!(-1), TaxRegime::New, &Deductions::default()).unwrap_err();

        assert_eq!(err.to_string(), "Failed to calculate tax");
    }

    #[test]
    fn tax_renders_breakdown() {
        let output = tax(
            &TaxCalculator::new(),
            dec!(1000000),
            TaxRegime::New,
            &Deductions::default(),
        )
        .unwrap();

        assert!(output.contains("Regime: NEW REGIME"));
        assert!(output.contains("Taxable Income: ₹9,50,000.00"));
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    #[test]
    fn month_argument_parsing() {
        assert_eq!(parse_month("2024-10").unwrap(), (2024, 10));
        assert!(parse_month("October").is_err());
        assert!(parse_month("2024-xx").is_err());
    }

    #[test]
    fn report_with_inter_state_gst() {
        let gst = GstOptions {
            supply: GstSupply::InterState,
            per_category: false,
        };

        let output = report(&statement(), None, Some(gst)).unwrap();

        assert!(output.contains("IGST (18%): ₹543.60"));
        assert!(output.contains("Total with GST: ₹3,563.60"));
    }

    #[test]
    fn monthly_report_rejects_month_thirteen() {
        let err = report(&statement(), Some((2024, 13)), None).unwrap_err();

        assert!(err.to_string().contains("month must be between 1 and 12"));
    }

    #[test]
    fn export_to_stdout_as_csv() {
        let now = date(2024, 11, 1).and_hms_opt(12, 0, 0).unwrap();

        let output = export(&statement(), ExportFormat::Csv, &ExportConfig::default(), None, now).unwrap();

        assert_eq!(
            output,
            "Date,Description,Amount (₹),Category\n30-10-2024,Diwali sweets,\"₹3,000.00\",Festivals\n30-10-2024,Chai,₹20.00,Uncategorized\n"
        );
    }

    #[test]
    fn export_to_file_reports_destination() {
        let now = date(2024, 11, 1).and_hms_opt(12, 0, 0).unwrap();
        let path = std::env::temp_dir().join(format!("fintrack-cli-{}.json", std::process::id()));

        let message = export(&statement(), ExportFormat::Json, &ExportConfig::default(), Some(&path), now).unwrap();

        assert!(message.starts_with("Exported 2 transactions to "));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"fiscal_year\": \"FY2024-25\""));
        std::fs::remove_file(&path).unwrap();
    }
}
