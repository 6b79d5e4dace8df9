//! Plain-text expense, budget and monthly reports.

use std::collections::BTreeMap;

use chrono::{Datelike, Month};
use fintrack_core::calculations::common::round_half_up_dp;
use fintrack_core::{GstBreakdown, GstSupply, format_inr};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::UNCATEGORIZED;
use crate::{Budget, LedgerError, Transaction};

const RULE_WIDTH: usize = 50;

/// How GST is added to an expense summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GstOptions {
    pub supply: GstSupply,
    /// Also print the GST on each category subtotal.
    pub per_category: bool,
}

/// Renders reports, optionally adding GST to expense totals.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    gst: Option<GstOptions>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gst(gst: GstOptions) -> Self {
        Self { gst: Some(gst) }
    }

    pub fn gst(&self) -> Option<GstOptions> {
        self.gst
    }

    /// Transactions grouped by category (sorted by name) with subtotals and a
    /// grand total.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use fintrack_ledger::{Reporter, Transaction};
    /// use rust_decimal_macros::dec;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 10, 5).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let txn = Transaction::new(dec!(450), "Rice 5kg", date).unwrap().with_category("Groceries");
    ///
    /// let report = Reporter::new().expense_summary(&[txn]);
    ///
    /// assert!(report.contains("  - Rice 5kg: ₹450.00"));
    /// assert!(report.contains("Total Expenses: ₹450.00"));
    /// ```
    pub fn expense_summary(
        &self,
        transactions: &[Transaction],
    ) -> String {
        if transactions.is_empty() {
            return "No transactions to report.".to_string();
        }

        let mut lines = banner("EXPENSE SUMMARY");
        lines.extend(self.summary_body(transactions));
        lines.join("\n")
    }

    pub fn budget_report(
        &self,
        budgets: &[Budget],
    ) -> String {
        if budgets.is_empty() {
            return "No budgets to report.".to_string();
        }

        let mut lines = banner("BUDGET REPORT");
        for budget in budgets {
            lines.push(format!("Category: {}", budget.category));
            lines.push(format!("Period: {}", budget.period.label()));
            lines.push(format!("Allocated: {}", format_inr(budget.amount)));
            lines.push(format!("Spent: {}", format_inr(budget.spent)));
            lines.push(format!("Remaining: {}", format_inr(budget.remaining())));
            lines.push(format!(
                "Utilization: {:.1}%",
                round_half_up_dp(budget.utilization_percentage(), 1)
            ));
            if budget.is_exceeded() {
                lines.push("⚠️  BUDGET EXCEEDED!".to_string());
            }
            lines.push(String::new());
        }
        lines.push("=".repeat(RULE_WIDTH));

        lines.join("\n")
    }

    /// Expense summary restricted to one calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidMonth`] unless `month` is 1-12.
    pub fn monthly_report(
        &self,
        transactions: &[Transaction],
        year: i32,
        month: u32,
    ) -> Result<String, LedgerError> {
        let name = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(LedgerError::InvalidMonth(month))?
            .name();

        let in_month: Vec<Transaction> = transactions
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month)
            .cloned()
            .collect();

        if in_month.is_empty() {
            return Ok(format!("No transactions found for {month:02}/{year}"));
        }

        let mut lines = banner(&format!("MONTHLY REPORT - {name} {year}"));
        lines.extend(self.summary_body(&in_month));
        Ok(lines.join("\n"))
    }

    fn summary_body(
        &self,
        transactions: &[Transaction],
    ) -> Vec<String> {
        let mut by_category: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
        for txn in transactions {
            by_category
                .entry(txn.category.as_deref().unwrap_or(UNCATEGORIZED))
                .or_default()
                .push(txn);
        }

        let mut lines = Vec::new();
        let mut total = Decimal::ZERO;
        for (category, txns) in by_category {
            lines.push(format!("{category}:"));
            let mut subtotal = Decimal::ZERO;
            for txn in txns {
                lines.push(format!("  - {}: {}", txn.description, format_inr(txn.amount)));
                subtotal += txn.amount;
            }
            lines.push(format!("  Subtotal: {}", format_inr(subtotal)));
            if let Some(gst) = self.gst.filter(|g| g.per_category) {
                lines.extend(gst_lines(&GstBreakdown::compute(subtotal, gst.supply), "  "));
            }
            lines.push(String::new());
            total += subtotal;
        }

        lines.push("-".repeat(RULE_WIDTH));
        lines.push(format!("Total Expenses: {}", format_inr(total)));
        if let Some(gst) = self.gst {
            let breakdown = GstBreakdown::compute(total, gst.supply);
            lines.extend(gst_lines(&breakdown, ""));
            lines.push(format!(
                "Total with GST: {}",
                format_inr(breakdown.amount_with_gst)
            ));
        }
        lines.push("=".repeat(RULE_WIDTH));

        lines
    }
}

fn banner(title: &str) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    vec![rule.clone(), title.to_string(), rule, String::new()]
}

fn gst_lines(
    gst: &GstBreakdown,
    indent: &str,
) -> Vec<String> {
    match gst.supply {
        GstSupply::IntraState => vec![
            format!("{indent}CGST (9%): {}", format_inr(gst.cgst)),
            format!("{indent}SGST (9%): {}", format_inr(gst.sgst)),
        ],
        GstSupply::InterState => vec![format!("{indent}IGST (18%): {}", format_inr(gst.igst))],
    }
}
