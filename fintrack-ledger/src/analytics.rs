//! Spending aggregates and plain-language insights.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use fintrack_core::format_inr;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::Transaction;

/// Bucket for transactions without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Totals for one festival (or any other) category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FestivalSpending {
    pub total: Decimal,
    pub count: usize,
    pub average: Decimal,
    pub formatted_total: String,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy)]
pub struct Analytics<'a> {
    transactions: &'a [Transaction],
}

impl<'a> Analytics<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// Spending dated within `days` before `as_of`, divided by `days`.
    ///
    /// Returns zero when `days` is zero or nothing falls in the window.
    pub fn average_daily_spending(
        &self,
        days: u32,
        as_of: NaiveDateTime,
    ) -> Decimal {
        if days == 0 {
            return Decimal::ZERO;
        }

        let cutoff = as_of - Duration::days(i64::from(days));
        let total: Decimal = self
            .transactions
            .iter()
            .filter(|t| t.date >= cutoff)
            .map(|t| t.amount)
            .sum();

        total / Decimal::from(days)
    }

    /// Totals per category, sorted by name.
    pub fn spending_by_category(&self) -> BTreeMap<String, Decimal> {
        let mut by_category = BTreeMap::new();
        for txn in self.transactions {
            let category = txn.category.as_deref().unwrap_or(UNCATEGORIZED);
            *by_category
                .entry(category.to_string())
                .or_insert(Decimal::ZERO) += txn.amount;
        }
        by_category
    }

    pub fn festival_spending(
        &self,
        category: &str,
    ) -> FestivalSpending {
        let transactions: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.category.as_deref() == Some(category))
            .cloned()
            .collect();

        let total: Decimal = transactions.iter().map(|t| t.amount).sum();
        let count = transactions.len();
        let average = if count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(count)
        };

        FestivalSpending {
            total,
            count,
            average,
            formatted_total: format_inr(total),
            transactions,
        }
    }

    pub fn insights(&self) -> Vec<String> {
        if self.transactions.is_empty() {
            return vec!["No transaction data available for analysis.".to_string()];
        }

        let total: Decimal = self.transactions.iter().map(|t| t.amount).sum();
        let average = total / Decimal::from(self.transactions.len());

        let mut insights = vec![
            format!("Total spending: {}", format_inr(total)),
            format!("Average transaction: {}", format_inr(average)),
        ];

        // First category wins a tie.
        let mut top: Option<(String, Decimal)> = None;
        for (category, amount) in self.spending_by_category() {
            if top.as_ref().is_none_or(|(_, best)| amount > *best) {
                top = Some((category, amount));
            }
        }
        if let Some((category, amount)) = top {
            insights.push(format!(
                "Highest spending category: {category} ({})",
                format_inr(amount)
            ));
        }

        insights
    }
}
