//! Chainable filtering and sorting over a set of transactions.
//!
//! Every filter narrows the current results (AND semantics). Sorting and
//! limiting act on whatever the previous steps left.
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use fintrack_ledger::{SortField, Transaction, TransactionFilter};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let transactions = vec![
//!     Transaction::new(dec!(20), "Chai", date).unwrap().with_category("Street Food"),
//!     Transaction::new(dec!(150), "Auto fare", date).unwrap().with_category("Transport"),
//!     Transaction::new(dec!(35), "Samosa chai", date).unwrap().with_category("Street Food"),
//! ];
//!
//! let mut filter = TransactionFilter::new(&transactions);
//! filter
//!     .category("Street Food")
//!     .search_description("chai", false)
//!     .sort_by(SortField::Amount, true);
//!
//! assert_eq!(filter.count(), 2);
//! assert_eq!(filter.total_amount(), dec!(55));
//! assert_eq!(filter.results()[0].description, "Samosa chai");
//! ```

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::{LedgerError, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    /// Uncategorised transactions sort as an empty category.
    Category,
    /// Case-insensitive.
    Description,
}

impl FromStr for SortField {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            "description" => Ok(Self::Description),
            _ => Err(LedgerError::InvalidSortField(s.to_string())),
        }
    }
}

/// Criteria for [`filter_transactions`]. Unset fields do not filter.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub search_term: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransactionFilter<'a> {
    source: &'a [Transaction],
    filtered: Option<Vec<&'a Transaction>>,
}

impl<'a> TransactionFilter<'a> {
    pub fn new(source: &'a [Transaction]) -> Self {
        Self {
            source,
            filtered: None,
        }
    }

    /// Keeps transactions whose description contains `term`. An empty term
    /// keeps everything.
    pub fn search_description(
        &mut self,
        term: &str,
        case_sensitive: bool,
    ) -> &mut Self {
        if term.is_empty() {
            return self;
        }

        if case_sensitive {
            self.apply(|t| t.description.contains(term))
        } else {
            let needle = term.to_lowercase();
            self.apply(|t| t.description.to_lowercase().contains(&needle))
        }
    }

    pub fn category(
        &mut self,
        category: &str,
    ) -> &mut Self {
        self.apply(|t| t.category.as_deref() == Some(category))
    }

    /// Keeps transactions in any of `categories`. An empty list keeps everything.
    pub fn categories(
        &mut self,
        categories: &[&str],
    ) -> &mut Self {
        if categories.is_empty() {
            return self;
        }
        self.apply(|t| {
            t.category
                .as_deref()
                .is_some_and(|c| categories.contains(&c))
        })
    }

    /// Inclusive on both ends; `None` leaves that side open.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidDateRange`] if `start` is after `end`.
    pub fn date_range(
        &mut self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<&mut Self, LedgerError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(LedgerError::InvalidDateRange { start, end });
            }
        }

        Ok(self.apply(|t| {
            start.is_none_or(|s| t.date >= s) && end.is_none_or(|e| t.date <= e)
        }))
    }

    /// Inclusive on both ends; `None` leaves that side open.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmountRange`] if a bound is negative or
    /// `min` exceeds `max`.
    pub fn amount_range(
        &mut self,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> Result<&mut Self, LedgerError> {
        if min.is_some_and(|m| m < Decimal::ZERO) {
            return Err(LedgerError::InvalidAmountRange(
                "minimum amount cannot be negative".to_string(),
            ));
        }
        if max.is_some_and(|m| m < Decimal::ZERO) {
            return Err(LedgerError::InvalidAmountRange(
                "maximum amount cannot be negative".to_string(),
            ));
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(LedgerError::InvalidAmountRange(format!(
                    "minimum {min} is greater than maximum {max}"
                )));
            }
        }

        Ok(self.apply(|t| {
            min.is_none_or(|m| t.amount >= m) && max.is_none_or(|m| t.amount <= m)
        }))
    }

    pub fn uncategorized(&mut self) -> &mut Self {
        self.apply(|t| t.category.is_none())
    }

    pub fn categorized(&mut self) -> &mut Self {
        self.apply(|t| t.category.is_some())
    }

    /// Stable sort; equal keys keep their current order in both directions.
    pub fn sort_by(
        &mut self,
        field: SortField,
        descending: bool,
    ) -> &mut Self {
        let compare = |a: &&Transaction, b: &&Transaction| -> Ordering {
            match field {
                SortField::Date => a.date.cmp(&b.date),
                SortField::Amount => a.amount.cmp(&b.amount),
                SortField::Category => a
                    .category
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.category.as_deref().unwrap_or("")),
                SortField::Description => a
                    .description
                    .to_lowercase()
                    .cmp(&b.description.to_lowercase()),
            }
        };

        let current = self.current_mut();
        if descending {
            current.sort_by(|a, b| compare(b, a));
        } else {
            current.sort_by(compare);
        }
        self
    }

    pub fn limit(
        &mut self,
        count: usize,
    ) -> &mut Self {
        self.current_mut().truncate(count);
        self
    }

    /// Drops every filter, sort and limit.
    pub fn reset(&mut self) -> &mut Self {
        self.filtered = None;
        self
    }

    pub fn results(&self) -> Vec<&'a Transaction> {
        match &self.filtered {
            Some(filtered) => filtered.clone(),
            None => self.source.iter().collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.filtered
            .as_ref()
            .map_or(self.source.len(), |filtered| filtered.len())
    }

    pub fn total_amount(&self) -> Decimal {
        self.results().iter().map(|t| t.amount).sum()
    }

    fn current_mut(&mut self) -> &mut Vec<&'a Transaction> {
        let source = self.source;
        self.filtered.get_or_insert_with(|| source.iter().collect())
    }

    fn apply<F>(
        &mut self,
        predicate: F,
    ) -> &mut Self
    where
        F: Fn(&Transaction) -> bool,
    {
        self.current_mut().retain(|t| predicate(*t));
        self
    }
}

/// Applies the set criteria in one pass and returns owned copies.
///
/// # Errors
///
/// Returns [`LedgerError`] for an inverted date range or an invalid amount range.
pub fn filter_transactions(
    transactions: &[Transaction],
    criteria: &FilterCriteria,
) -> Result<Vec<Transaction>, LedgerError> {
    let mut filter = TransactionFilter::new(transactions);

    if let Some(category) = criteria.category.as_deref().filter(|c| !c.is_empty()) {
        filter.category(category);
    }
    if criteria.start_date.is_some() || criteria.end_date.is_some() {
        filter.date_range(criteria.start_date, criteria.end_date)?;
    }
    if criteria.min_amount.is_some() || criteria.max_amount.is_some() {
        filter.amount_range(criteria.min_amount, criteria.max_amount)?;
    }
    if let Some(term) = criteria.search_term.as_deref() {
        filter.search_description(term, false);
    }

    Ok(filter.results().into_iter().cloned().collect())
}
