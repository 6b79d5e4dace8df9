//! Manual and keyword-based expense categorisation.

use tracing::debug;

use crate::{LedgerError, Transaction};

/// Categories offered when none are configured.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Groceries",
    "Transport",
    "Festivals",
    "Street Food",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Education",
    "Shopping",
    "Other",
];

struct KeywordRule {
    category: &'static str,
    keywords: &'static [&'static str],
}

/// Checked in order; the first rule with a matching keyword wins.
const KEYWORD_RULES: [KeywordRule; 9] = [
    KeywordRule {
        category: "Street Food",
        keywords: &[
            "chai", "tea", "samosa", "biryani", "vada pav", "pani puri", "pav bhaji", "dosa",
            "idli", "chaat",
        ],
    },
    KeywordRule {
        category: "Transport",
        keywords: &[
            "auto", "rickshaw", "cab", "ola", "uber", "metro", "bus", "train", "taxi", "fare",
        ],
    },
    KeywordRule {
        category: "Festivals",
        keywords: &[
            "diwali", "holi", "rakhi", "dussehra", "ganesh", "navratri", "eid", "christmas",
            "puja", "festival",
        ],
    },
    KeywordRule {
        category: "Groceries",
        keywords: &[
            "rice", "atta", "wheat", "dal", "vegetables", "veggies", "grocery", "groceries",
            "milk", "bread", "eggs",
        ],
    },
    KeywordRule {
        category: "Utilities",
        keywords: &[
            "electricity", "electric", "water", "gas", "cylinder", "bill", "recharge",
            "broadband", "internet", "wifi",
        ],
    },
    KeywordRule {
        category: "Entertainment",
        keywords: &[
            "movie", "cinema", "theater", "concert", "show", "restaurant", "netflix", "spotify",
            "game",
        ],
    },
    KeywordRule {
        category: "Healthcare",
        keywords: &[
            "medicine", "medical", "doctor", "hospital", "clinic", "pharmacy", "health",
            "insurance", "checkup",
        ],
    },
    KeywordRule {
        category: "Education",
        keywords: &[
            "book", "books", "tuition", "course", "class", "school", "college", "university",
            "education", "study",
        ],
    },
    KeywordRule {
        category: "Shopping",
        keywords: &[
            "clothes", "clothing", "shoes", "electronics", "phone", "laptop", "shopping",
            "amazon", "flipkart", "myntra",
        ],
    },
];

/// Assigns categories to transactions from a fixed list.
#[derive(Debug, Clone)]
pub struct Categorizer {
    valid_categories: Vec<String>,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self {
            valid_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Categorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `categories` as the valid set; an empty list falls back to the defaults.
    pub fn with_categories(categories: Vec<String>) -> Self {
        if categories.is_empty() {
            return Self::default();
        }
        Self {
            valid_categories: categories,
        }
    }

    pub fn is_valid_category(
        &self,
        category: &str,
    ) -> bool {
        self.valid_categories.iter().any(|c| c == category)
    }

    pub fn categories(&self) -> &[String] {
        &self.valid_categories
    }

    /// Assigns `category` to `txn`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if:
    /// - `category` is not one of the valid categories
    /// - `txn` already has a category and `overwrite` is false
    pub fn categorize(
        &self,
        txn: &mut Transaction,
        category: &str,
        overwrite: bool,
    ) -> Result<(), LedgerError> {
        if !self.is_valid_category(category) {
            return Err(LedgerError::InvalidCategory {
                category: category.to_string(),
                valid: self.valid_categories.join(", "),
            });
        }

        if let Some(existing) = &txn.category {
            if !overwrite {
                return Err(LedgerError::AlreadyCategorized(existing.clone()));
            }
        }

        txn.category = Some(category.to_string());
        Ok(())
    }

    /// Picks a category from keywords in the description. Returns whether a
    /// category was assigned; an existing category is replaced on a match.
    pub fn auto_categorize(
        &self,
        txn: &mut Transaction,
    ) -> bool {
        let description = txn.description.to_lowercase();

        let matched = KEYWORD_RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| description.contains(k)));

        match matched {
            Some(rule) => {
                debug!(description = %txn.description, category = rule.category, "auto-categorised");
                txn.category = Some(rule.category.to_string());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn txn(description: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 10, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Transaction::new(dec!(100), description, date).unwrap()
    }

    fn auto(description: &str) -> Option<String> {
        let mut t = txn(description);
        Categorizer::new().auto_categorize(&mut t);
        t.category
    }

    #[test]
    fn default_categories_are_valid() {
        let categorizer = Categorizer::new();

        assert_eq!(categorizer.categories().len(), 10);
        assert!(categorizer.is_valid_category("Street Food"));
        assert!(!categorizer.is_valid_category("street food"));
    }

    #[test]
    fn empty_custom_list_falls_back_to_defaults() {
        assert_eq!(Categorizer::with_categories(Vec::new()).categories().len(), 10);
    }

    #[test]
    fn categorize_assigns_valid_category() {
        let mut t = txn("Rice 5kg");

        Categorizer::new().categorize(&mut t, "Groceries", false).unwrap();

        assert_eq!(t.category.as_deref(), Some("Groceries"));
    }

    #[test]
    fn categorize_rejects_unknown_category() {
        let mut t = txn("Rice 5kg");

        let result = Categorizer::new().categorize(&mut t, "Crypto", false);

        assert!(matches!(result, Err(LedgerError::InvalidCategory { .. })));
        assert_eq!(t.category, None);
    }

    #[test]
    fn categorize_requires_overwrite_to_change() {
        let categorizer = Categorizer::new();
        let mut t = txn("Rice 5kg").with_category("Other");

        let refused = categorizer.categorize(&mut t, "Groceries", false);
        assert!(matches!(refused, Err(LedgerError::AlreadyCategorized(c)) if c == "Other"));

        categorizer.categorize(&mut t, "Groceries", true).unwrap();
        assert_eq!(t.category.as_deref(), Some("Groceries"));
    }

    #[test]
    fn auto_categorize_matches_keywords_case_insensitively() {
        assert_eq!(auto("Masala CHAI").as_deref(), Some("Street Food"));
        assert_eq!(auto("Metro card recharge").as_deref(), Some("Transport"));
        assert_eq!(auto("Diwali sweets").as_deref(), Some("Festivals"));
        assert_eq!(auto("Electricity bill").as_deref(), Some("Utilities"));
        assert_eq!(auto("Flipkart order").as_deref(), Some("Shopping"));
    }

    #[test]
    fn auto_categorize_uses_rule_priority() {
        // "tea" (Street Food) outranks "movie" (Entertainment)
        assert_eq!(auto("Tea at the movie").as_deref(), Some("Street Food"));
    }

    #[test]
    fn auto_categorize_reports_no_match() {
        let mut t = txn("Mystery expense");

        let assigned = Categorizer::new().auto_categorize(&mut t);

        assert!(!assigned);
        assert_eq!(t.category, None);
    }
}
