//! Indian Rupee display formatting and parsing.
//!
//! Indian digit grouping puts the first separator three digits from the
//! right and every further separator two digits apart:
//!
//! | Amount      | Display            |
//! |-------------|--------------------|
//! | 999         | `₹999.00`          |
//! | 1,000       | `₹1,000.00`        |
//! | 1 lakh      | `₹1,00,000.00`     |
//! | 1 crore     | `₹1,00,00,000.00`  |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fintrack_core::inr::{format_inr, parse_inr};
//!
//! let shown = format_inr(dec!(1234567.5));
//! assert_eq!(shown, "₹12,34,567.50");
//! assert_eq!(parse_inr(&shown).unwrap(), dec!(1234567.5));
//! ```

use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::error;

use crate::calculations::common::{round_half_up, round_half_up_dp};

/// The rupee sign used as the display prefix.
pub const RUPEE_SYMBOL: char = '₹';

const LAKH: i64 = 100_000;
const CRORE: i64 = 10_000_000;

/// Strict shape of a formatted amount: symbol, optional sign, Indian groups
/// (or a bare 1-3 digit number) and up to two decimals.
static INR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^₹-?(?:\d{1,2},(?:\d{2},)*\d{3}|\d{1,3})(?:\.\d{1,2})?$")
        .expect("INR pattern is a valid regex")
});

/// Errors returned by [`parse_inr`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InrFormatError {
    /// Nothing left to parse once the symbol, commas and whitespace are removed.
    #[error("empty amount; expected a rupee amount such as ₹1,00,000.00")]
    Empty,

    /// The remainder is not a decimal number.
    #[error("invalid rupee amount '{input}'; expected digits with optional ₹, commas and decimals such as ₹1,00,000.00")]
    NotNumeric { input: String },
}

/// Formats an amount as `₹<Indian-grouped integer>.<paise>`.
///
/// The paise are rounded half-up. Negative amounts get a leading `-` before
/// the symbol; an amount that rounds to zero is shown unsigned.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount.abs());
    let plain = format!("{rounded:.2}");
    let (integer, paise) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{RUPEE_SYMBOL}{}.{paise}", group_indian(integer))
}

/// Inserts Indian separators into a run of ASCII digits.
fn group_indian(digits: &str) -> String {
    if digits.len() < 4 {
        return digits.to_string();
    }

    let (mut rest, last_three) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::with_capacity(digits.len() / 2);
    while rest.len() >= 2 {
        let (left, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    groups.push(last_three);

    groups.join(",")
}

/// Parses a rupee amount leniently.
///
/// The rupee sign (anywhere), whitespace and every comma are removed before
/// parsing, so both Indian (`1,00,000`) and Western (`100,000`) grouping are
/// accepted. Exponent forms such as `1e5` are read too. Inverts
/// [`format_inr`] exactly.
///
/// # Errors
///
/// * [`InrFormatError::Empty`] when nothing numeric remains.
/// * [`InrFormatError::NotNumeric`] when the remainder is not a number.
pub fn parse_inr(input: &str) -> Result<Decimal, InrFormatError> {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != RUPEE_SYMBOL && *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(InrFormatError::Empty);
    }

    cleaned
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|e| {
            error!(input = %input, "invalid rupee amount: {}", e);
            InrFormatError::NotNumeric {
                input: input.to_string(),
            }
        })
}

/// Strict structural check for a formatted amount. Never fails.
///
/// Unlike [`parse_inr`], the symbol must lead, the optional `-` must follow
/// it directly, and separators must sit exactly where Indian grouping puts
/// them. Numbers below 1,000 may omit separators.
pub fn validate_inr_format(input: &str) -> bool {
    !input.is_empty() && INR_PATTERN.is_match(input)
}

/// Indian fiscal year (April to March) containing `date`, e.g. `FY2024-25`.
pub fn fiscal_year<D: Datelike>(date: &D) -> String {
    let start = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };

    format!("FY{start}-{:02}", (start + 1).rem_euclid(100))
}

/// Short human form: `₹500`, `₹25.0K`, `₹2.5 lakhs`, `₹5.0 crores`.
///
/// Scaled values are rounded half-up to one decimal place.
pub fn format_compact(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = amount.abs();
    let whole = round_half_up_dp(abs, 0);

    if whole < Decimal::ONE_THOUSAND {
        return format!("{sign}{RUPEE_SYMBOL}{whole}");
    }

    // The unit is picked after rounding so 99,999.96 reads as 1.0 lakhs.
    let thousands = round_half_up_dp(abs / Decimal::ONE_THOUSAND, 1);
    if thousands < Decimal::ONE_HUNDRED {
        return format!("{sign}{RUPEE_SYMBOL}{thousands:.1}K");
    }

    let lakhs = round_half_up_dp(to_lakhs(abs), 1);
    if lakhs < Decimal::ONE_HUNDRED {
        format!("{sign}{RUPEE_SYMBOL}{lakhs:.1} lakhs")
    } else {
        format!("{sign}{RUPEE_SYMBOL}{:.1} crores", round_half_up_dp(to_crores(abs), 1))
    }
}

/// Amount expressed in lakhs.
pub fn to_lakhs(amount: Decimal) -> Decimal {
    amount / Decimal::from(LAKH)
}

/// Amount expressed in crores.
pub fn to_crores(amount: Decimal) -> Decimal {
    amount / Decimal::from(CRORE)
}

/// Converts paise to rupees.
pub fn paise_to_rupees(paise: i64) -> Decimal {
    Decimal::new(paise, 2)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // format_inr tests
    // =========================================================================

    #[test]
    fn format_inr_leaves_small_amounts_ungrouped() {
        assert_eq!(format_inr(dec!(20)), "₹20.00");
        assert_eq!(format_inr(dec!(999)), "₹999.00");
    }

    #[test]
    fn format_inr_groups_thousands() {
        assert_eq!(format_inr(dec!(1000)), "₹1,000.00");
        assert_eq!(format_inr(dec!(99999)), "₹99,999.00");
    }

    #[test]
    fn format_inr_groups_lakhs() {
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000.00");
        assert_eq!(format_inr(dec!(999999)), "₹9,99,999.00");
        assert_eq!(format_inr(dec!(5000000)), "₹50,00,000.00");
    }

    #[test]
    fn format_inr_groups_crores_and_beyond() {
        assert_eq!(format_inr(dec!(10000000)), "₹1,00,00,000.00");
        assert_eq!(format_inr(dec!(100000000)), "₹10,00,00,000.00");
        assert_eq!(format_inr(dec!(1000000000)), "₹1,00,00,00,000.00");
    }

    #[test]
    fn format_inr_keeps_paise() {
        assert_eq!(format_inr(dec!(1234.56)), "₹1,234.56");
        assert_eq!(format_inr(dec!(12345678.90)), "₹1,23,45,678.90");
        assert_eq!(format_inr(dec!(0.5)), "₹0.50");
    }

    #[test]
    fn format_inr_rounds_paise_half_up() {
        assert_eq!(format_inr(dec!(10.005)), "₹10.01");
        assert_eq!(format_inr(dec!(999.999)), "₹1,000.00");
    }

    #[test]
    fn format_inr_handles_zero() {
        assert_eq!(format_inr(Decimal::ZERO), "₹0.00");
        assert_eq!(format_inr(dec!(0.00)), "₹0.00");
    }

    #[test]
    fn format_inr_prefixes_negative_sign() {
        assert_eq!(format_inr(dec!(-100)), "-₹100.00");
        assert_eq!(format_inr(dec!(-100000)), "-₹1,00,000.00");
    }

    #[test]
    fn format_inr_drops_sign_when_rounding_to_zero() {
        assert_eq!(format_inr(dec!(-0.001)), "₹0.00");
    }

    // =========================================================================
    // parse_inr tests
    // =========================================================================

    #[test]
    fn parse_inr_reads_indian_grouping() {
        assert_eq!(parse_inr("₹1,00,000.00"), Ok(dec!(100000)));
        assert_eq!(parse_inr("₹2,50,00,000"), Ok(dec!(25000000)));
    }

    #[test]
    fn parse_inr_reads_western_grouping() {
        assert_eq!(parse_inr("₹100,000.50"), Ok(dec!(100000.50)));
    }

    #[test]
    fn parse_inr_ignores_whitespace() {
        assert_eq!(parse_inr("  ₹1,00,000.00  "), Ok(dec!(100000)));
        assert_eq!(parse_inr("₹ 50,000"), Ok(dec!(50000)));
    }

    #[test]
    fn parse_inr_accepts_negative_amounts() {
        assert_eq!(parse_inr("-₹1,000.00"), Ok(dec!(-1000)));
        assert_eq!(parse_inr("₹-100"), Ok(dec!(-100)));
    }

    #[test]
    fn parse_inr_reads_exponent_notation() {
        assert_eq!(parse_inr("1e5").unwrap(), dec!(100000));
        assert_eq!(parse_inr("₹1.5E3").unwrap(), dec!(1500));
        assert_eq!(parse_inr("-2.5e2").unwrap(), dec!(-250));
    }

    #[test]
    fn parse_inr_rejects_empty_input() {
        assert_eq!(parse_inr(""), Err(InrFormatError::Empty));
        assert_eq!(parse_inr(" ₹ "), Err(InrFormatError::Empty));
    }

    #[test]
    fn parse_inr_rejects_non_numeric_input() {
        assert_eq!(
            parse_inr("₹abc"),
            Err(InrFormatError::NotNumeric {
                input: "₹abc".to_string()
            })
        );
        assert!(parse_inr("invalid").is_err());
        assert!(parse_inr("1e").is_err());
    }

    #[test]
    fn parse_inr_error_names_input_and_expected_shape() {
        let message = parse_inr("twelve").unwrap_err().to_string();

        assert!(message.contains("twelve"));
        assert!(message.contains("₹1,00,000.00"));
    }

    #[test]
    fn parse_inr_inverts_format_inr() {
        let amounts = [
            dec!(0),
            dec!(0.01),
            dec!(999.99),
            dec!(1000),
            dec!(125000),
            dec!(9999999.99),
            dec!(10000000),
            dec!(123456789012.34),
        ];

        for amount in amounts {
            assert_eq!(parse_inr(&format_inr(amount)), Ok(amount), "amount {amount}");
        }
    }

    // =========================================================================
    // validate_inr_format tests
    // =========================================================================

    #[test]
    fn validate_accepts_indian_grouping() {
        assert!(validate_inr_format("₹100.00"));
        assert!(validate_inr_format("₹1,000.00"));
        assert!(validate_inr_format("₹1,00,000.00"));
        assert!(validate_inr_format("₹50,000"));
        assert!(validate_inr_format("₹1,00,00,000.5"));
    }

    #[test]
    fn validate_accepts_small_and_signed_amounts() {
        assert!(validate_inr_format("₹0"));
        assert!(validate_inr_format("₹999"));
        assert!(validate_inr_format("₹-100.00"));
    }

    #[test]
    fn validate_rejects_missing_or_wrong_symbol() {
        assert!(!validate_inr_format("100.00"));
        assert!(!validate_inr_format("$100"));
        assert!(!validate_inr_format(""));
    }

    #[test]
    fn validate_rejects_malformed_grouping() {
        assert!(!validate_inr_format("₹abc"));
        assert!(!validate_inr_format("₹100,000.00"));
        assert!(!validate_inr_format("₹1000"));
        assert!(!validate_inr_format("₹1,00,000.000"));
        assert!(!validate_inr_format("₹123,456"));
    }

    // =========================================================================
    // fiscal_year tests
    // =========================================================================

    #[test]
    fn fiscal_year_starts_in_april() {
        let october = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap();
        let april_first = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

        assert_eq!(fiscal_year(&october), "FY2024-25");
        assert_eq!(fiscal_year(&april_first), "FY2024-25");
    }

    #[test]
    fn fiscal_year_spans_new_year() {
        let february = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let march_end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();

        assert_eq!(fiscal_year(&february), "FY2024-25");
        assert_eq!(fiscal_year(&march_end), "FY2024-25");
    }

    #[test]
    fn fiscal_year_wraps_century_suffix() {
        let date = NaiveDate::from_ymd_opt(2099, 6, 1).unwrap();

        assert_eq!(fiscal_year(&date), "FY2099-00");
    }

    // =========================================================================
    // format_compact tests
    // =========================================================================

    #[test]
    fn format_compact_below_thousand_is_whole_rupees() {
        assert_eq!(format_compact(dec!(500)), "₹500");
        assert_eq!(format_compact(dec!(999)), "₹999");
        assert_eq!(format_compact(dec!(20.40)), "₹20");
    }

    #[test]
    fn format_compact_thousands() {
        assert_eq!(format_compact(dec!(25000)), "₹25.0K");
        assert_eq!(format_compact(dec!(1250)), "₹1.3K");
    }

    #[test]
    fn format_compact_lakhs() {
        assert_eq!(format_compact(dec!(250000)), "₹2.5 lakhs");
        assert_eq!(format_compact(dec!(1000000)), "₹10.0 lakhs");
    }

    #[test]
    fn format_compact_crores() {
        assert_eq!(format_compact(dec!(50000000)), "₹5.0 crores");
        assert_eq!(format_compact(dec!(100000000)), "₹10.0 crores");
    }

    #[test]
    fn format_compact_rounding_up_moves_to_next_unit() {
        assert_eq!(format_compact(dec!(999.6)), "₹1.0K");
        assert_eq!(format_compact(dec!(99999.96)), "₹1.0 lakhs");
        assert_eq!(format_compact(dec!(9999999.99)), "₹1.0 crores");
        assert_eq!(format_compact(dec!(-99999.96)), "-₹1.0 lakhs");
    }

    #[test]
    fn format_compact_just_below_unit_stays() {
        assert_eq!(format_compact(dec!(99940)), "₹99.9K");
        assert_eq!(format_compact(dec!(9994000)), "₹99.9 lakhs");
    }

    // =========================================================================
    // unit conversion tests
    // =========================================================================

    #[test]
    fn converts_to_lakhs_and_crores() {
        assert_eq!(to_lakhs(dec!(250000)), dec!(2.5));
        assert_eq!(to_lakhs(dec!(50000)), dec!(0.5));
        assert_eq!(to_crores(dec!(5000000)), dec!(0.5));
        assert_eq!(to_crores(dec!(100000000)), dec!(10));
    }

    #[test]
    fn one_crore_is_a_hundred_lakhs() {
        let amount = dec!(1000000);

        assert_eq!(to_lakhs(amount), to_crores(amount) * dec!(100));
    }

    #[test]
    fn converts_paise_to_rupees() {
        assert_eq!(paise_to_rupees(100), dec!(1));
        assert_eq!(paise_to_rupees(250), dec!(2.5));
        assert_eq!(paise_to_rupees(50), dec!(0.5));
    }
}
