//! Indian rupee formatting and income tax computation.
//!
//! Amounts are [`rust_decimal::Decimal`] throughout; nothing here performs I/O.

pub mod calculations;
pub mod inr;
pub mod models;

pub use calculations::{
    GstBreakdown, GstSupply, MarginalReliefMethod, TaxCalculator, TaxError, apply_brackets,
};
pub use inr::{
    InrFormatError, fiscal_year, format_compact, format_inr, paise_to_rupees, parse_inr,
    to_crores, to_lakhs, validate_inr_format,
};
pub use models::*;
