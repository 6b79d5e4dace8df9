//! Calculations for Indian personal finance.
//!
//! This module provides the income tax slab engine, the GST split used by
//! reports, and shared decimal helpers.

pub mod common;
pub mod gst;
pub mod income_tax;

pub use gst::{GstBreakdown, GstSupply};
pub use income_tax::{
    MarginalReliefMethod, REBATE_87A_CAP, REBATE_87A_LIMIT, SECTION_80C_LIMIT,
    SECTION_80D_LIMIT, STANDARD_DEDUCTION, TaxCalculator, TaxError, apply_brackets,
};
