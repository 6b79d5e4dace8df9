//! GST split for Indian goods and services at the standard 18% rate.
//!
//! Intra-state supplies split the tax evenly into CGST and SGST (9% each);
//! inter-state supplies carry the full 18% as IGST.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{percent_of, round_half_up};

pub const GST_RATE: Decimal = dec!(18);
pub const CGST_RATE: Decimal = dec!(9);
pub const SGST_RATE: Decimal = dec!(9);

/// Whether supplier and recipient are in the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstSupply {
    #[default]
    IntraState,
    InterState,
}

impl GstSupply {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntraState => "intra_state",
            Self::InterState => "inter_state",
        }
    }
}

impl fmt::Display for GstSupply {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GST owed on a base amount. Components are rounded to paise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstBreakdown {
    pub supply: GstSupply,
    pub base_amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total_gst: Decimal,
    pub amount_with_gst: Decimal,
}

impl GstBreakdown {
    /// Splits GST on `amount` for the given supply type.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use fintrack_core::{GstBreakdown, GstSupply};
    ///
    /// let gst = GstBreakdown::compute(dec!(5000), GstSupply::IntraState);
    ///
    /// assert_eq!(gst.cgst, dec!(450));
    /// assert_eq!(gst.sgst, dec!(450));
    /// assert_eq!(gst.amount_with_gst, dec!(5900));
    /// ```
    pub fn compute(
        amount: Decimal,
        supply: GstSupply,
    ) -> Self {
        let (cgst, sgst, igst) = match supply {
            GstSupply::IntraState => (
                round_half_up(percent_of(amount, CGST_RATE)),
                round_half_up(percent_of(amount, SGST_RATE)),
                Decimal::ZERO,
            ),
            GstSupply::InterState => (
                Decimal::ZERO,
                Decimal::ZERO,
                round_half_up(percent_of(amount, GST_RATE)),
            ),
        };
        let total_gst = cgst + sgst + igst;

        Self {
            supply,
            base_amount: amount,
            cgst,
            sgst,
            igst,
            total_gst,
            amount_with_gst: amount + total_gst,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn intra_state_splits_into_cgst_and_sgst() {
        let gst = GstBreakdown::compute(dec!(5000), GstSupply::IntraState);

        assert_eq!(gst.cgst, dec!(450));
        assert_eq!(gst.sgst, dec!(450));
        assert_eq!(gst.igst, Decimal::ZERO);
        assert_eq!(gst.total_gst, dec!(900));
        assert_eq!(gst.amount_with_gst, dec!(5900));
    }

    #[test]
    fn inter_state_charges_igst_only() {
        let gst = GstBreakdown::compute(dec!(5000), GstSupply::InterState);

        assert_eq!(gst.cgst, Decimal::ZERO);
        assert_eq!(gst.sgst, Decimal::ZERO);
        assert_eq!(gst.igst, dec!(900));
        assert_eq!(gst.amount_with_gst, dec!(5900));
    }

    #[test]
    fn components_round_half_up_to_paise() {
        // 9% of 100.05 is 9.0045
        let gst = GstBreakdown::compute(dec!(100.05), GstSupply::IntraState);

        assert_eq!(gst.cgst, dec!(9.00));
        assert_eq!(gst.total_gst, dec!(18.00));
    }

    #[test]
    fn zero_amount_has_no_gst() {
        let gst = GstBreakdown::compute(Decimal::ZERO, GstSupply::InterState);

        assert_eq!(gst.total_gst, Decimal::ZERO);
    }
}
