use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AppliedDeductions, TaxRegime};

/// Outcome of one regime's tax computation.
///
/// Amounts are unrounded; round only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: TaxRegime,

    /// Gross income minus every applied deduction, floored at zero.
    pub taxable_income: Decimal,

    /// Slab tax on `taxable_income`.
    pub tax_before_rebate: Decimal,

    /// Section 87A rebate; always zero under the old regime.
    pub rebate_87a: Decimal,

    /// Surcharge left after marginal relief.
    pub surcharge: Decimal,

    pub marginal_relief: Decimal,

    pub final_tax: Decimal,

    /// `final_tax / income * 100`, zero for zero income.
    pub effective_rate: Decimal,

    /// Present only for the old regime.
    pub applied_deductions: Option<AppliedDeductions>,
}

/// Which regime costs less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeRecommendation {
    #[serde(rename = "new_regime")]
    New,
    #[serde(rename = "old_regime")]
    Old,
    Equal,
}

impl RegimeRecommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new_regime",
            Self::Old => "old_regime",
            Self::Equal => "equal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub new_regime: TaxResult,
    pub old_regime: TaxResult,
    pub recommendation: RegimeRecommendation,

    /// Absolute difference between the two final tax amounts.
    pub savings: Decimal,
}
