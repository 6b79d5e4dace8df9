//! Indian income tax for FY 2024-25 under the new and old regimes.
//!
//! # Computation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Standard deduction of ₹50,000 (plus 80C/80D under the old regime) |
//! | 2    | Taxable income (income - deductions, minimum 0) |
//! | 3    | Slab tax on taxable income |
//! | 4    | Section 87A rebate (new regime, income ≤ ₹7,00,000, capped at ₹25,000) |
//! | 5    | Surcharge on slab tax by gross income tier (10% / 15% / 25%) |
//! | 6    | Marginal relief, capped at the surcharge |
//! | 7    | Final tax (slab tax - rebate + surcharge - relief, minimum 0) |
//! | 8    | Effective rate (final tax / income × 100) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fintrack_core::{Deductions, TaxCalculator, TaxRegime};
//!
//! let calculator = TaxCalculator::default();
//! let result = calculator
//!     .calculate_tax(dec!(500000), TaxRegime::New, &Deductions::default())
//!     .unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(450000));
//! assert_eq!(result.tax_before_rebate, dec!(7500));
//! assert_eq!(result.final_tax, dec!(0));
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{max, non_negative, percent_of, round_half_up};
use crate::inr::format_inr;
use crate::models::{
    AppliedDeductions, Deductions, NEW_REGIME_SLABS, OLD_REGIME_SLABS, RegimeComparison,
    RegimeRecommendation, TaxRegime, TaxResult, TaxSlab,
};

/// Standard deduction available under both regimes.
pub const STANDARD_DEDUCTION: Decimal = dec!(50000);

/// Gross income at or below which the Section 87A rebate applies.
pub const REBATE_87A_LIMIT: Decimal = dec!(700000);

/// Maximum Section 87A rebate for FY 2024-25.
pub const REBATE_87A_CAP: Decimal = dec!(25000);

pub const SECTION_80C_LIMIT: Decimal = dec!(150000);

pub const SECTION_80D_LIMIT: Decimal = dec!(25000);

/// Errors that can occur during income tax calculations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    /// Income was below zero.
    #[error("income must be zero or positive, got {0}")]
    NegativeIncome(Decimal),

    /// Regime identifier was not recognised.
    #[error("unknown tax regime '{0}': expected 'new_regime' or 'old_regime'")]
    UnknownRegime(String),

    /// Marginal relief method identifier was not recognised.
    #[error("unknown marginal relief method '{0}': expected 'proportional' or 'exact'")]
    UnknownReliefMethod(String),

    /// A claimed deduction was below zero.
    #[error("section {section} deduction must be zero or positive, got {amount}")]
    NegativeDeduction {
        section: &'static str,
        amount: Decimal,
    },
}

/// How the tax owed at the surcharge threshold is estimated for marginal relief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginalReliefMethod {
    /// Scales slab tax by `threshold / income`. Cheap, but understates the
    /// liability at the threshold, so relief past ₹1Cr and ₹2Cr is larger
    /// than the statute allows.
    #[default]
    Proportional,

    /// Recomputes slab tax at the threshold income and adds the lower tier's
    /// surcharge.
    Exact,
}

impl MarginalReliefMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proportional => "proportional",
            Self::Exact => "exact",
        }
    }
}

impl FromStr for MarginalReliefMethod {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proportional" => Ok(Self::Proportional),
            "exact" => Ok(Self::Exact),
            _ => Err(TaxError::UnknownReliefMethod(s.to_string())),
        }
    }
}

impl fmt::Display for MarginalReliefMethod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A surcharge band: applies when gross income is strictly above `threshold`.
struct SurchargeTier {
    threshold: Decimal,
    rate: Decimal,
    rate_below: Decimal,
}

/// Ordered by threshold. Each tier includes its upper bound.
static SURCHARGE_TIERS: [SurchargeTier; 3] = [
    SurchargeTier {
        threshold: dec!(5000000),
        rate: dec!(10),
        rate_below: dec!(0),
    },
    SurchargeTier {
        threshold: dec!(10000000),
        rate: dec!(15),
        rate_below: dec!(10),
    },
    SurchargeTier {
        threshold: dec!(20000000),
        rate: dec!(25),
        rate_below: dec!(15),
    },
];

/// Applies progressive slabs to a taxable income.
///
/// Slabs must be sorted by lower bound. Each slab taxes the part of the income
/// above its lower bound and up to its upper bound; slabs starting at or above
/// the income contribute nothing.
///
/// ```
/// use rust_decimal_macros::dec;
/// use fintrack_core::NEW_REGIME_SLABS;
/// use fintrack_core::calculations::apply_brackets;
///
/// assert_eq!(apply_brackets(dec!(450000), &NEW_REGIME_SLABS), dec!(7500));
/// assert_eq!(apply_brackets(dec!(300000), &NEW_REGIME_SLABS), dec!(0));
/// ```
pub fn apply_brackets(
    taxable_income: Decimal,
    slabs: &[TaxSlab],
) -> Decimal {
    let mut tax = Decimal::ZERO;

    for slab in slabs {
        let lower = slab.lower_bound();
        if taxable_income <= lower {
            break;
        }

        let upper = slab
            .upper_bound()
            .map_or(taxable_income, |upper| taxable_income.min(upper));
        tax += percent_of(upper - lower, slab.rate());
    }

    tax
}

/// Calculator for Indian income tax.
///
/// Holds only the marginal relief method; slab tables and limits are
/// fixed constants for the modelled year.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCalculator {
    relief_method: MarginalReliefMethod,
}

impl TaxCalculator {
    /// Creates a calculator using proportional marginal relief.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marginal_relief(relief_method: MarginalReliefMethod) -> Self {
        Self { relief_method }
    }

    pub fn relief_method(&self) -> MarginalReliefMethod {
        self.relief_method
    }

    /// Calculates tax for the given regime.
    ///
    /// Deductions are only honoured by the old regime.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if:
    /// - Income is negative
    /// - A deduction is negative
    pub fn calculate_tax(
        &self,
        income: Decimal,
        regime: TaxRegime,
        deductions: &Deductions,
    ) -> Result<TaxResult, TaxError> {
        self.validate_deductions(deductions)?;

        match regime {
            TaxRegime::New => {
                if *deductions != Deductions::default() {
                    debug!("80C/80D deductions are ignored under the new regime");
                }
                self.calculate_new_regime(income)
            }
            TaxRegime::Old => self.calculate_old_regime(income, deductions),
        }
    }

    /// Calculates tax under the new regime.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::NegativeIncome`] if income is below zero.
    pub fn calculate_new_regime(
        &self,
        income: Decimal,
    ) -> Result<TaxResult, TaxError> {
        self.validate_income(income)?;

        // Steps 1-3: taxable income and slab tax
        let taxable_income = self.taxable_income(income, STANDARD_DEDUCTION);
        let tax_before_rebate = apply_brackets(taxable_income, &NEW_REGIME_SLABS);

        // Step 4: Section 87A rebate
        let rebate_87a = self.rebate_87a(income, tax_before_rebate);

        // Steps 5-6: surcharge and marginal relief
        let (surcharge, marginal_relief) =
            self.surcharge_with_relief(income, tax_before_rebate, STANDARD_DEDUCTION, &NEW_REGIME_SLABS);

        // Step 7: final tax
        let final_tax = non_negative(tax_before_rebate - rebate_87a + surcharge);

        debug!(
            %income,
            %taxable_income,
            %tax_before_rebate,
            %rebate_87a,
            %surcharge,
            %marginal_relief,
            %final_tax,
            "new regime tax calculated"
        );

        Ok(TaxResult {
            regime: TaxRegime::New,
            taxable_income,
            tax_before_rebate,
            rebate_87a,
            surcharge,
            marginal_relief,
            final_tax,
            effective_rate: self.effective_rate(final_tax, income),
            applied_deductions: None,
        })
    }

    /// Calculates tax under the old regime with 80C and 80D deductions.
    ///
    /// No Section 87A rebate applies.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if income or a deduction is negative.
    pub fn calculate_old_regime(
        &self,
        income: Decimal,
        deductions: &Deductions,
    ) -> Result<TaxResult, TaxError> {
        self.validate_income(income)?;
        self.validate_deductions(deductions)?;

        // Step 1: clamp deductions to their statutory limits
        let applied = self.applied_deductions(deductions);
        let total_deductions = STANDARD_DEDUCTION + applied.total();

        // Steps 2-3: taxable income and slab tax
        let taxable_income = self.taxable_income(income, total_deductions);
        let tax_before_rebate = apply_brackets(taxable_income, &OLD_REGIME_SLABS);

        // Steps 5-6: surcharge and marginal relief
        let (surcharge, marginal_relief) =
            self.surcharge_with_relief(income, tax_before_rebate, total_deductions, &OLD_REGIME_SLABS);

        // Step 7: final tax
        let final_tax = non_negative(tax_before_rebate + surcharge);

        debug!(
            %income,
            section_80c = %applied.section_80c,
            section_80d = %applied.section_80d,
            %taxable_income,
            %tax_before_rebate,
            %surcharge,
            %marginal_relief,
            %final_tax,
            "old regime tax calculated"
        );

        Ok(TaxResult {
            regime: TaxRegime::Old,
            taxable_income,
            tax_before_rebate,
            rebate_87a: Decimal::ZERO,
            surcharge,
            marginal_relief,
            final_tax,
            effective_rate: self.effective_rate(final_tax, income),
            applied_deductions: Some(applied),
        })
    }

    /// Runs both regimes and recommends the cheaper one.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if income or a deduction is negative.
    pub fn compare_regimes(
        &self,
        income: Decimal,
        deductions: &Deductions,
    ) -> Result<RegimeComparison, TaxError> {
        let new_regime = self.calculate_tax(income, TaxRegime::New, deductions)?;
        let old_regime = self.calculate_tax(income, TaxRegime::Old, deductions)?;

        let recommendation = if new_regime.final_tax < old_regime.final_tax {
            RegimeRecommendation::New
        } else if old_regime.final_tax < new_regime.final_tax {
            RegimeRecommendation::Old
        } else {
            RegimeRecommendation::Equal
        };
        let savings = (new_regime.final_tax - old_regime.final_tax).abs();

        debug!(
            %income,
            recommendation = recommendation.as_str(),
            %savings,
            "regimes compared"
        );

        Ok(RegimeComparison {
            new_regime,
            old_regime,
            recommendation,
            savings,
        })
    }

    /// Renders a printable breakdown of the tax computation.
    ///
    /// Rebate, surcharge and marginal relief lines only appear when non-zero.
    /// 80C/80D lines show the amounts applied after clamping.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if income or a deduction is negative.
    pub fn render_breakdown(
        &self,
        income: Decimal,
        regime: TaxRegime,
        deductions: &Deductions,
    ) -> Result<String, TaxError> {
        let result = self.calculate_tax(income, regime, deductions)?;
        let rule = "=".repeat(50);

        let mut lines = vec![
            rule.clone(),
            "INCOME TAX CALCULATION".to_string(),
            rule.clone(),
            String::new(),
            format!("Regime: {}", regime.label()),
            format!("Annual Income: {}", format_inr(income)),
            String::new(),
            "Deductions:".to_string(),
            format!("  Standard Deduction: {}", format_inr(STANDARD_DEDUCTION)),
        ];

        if let Some(applied) = result.applied_deductions {
            if applied.section_80c > Decimal::ZERO {
                lines.push(format!("  80C Deduction: {}", format_inr(applied.section_80c)));
            }
            if applied.section_80d > Decimal::ZERO {
                lines.push(format!("  80D Deduction: {}", format_inr(applied.section_80d)));
            }
        }

        lines.push(String::new());
        lines.push(format!("Taxable Income: {}", format_inr(result.taxable_income)));
        lines.push(format!(
            "Tax (before rebate): {}",
            format_inr(result.tax_before_rebate)
        ));

        if result.rebate_87a > Decimal::ZERO {
            lines.push(format!("Rebate u/s 87A: {}", format_inr(result.rebate_87a)));
        }
        if result.surcharge > Decimal::ZERO {
            lines.push(format!("Surcharge: {}", format_inr(result.surcharge)));
        }
        if result.marginal_relief > Decimal::ZERO {
            lines.push(format!(
                "Marginal Relief: {}",
                format_inr(result.marginal_relief)
            ));
        }

        lines.push("-".repeat(30));
        lines.push(format!("Final Tax Payable: {}", format_inr(result.final_tax)));
        lines.push(format!(
            "Effective Tax Rate: {:.2}%",
            round_half_up(result.effective_rate)
        ));
        lines.push(rule);

        Ok(lines.join("\n"))
    }

    fn validate_income(
        &self,
        income: Decimal,
    ) -> Result<(), TaxError> {
        if income < Decimal::ZERO {
            warn!(%income, "rejecting negative income");
            return Err(TaxError::NegativeIncome(income));
        }
        Ok(())
    }

    fn validate_deductions(
        &self,
        deductions: &Deductions,
    ) -> Result<(), TaxError> {
        let claimed = [
            ("80C", deductions.section_80c),
            ("80D", deductions.section_80d),
        ];

        for (section, amount) in claimed {
            if amount < Decimal::ZERO {
                warn!(section, %amount, "rejecting negative deduction");
                return Err(TaxError::NegativeDeduction { section, amount });
            }
        }
        Ok(())
    }

    /// Clamps 80C and 80D claims to their limits.
    fn applied_deductions(
        &self,
        deductions: &Deductions,
    ) -> AppliedDeductions {
        AppliedDeductions {
            section_80c: self.clamp_deduction("80C", deductions.section_80c, SECTION_80C_LIMIT),
            section_80d: self.clamp_deduction("80D", deductions.section_80d, SECTION_80D_LIMIT),
        }
    }

    fn clamp_deduction(
        &self,
        section: &'static str,
        claimed: Decimal,
        limit: Decimal,
    ) -> Decimal {
        if claimed > limit {
            warn!(
                section,
                claimed = %claimed,
                limit = %limit,
                "deduction exceeds statutory limit; clamping"
            );
            limit
        } else {
            claimed
        }
    }

    /// Income minus deductions, minimum 0.
    fn taxable_income(
        &self,
        income: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        max(income - total_deductions, Decimal::ZERO)
    }

    /// Section 87A rebate: the full slab tax up to the cap, only at or below the limit.
    fn rebate_87a(
        &self,
        income: Decimal,
        tax_before_rebate: Decimal,
    ) -> Decimal {
        if income <= REBATE_87A_LIMIT {
            tax_before_rebate.min(REBATE_87A_CAP)
        } else {
            Decimal::ZERO
        }
    }

    /// Returns the surcharge left after marginal relief, and the relief itself.
    fn surcharge_with_relief(
        &self,
        income: Decimal,
        tax_before_rebate: Decimal,
        total_deductions: Decimal,
        slabs: &[TaxSlab],
    ) -> (Decimal, Decimal) {
        let Some(tier) = surcharge_tier(income) else {
            return (Decimal::ZERO, Decimal::ZERO);
        };

        let surcharge = percent_of(tax_before_rebate, tier.rate);
        let relief = self.marginal_relief(
            income,
            tax_before_rebate,
            surcharge,
            tier,
            total_deductions,
            slabs,
        );

        (surcharge - relief, relief)
    }

    /// Relief keeps tax plus surcharge from growing faster than income above
    /// the threshold. Never exceeds the surcharge.
    fn marginal_relief(
        &self,
        income: Decimal,
        tax_before_rebate: Decimal,
        surcharge: Decimal,
        tier: &SurchargeTier,
        total_deductions: Decimal,
        slabs: &[TaxSlab],
    ) -> Decimal {
        let liability_at_threshold = match self.relief_method {
            MarginalReliefMethod::Proportional => {
                tax_before_rebate * (tier.threshold / income)
            }
            MarginalReliefMethod::Exact => {
                let taxable_at_threshold =
                    self.taxable_income(tier.threshold, total_deductions);
                let tax_at_threshold = apply_brackets(taxable_at_threshold, slabs);
                tax_at_threshold + percent_of(tax_at_threshold, tier.rate_below)
            }
        };

        let excess_income = income - tier.threshold;
        let relief = non_negative(tax_before_rebate + surcharge - excess_income - liability_at_threshold)
            .min(surcharge);

        if relief > Decimal::ZERO {
            debug!(
                %income,
                threshold = %tier.threshold,
                %relief,
                method = self.relief_method.as_str(),
                "marginal relief applied"
            );
        }

        relief
    }

    /// Final tax as a percentage of gross income; zero for zero income.
    fn effective_rate(
        &self,
        final_tax: Decimal,
        income: Decimal,
    ) -> Decimal {
        if income > Decimal::ZERO {
            final_tax / income * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}

/// Highest tier whose threshold the income exceeds.
fn surcharge_tier(income: Decimal) -> Option<&'static SurchargeTier> {
    SURCHARGE_TIERS
        .iter()
        .rev()
        .find(|tier| income > tier.threshold)
}
