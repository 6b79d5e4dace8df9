use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One progressive-tax slab, in whole rupees.
///
/// Tax applies to the part of income strictly above `lower` and at most
/// `upper`. The top slab has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower: i64,
    pub upper: Option<i64>,
    pub rate_percent: u32,
}

impl TaxSlab {
    const fn bounded(
        lower: i64,
        upper: i64,
        rate_percent: u32,
    ) -> Self {
        Self {
            lower,
            upper: Some(upper),
            rate_percent,
        }
    }

    const fn open(
        lower: i64,
        rate_percent: u32,
    ) -> Self {
        Self {
            lower,
            upper: None,
            rate_percent,
        }
    }

    pub fn lower_bound(&self) -> Decimal {
        Decimal::from(self.lower)
    }

    pub fn upper_bound(&self) -> Option<Decimal> {
        self.upper.map(Decimal::from)
    }

    pub fn rate(&self) -> Decimal {
        Decimal::from(self.rate_percent)
    }
}

/// New regime slabs, FY 2024-25.
pub const NEW_REGIME_SLABS: [TaxSlab; 6] = [
    TaxSlab::bounded(0, 300_000, 0),
    TaxSlab::bounded(300_000, 700_000, 5),
    TaxSlab::bounded(700_000, 1_000_000, 10),
    TaxSlab::bounded(1_000_000, 1_200_000, 15),
    TaxSlab::bounded(1_200_000, 1_500_000, 20),
    TaxSlab::open(1_500_000, 30),
];

/// Old regime slabs, FY 2024-25.
pub const OLD_REGIME_SLABS: [TaxSlab; 4] = [
    TaxSlab::bounded(0, 250_000, 0),
    TaxSlab::bounded(250_000, 500_000, 5),
    TaxSlab::bounded(500_000, 1_000_000, 20),
    TaxSlab::open(1_000_000, 30),
];
