use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deductions claimed by the taxpayer. Only the old regime honours them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deductions {
    /// Section 80C investments (PPF, ELSS, life insurance, ...).
    pub section_80c: Decimal,

    /// Section 80D health insurance premiums.
    pub section_80d: Decimal,
}

impl Deductions {
    pub fn new(
        section_80c: Decimal,
        section_80d: Decimal,
    ) -> Self {
        Self {
            section_80c,
            section_80d,
        }
    }
}

/// Deductions actually applied after the statutory caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDeductions {
    pub section_80c: Decimal,
    pub section_80d: Decimal,
}

impl AppliedDeductions {
    pub fn total(&self) -> Decimal {
        self.section_80c + self.section_80d
    }
}
