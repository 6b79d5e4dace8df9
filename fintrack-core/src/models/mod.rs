mod deductions;
mod tax_regime;
mod tax_result;
mod tax_slab;

pub use deductions::{AppliedDeductions, Deductions};
pub use tax_regime::TaxRegime;
pub use tax_result::{RegimeComparison, RegimeRecommendation, TaxResult};
pub use tax_slab::{NEW_REGIME_SLABS, OLD_REGIME_SLABS, TaxSlab};
