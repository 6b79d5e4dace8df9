use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::TaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    #[default]
    #[serde(rename = "new_regime")]
    New,
    #[serde(rename = "old_regime")]
    Old,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new_regime",
            Self::Old => "old_regime",
        }
    }

    /// Heading used in printed breakdowns.
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "NEW REGIME",
            Self::Old => "OLD REGIME",
        }
    }
}

impl FromStr for TaxRegime {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" | "new_regime" => Ok(Self::New),
            "old" | "old_regime" => Ok(Self::Old),
            _ => Err(TaxError::UnknownRegime(s.to_string())),
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
