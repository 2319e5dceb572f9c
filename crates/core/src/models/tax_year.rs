use serde::{Deserialize, Serialize};

use super::attribute::{AttributeSet, TaxYearInfoClass};
use super::money::Currency;
use crate::errors::CoreError;

/// The tax rules in force for a year. Decides which bands and rates apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxRegime {
    /// Older years with a starting-rate salary band
    Archive,
    Standard,
    /// Standard rules with a starting rate on interest
    LoInterest,
    /// Adds the additional-rate band and the allowance taper
    Additional,
}

impl TaxRegime {
    pub fn class_id(self) -> i32 {
        match self {
            TaxRegime::Archive => 1,
            TaxRegime::Standard => 2,
            TaxRegime::LoInterest => 3,
            TaxRegime::Additional => 4,
        }
    }

    pub fn from_class_id(id: i32) -> Result<Self, CoreError> {
        match id {
            1 => Ok(TaxRegime::Archive),
            2 => Ok(TaxRegime::Standard),
            3 => Ok(TaxRegime::LoInterest),
            4 => Ok(TaxRegime::Additional),
            _ => Err(CoreError::InvalidClassId { kind: "TaxRegime", id }),
        }
    }

    pub fn has_low_salary_band(self) -> bool {
        match self {
            TaxRegime::Archive => true,
            TaxRegime::Standard | TaxRegime::LoInterest | TaxRegime::Additional => false,
        }
    }

    pub fn has_additional_tax_band(self) -> bool {
        match self {
            TaxRegime::Additional => true,
            TaxRegime::Archive | TaxRegime::Standard | TaxRegime::LoInterest => false,
        }
    }

    /// Capital gains are added to income instead of having their own rates.
    pub fn has_capital_gains_as_income(self) -> bool {
        match self {
            TaxRegime::Standard => true,
            TaxRegime::Archive | TaxRegime::LoInterest | TaxRegime::Additional => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxYear {
    /// Calendar year in which the tax year ends
    pub year: i32,
    pub regime: TaxRegime,
    pub currency: Currency,
    #[serde(default)]
    pub info: AttributeSet<TaxYearInfoClass>,
}

impl TaxYear {
    pub fn new(year: i32, regime: TaxRegime, currency: Currency) -> Self {
        Self {
            year,
            regime,
            currency,
            info: AttributeSet::new(),
        }
    }
}
