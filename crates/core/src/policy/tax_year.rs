use rust_decimal::Decimal;

use crate::models::attribute::{AttributeSet, AttributeValue, RequirementState, TaxYearInfoClass};
use crate::models::money::{Currency, Money};
use crate::models::tax_year::TaxYear;
use crate::models::validation::{OwnerRef, ValidationErrorKind, ValidationReport};

use super::traits::{AttributeOwner, AttributePolicy};

/// Income above which the personal allowance starts to taper.
const ADD_ALLOWANCE_LIMIT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
/// Income above which the additional rate applies.
const ADD_INCOME_THRESHOLD: Decimal = Decimal::from_parts(150_000, 0, 0, false, 0);

impl AttributeOwner for TaxYear {
    type Class = TaxYearInfoClass;

    fn owner_ref(&self) -> OwnerRef {
        OwnerRef::TaxYear(self.year)
    }

    fn attributes(&self) -> &AttributeSet<TaxYearInfoClass> {
        &self.info
    }

    fn attributes_mut(&mut self) -> &mut AttributeSet<TaxYearInfoClass> {
        &mut self.info
    }

    fn owner_currency(&self) -> Option<&Currency> {
        Some(&self.currency)
    }
}

/// Which allowances, bands and rates a tax year must define under its regime.
pub struct TaxYearPolicy;

impl TaxYearPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TaxYearPolicy {
    fn default() -> Self {
        Self::new()
    }
}

fn required_if(condition: bool) -> RequirementState {
    if condition {
        RequirementState::MustExist
    } else {
        RequirementState::NotAllowed
    }
}

fn decimal_of(year: &TaxYear, class: TaxYearInfoClass) -> Option<Decimal> {
    year.info.get(class).and_then(AttributeValue::as_decimal)
}

impl AttributePolicy for TaxYearPolicy {
    type Class = TaxYearInfoClass;
    type Owner = TaxYear;

    fn is_class_required(&self, year: &TaxYear, class: TaxYearInfoClass) -> RequirementState {
        use TaxYearInfoClass::*;
        let regime = year.regime;
        match class {
            LoTaxBand | LoTaxRate => required_if(regime.has_low_salary_band()),
            AddAllowanceLimit | AddIncomeThreshold | AddTaxRate | AddDivTaxRate => {
                required_if(regime.has_additional_tax_band())
            }
            LoAgeAllowance => RequirementState::CanExist,
            HiAgeAllowance | AgeAllowanceLimit => required_if(year.info.is_present(LoAgeAllowance)),
            CapTaxRate | HiCapTaxRate => required_if(!regime.has_capital_gains_as_income()),
            LoAllowance | CapitalAllowance | BasicTaxBand | BasicTaxRate | HiTaxRate
            | IntTaxRate | DivTaxRate | HiDivTaxRate => RequirementState::MustExist,
        }
    }

    fn check_class(
        &self,
        year: &TaxYear,
        class: TaxYearInfoClass,
        value: &AttributeValue,
        report: &mut ValidationReport,
    ) {
        let Some(amount) = value.as_decimal() else {
            return;
        };
        let out_of_order = match class {
            TaxYearInfoClass::LoAgeAllowance => decimal_of(year, TaxYearInfoClass::LoAllowance)
                .is_some_and(|allowance| amount > allowance),
            TaxYearInfoClass::HiAgeAllowance => decimal_of(year, TaxYearInfoClass::LoAgeAllowance)
                .is_some_and(|lo_age| amount < lo_age),
            _ => false,
        };
        if out_of_order {
            report.add(year.owner_ref(), class, ValidationErrorKind::OrderViolation);
        }
    }

    fn set_default_value(&self, year: &TaxYear, class: TaxYearInfoClass) -> Option<AttributeValue> {
        let copy_of = |sibling| year.info.get(sibling).cloned();
        match class {
            TaxYearInfoClass::AddAllowanceLimit => Some(AttributeValue::Money(Money::new(
                ADD_ALLOWANCE_LIMIT,
                year.currency.clone(),
            ))),
            TaxYearInfoClass::AddIncomeThreshold => Some(AttributeValue::Money(Money::new(
                ADD_INCOME_THRESHOLD,
                year.currency.clone(),
            ))),
            TaxYearInfoClass::AddTaxRate => copy_of(TaxYearInfoClass::HiTaxRate),
            TaxYearInfoClass::AddDivTaxRate => copy_of(TaxYearInfoClass::HiDivTaxRate),
            TaxYearInfoClass::HiCapTaxRate => copy_of(TaxYearInfoClass::CapTaxRate),
            _ => None,
        }
    }
}
