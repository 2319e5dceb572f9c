use rust_decimal::Decimal;
use strum::IntoEnumIterator;

use crate::errors::CoreError;
use crate::models::attribute::{AttributeClass, AttributeSet, AttributeValue, RequirementState};
use crate::models::money::Currency;
use crate::models::validation::{OwnerRef, ValidationErrorKind, ValidationReport};

/// A record that carries optional extension attributes.
pub trait AttributeOwner {
    type Class: AttributeClass;

    fn owner_ref(&self) -> OwnerRef;

    fn attributes(&self) -> &AttributeSet<Self::Class>;

    fn attributes_mut(&mut self) -> &mut AttributeSet<Self::Class>;

    /// Currency money-valued attributes are expected in by default.
    fn owner_currency(&self) -> Option<&Currency>;
}

/// Requiredness rules for the attributes of one owner kind.
///
/// Implementors supply `is_class_required` and, where the owner kind needs
/// them, class-specific checks and defaults. `validate` and `auto_correct`
/// are shared.
pub trait AttributePolicy {
    type Class: AttributeClass;
    type Owner: AttributeOwner<Class = Self::Class>;

    /// May, must, or must not `class` be present on `owner`?
    fn is_class_required(&self, owner: &Self::Owner, class: Self::Class) -> RequirementState;

    /// Checks beyond presence, length, sign and currency.
    fn check_class(
        &self,
        _owner: &Self::Owner,
        _class: Self::Class,
        _value: &AttributeValue,
        _report: &mut ValidationReport,
    ) {
    }

    /// Value to fill in when a mandatory class is missing, if one exists.
    fn set_default_value(&self, _owner: &Self::Owner, _class: Self::Class) -> Option<AttributeValue> {
        None
    }

    /// Currency a money value of `class` must be in.
    fn expected_currency(&self, owner: &Self::Owner, _class: Self::Class) -> Option<Currency> {
        owner.owner_currency().cloned()
    }

    /// Check every class of `owner` and collect the failures.
    fn validate(&self, owner: &Self::Owner) -> ValidationReport {
        let mut report = ValidationReport::new();
        let owner_ref = owner.owner_ref();

        for class in Self::Class::iter() {
            let state = self.is_class_required(owner, class);
            match (owner.attributes().get(class), state) {
                (None, RequirementState::MustExist) => {
                    report.add(owner_ref, class, ValidationErrorKind::Missing);
                }
                (None, _) => {}
                (Some(_), RequirementState::NotAllowed) => {
                    report.add(owner_ref, class, ValidationErrorKind::ExistsButDisallowed);
                }
                (Some(value), _) => {
                    self.check_value(owner, class, value, &mut report);
                    self.check_class(owner, class, value, &mut report);
                }
            }
        }

        report
    }

    /// Generic per-value checks driven by the class description.
    fn check_value(
        &self,
        owner: &Self::Owner,
        class: Self::Class,
        value: &AttributeValue,
        report: &mut ValidationReport,
    ) {
        let owner_ref = owner.owner_ref();

        if let (Some(max), AttributeValue::Text(text)) = (class.max_length(), value) {
            if text.chars().count() > max {
                report.add(owner_ref, class, ValidationErrorKind::Length);
            }
        }

        if !class.allows_negative() && value.as_decimal().is_some_and(|d| d < Decimal::ZERO) {
            report.add(owner_ref, class, ValidationErrorKind::Negative);
        }

        if let Some(money) = value.as_money() {
            if let Some(expected) = self.expected_currency(owner, class) {
                if money.currency != expected {
                    report.add(owner_ref, class, ValidationErrorKind::CurrencyMismatch);
                }
            }
        }
    }

    /// Drop disallowed attributes and default missing mandatory ones.
    ///
    /// Returns the number of attributes changed; a second call on the same
    /// owner changes nothing.
    fn auto_correct(&self, owner: &mut Self::Owner) -> Result<usize, CoreError> {
        let mut changed = 0;

        for class in Self::Class::iter() {
            match self.is_class_required(owner, class) {
                RequirementState::NotAllowed => {
                    if owner.attributes_mut().remove(class).is_some() {
                        tracing::debug!(owner = %owner.owner_ref(), attribute = %class, "Removed disallowed attribute");
                        changed += 1;
                    }
                }
                RequirementState::MustExist => {
                    if owner.attributes().is_present(class) {
                        continue;
                    }
                    if let Some(value) = self.set_default_value(owner, class) {
                        owner.attributes_mut().set(class, value)?;
                        tracing::debug!(owner = %owner.owner_ref(), attribute = %class, "Defaulted mandatory attribute");
                        changed += 1;
                    }
                }
                RequirementState::CanExist => {}
            }
        }

        Ok(changed)
    }
}
