use crate::models::account::Portfolio;
use crate::models::attribute::{AccountInfoClass, AttributeSet, RequirementState};
use crate::models::money::Currency;
use crate::models::validation::OwnerRef;

use super::traits::{AttributeOwner, AttributePolicy};

impl AttributeOwner for Portfolio {
    type Class = AccountInfoClass;

    fn owner_ref(&self) -> OwnerRef {
        OwnerRef::Portfolio(self.id)
    }

    fn attributes(&self) -> &AttributeSet<AccountInfoClass> {
        &self.info
    }

    fn attributes_mut(&mut self) -> &mut AttributeSet<AccountInfoClass> {
        &mut self.info
    }

    fn owner_currency(&self) -> Option<&Currency> {
        Some(&self.currency)
    }
}

/// Attribute rules for portfolios: online-access details are allowed,
/// balance and spending fields are not.
pub struct PortfolioPolicy;

impl PortfolioPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PortfolioPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributePolicy for PortfolioPolicy {
    type Class = AccountInfoClass;
    type Owner = Portfolio;

    fn is_class_required(&self, _portfolio: &Portfolio, class: AccountInfoClass) -> RequirementState {
        match class {
            AccountInfoClass::Notes
            | AccountInfoClass::SortCode
            | AccountInfoClass::Account
            | AccountInfoClass::Reference
            | AccountInfoClass::WebSite
            | AccountInfoClass::CustomerNo
            | AccountInfoClass::UserId
            | AccountInfoClass::Password => RequirementState::CanExist,
            AccountInfoClass::Maturity
            | AccountInfoClass::OpeningBalance
            | AccountInfoClass::AutoExpense
            | AccountInfoClass::AutoPayee => RequirementState::NotAllowed,
        }
    }
}
