use crate::models::account::Deposit;
use crate::models::attribute::{AccountInfoClass, AttributeSet, RequirementState};
use crate::models::money::Currency;
use crate::models::validation::OwnerRef;

use super::traits::{AttributeOwner, AttributePolicy};

impl AttributeOwner for Deposit {
    type Class = AccountInfoClass;

    fn owner_ref(&self) -> OwnerRef {
        OwnerRef::Deposit(self.id)
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

/// Attribute rules for deposit accounts. Only bonds carry a maturity.
pub struct DepositPolicy;

impl DepositPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DepositPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributePolicy for DepositPolicy {
    type Class = AccountInfoClass;
    type Owner = Deposit;

    fn is_class_required(&self, deposit: &Deposit, class: AccountInfoClass) -> RequirementState {
        match class {
            AccountInfoClass::Maturity if deposit.category.is_bond() => RequirementState::MustExist,
            AccountInfoClass::Maturity => RequirementState::NotAllowed,
            AccountInfoClass::Notes
            | AccountInfoClass::SortCode
            | AccountInfoClass::Account
            | AccountInfoClass::Reference
            | AccountInfoClass::OpeningBalance => RequirementState::CanExist,
            AccountInfoClass::WebSite
            | AccountInfoClass::CustomerNo
            | AccountInfoClass::UserId
            | AccountInfoClass::Password
            | AccountInfoClass::AutoExpense
            | AccountInfoClass::AutoPayee => RequirementState::NotAllowed,
        }
    }
}
