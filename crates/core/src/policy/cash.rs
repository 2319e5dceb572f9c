use crate::models::account::Cash;
use crate::models::attribute::{AccountInfoClass, AttributeSet, AttributeValue, RequirementState};
use crate::models::category::{CategoryClass, TransactionCategory};
use crate::models::money::Currency;
use crate::models::validation::{OwnerRef, ValidationErrorKind, ValidationReport};
use crate::models::workspace::Workspace;

use super::traits::{AttributeOwner, AttributePolicy};

impl AttributeOwner for Cash {
    type Class = AccountInfoClass;

    fn owner_ref(&self) -> OwnerRef {
        OwnerRef::Cash(self.id)
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

/// Attribute rules for cash accounts.
///
/// An auto-expense cash account needs a default payee and expense category
/// to post its spending against; it has no balance, so no opening balance.
pub struct CashPolicy<'a> {
    workspace: &'a Workspace,
}

impl<'a> CashPolicy<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }
}

/// Auto-expense accounts post to a live, plain expense category only.
fn is_auto_expense_target(category: &TransactionCategory) -> bool {
    !category.deleted && category.class == CategoryClass::Expense
}

impl AttributePolicy for CashPolicy<'_> {
    type Class = AccountInfoClass;
    type Owner = Cash;

    fn is_class_required(&self, cash: &Cash, class: AccountInfoClass) -> RequirementState {
        let auto_expense = cash.is_auto_expense();
        match class {
            AccountInfoClass::AutoPayee | AccountInfoClass::AutoExpense if auto_expense => {
                RequirementState::MustExist
            }
            AccountInfoClass::AutoPayee | AccountInfoClass::AutoExpense => {
                RequirementState::NotAllowed
            }
            AccountInfoClass::Notes => RequirementState::CanExist,
            AccountInfoClass::OpeningBalance if auto_expense => RequirementState::NotAllowed,
            AccountInfoClass::OpeningBalance => RequirementState::CanExist,
            AccountInfoClass::Maturity
            | AccountInfoClass::SortCode
            | AccountInfoClass::Account
            | AccountInfoClass::Reference
            | AccountInfoClass::WebSite
            | AccountInfoClass::CustomerNo
            | AccountInfoClass::UserId
            | AccountInfoClass::Password => RequirementState::NotAllowed,
        }
    }

    fn check_class(
        &self,
        cash: &Cash,
        class: AccountInfoClass,
        value: &AttributeValue,
        report: &mut ValidationReport,
    ) {
        if class != AccountInfoClass::AutoExpense {
            return;
        }
        let genuine = match value {
            AttributeValue::Category(id) => self
                .workspace
                .category(*id)
                .is_ok_and(is_auto_expense_target),
            _ => false,
        };
        if !genuine {
            report.add(cash.owner_ref(), class, ValidationErrorKind::BadCategoryAssignment);
        }
    }

    fn set_default_value(&self, _cash: &Cash, class: AccountInfoClass) -> Option<AttributeValue> {
        match class {
            AccountInfoClass::AutoPayee => self
                .workspace
                .payees
                .iter()
                .find(|p| !p.flags.deleted && !p.flags.closed)
                .map(|p| AttributeValue::Payee(p.id)),
            AccountInfoClass::AutoExpense => self
                .workspace
                .categories
                .iter()
                .find(|c| is_auto_expense_target(c))
                .map(|c| AttributeValue::Category(c.id)),
            _ => None,
        }
    }
}
