use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::models::asset::AssetId;
use crate::models::attribute::{AttributeSet, AttributeValue, RequirementState, TransactionInfoClass};
use crate::models::category::{CategoryClass, TransactionCategory};
use crate::models::money::{Currency, Money};
use crate::models::transaction::Transaction;
use crate::models::validation::{OwnerRef, ValidationErrorKind, ValidationReport};
use crate::models::workspace::{TransactionAsset, Workspace};
use crate::services::currency_service::CurrencyService;

use super::traits::{AttributeOwner, AttributePolicy};

impl AttributeOwner for Transaction {
    type Class = TransactionInfoClass;

    fn owner_ref(&self) -> OwnerRef {
        OwnerRef::Transaction(self.id)
    }

    fn attributes(&self) -> &AttributeSet<TransactionInfoClass> {
        &self.info
    }

    fn attributes_mut(&mut self) -> &mut AttributeSet<TransactionInfoClass> {
        &mut self.info
    }

    fn owner_currency(&self) -> Option<&Currency> {
        Some(&self.amount.currency)
    }
}

/// The endpoints and category of a transaction, resolved.
struct Resolved<'w> {
    account: TransactionAsset<'w>,
    partner: TransactionAsset<'w>,
    category: &'w TransactionCategory,
}

/// Extension attributes of a transaction, driven by its category and the
/// kinds of its two endpoints.
pub struct TransactionPolicy<'a> {
    workspace: &'a Workspace,
    currency: &'a CurrencyService,
}

impl<'a> TransactionPolicy<'a> {
    pub fn new(workspace: &'a Workspace, currency: &'a CurrencyService) -> Self {
        Self {
            workspace,
            currency,
        }
    }

    fn resolve(&self, transaction: &Transaction) -> Option<Resolved<'a>> {
        Some(Resolved {
            account: self.workspace.resolve(&transaction.account).ok()?,
            partner: self.workspace.resolve(&transaction.partner).ok()?,
            category: self.workspace.category(transaction.category).ok()?,
        })
    }
}

fn allowed_if(condition: bool) -> RequirementState {
    if condition {
        RequirementState::CanExist
    } else {
        RequirementState::NotAllowed
    }
}

fn required_if(condition: bool) -> RequirementState {
    if condition {
        RequirementState::MustExist
    } else {
        RequirementState::NotAllowed
    }
}

impl AttributePolicy for TransactionPolicy<'_> {
    type Class = TransactionInfoClass;
    type Owner = Transaction;

    fn is_class_required(&self, transaction: &Transaction, class: TransactionInfoClass) -> RequirementState {
        use TransactionInfoClass::*;

        // Free-text fields never depend on the rest of the transaction
        if matches!(class, Reference | Comments | Tags) {
            return RequirementState::CanExist;
        }
        let Some(resolved) = self.resolve(transaction) else {
            return RequirementState::NotAllowed;
        };

        let category = resolved.category.class;
        let account_holding = resolved.account.asset_type().is_security_holding();
        let partner_holding = resolved.partner.asset_type().is_security_holding();

        match class {
            TaxCredit if category == CategoryClass::TaxedIncome => RequirementState::MustExist,
            TaxCredit => allowed_if(category.is_interest() || category.is_dividend()),
            EmployerNatIns | EmployeeNatIns | DeemedBenefit => {
                allowed_if(category == CategoryClass::TaxedIncome)
            }
            Withheld => allowed_if(category.is_interest()),
            AccountDeltaUnits => match category {
                CategoryClass::UnitsAdjust | CategoryClass::StockSplit => RequirementState::MustExist,
                CategoryClass::Transfer | CategoryClass::StockRightsIssue => allowed_if(account_holding),
                _ => RequirementState::NotAllowed,
            },
            PartnerDeltaUnits => match category {
                CategoryClass::StockTakeOver | CategoryClass::StockDemerger => RequirementState::MustExist,
                CategoryClass::Transfer => allowed_if(partner_holding),
                _ => RequirementState::NotAllowed,
            },
            Dilution => required_if(category == CategoryClass::StockDemerger),
            ReturnedCash => allowed_if(category == CategoryClass::StockTakeOver),
            ReturnedCashAccount => required_if(transaction.info.is_present(ReturnedCash)),
            PartnerAmount => {
                let differs = match (resolved.account.currency(), resolved.partner.currency()) {
                    (Some(account), Some(partner)) => account != partner,
                    _ => false,
                };
                required_if(differs)
            }
            Reference | Comments | Tags => RequirementState::CanExist,
        }
    }

    fn expected_currency(&self, transaction: &Transaction, class: TransactionInfoClass) -> Option<Currency> {
        if class == TransactionInfoClass::PartnerAmount {
            let resolved = self.resolve(transaction)?;
            return resolved.partner.currency().cloned();
        }
        Some(transaction.amount.currency.clone())
    }

    fn check_class(
        &self,
        transaction: &Transaction,
        class: TransactionInfoClass,
        value: &AttributeValue,
        report: &mut ValidationReport,
    ) {
        if let AttributeValue::Tags(tags) = value {
            let mut seen = HashSet::new();
            if tags.iter().any(|tag| !seen.insert(tag.as_str())) {
                report.add(transaction.owner_ref(), class, ValidationErrorKind::Duplicate);
            }
        }
    }

    fn set_default_value(&self, transaction: &Transaction, class: TransactionInfoClass) -> Option<AttributeValue> {
        match class {
            TransactionInfoClass::TaxCredit => {
                Some(AttributeValue::Money(Money::zero(transaction.amount.currency.clone())))
            }
            TransactionInfoClass::PartnerAmount => {
                let target = self.resolve(transaction)?.partner.currency()?.clone();
                match self.currency.convert(&self.workspace.rates, &transaction.amount, &target) {
                    Ok(converted) => Some(AttributeValue::Money(converted)),
                    Err(e) => {
                        tracing::warn!(transaction = %transaction.id, error = %e, "No default partner amount");
                        None
                    }
                }
            }
            // Share events start with no unit movement until the user enters one
            TransactionInfoClass::AccountDeltaUnits | TransactionInfoClass::PartnerDeltaUnits => {
                Some(AttributeValue::Units(Decimal::ZERO))
            }
            TransactionInfoClass::Dilution => Some(AttributeValue::Ratio(Decimal::ZERO)),
            TransactionInfoClass::ReturnedCashAccount => {
                let portfolio = self.resolve(transaction)?.account.portfolio_id()?;
                Some(AttributeValue::Asset(AssetId::Portfolio(portfolio)))
            }
            _ => None,
        }
    }
}
