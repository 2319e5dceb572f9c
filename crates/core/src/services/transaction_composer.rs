use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::asset::AssetId;
use crate::models::category::{CategoryKind, TransactionCategory};
use crate::models::money::{Currency, Money};
use crate::models::settings::DateRange;
use crate::models::transaction::{Direction, Transaction};
use crate::models::workspace::{AssetCollection, TransactionAsset, Workspace};
use crate::policy::{AttributePolicy, TransactionPolicy};
use crate::services::currency_service::CurrencyService;
use crate::services::transaction_rules::TransactionRules;

/// Where primary accounts are looked for, in order.
const ACCOUNT_SEARCH: [AssetCollection; 5] = [
    AssetCollection::Deposits,
    AssetCollection::Cash,
    AssetCollection::Loans,
    AssetCollection::Holdings,
    AssetCollection::Portfolios,
];

/// Where partners are looked for, in order.
const PARTNER_SEARCH: [AssetCollection; 6] = [
    AssetCollection::Payees,
    AssetCollection::Deposits,
    AssetCollection::Cash,
    AssetCollection::Loans,
    AssetCollection::Portfolios,
    AssetCollection::Holdings,
];

/// Category kinds tried, in order, when nothing else decides the category.
const CATEGORY_PRIORITY: [CategoryKind; 3] = [
    CategoryKind::Expense,
    CategoryKind::Income,
    CategoryKind::Transfer,
];

/// What a new transaction is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSeed {
    /// Nothing chosen yet
    None,
    Payee(AssetId),
    Holding(AssetId),
    /// A deposit, cash, loan or portfolio account
    Account(AssetId),
    Category(Uuid),
}

impl std::fmt::Display for TransactionSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionSeed::None => write!(f, "none"),
            TransactionSeed::Payee(id) | TransactionSeed::Holding(id) | TransactionSeed::Account(id) => {
                write!(f, "{id}")
            }
            TransactionSeed::Category(id) => write!(f, "category:{id}"),
        }
    }
}

/// Builds default transactions and repairs edited ones.
///
/// Reads the workspace only; the transaction being built or repaired is the
/// single thing it mutates. A build that finds no legal combination returns
/// `Ok(None)`; `Err` means an id in the workspace did not resolve.
pub struct TransactionComposer {
    rules: TransactionRules,
    currency: CurrencyService,
    date_range: DateRange,
    today: Option<NaiveDate>,
    /// Amount currency for accounts that carry none of their own
    default_currency: Option<Currency>,
}

impl TransactionComposer {
    pub fn new(date_range: DateRange) -> Self {
        Self {
            rules: TransactionRules::new(),
            currency: CurrencyService::new(),
            date_range,
            today: None,
            default_currency: None,
        }
    }

    /// Pin the date new transactions start from instead of the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn set_default_currency(&mut self, currency: Currency) {
        self.default_currency = Some(currency);
    }

    pub fn set_date_range(&mut self, date_range: DateRange) {
        self.date_range = date_range;
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn rules(&self) -> &TransactionRules {
        &self.rules
    }

    /// Build a legal transaction around `seed`, or `None` if the workspace
    /// holds no legal combination for it.
    pub fn build_transaction(
        &self,
        workspace: &Workspace,
        seed: TransactionSeed,
    ) -> Result<Option<Transaction>, CoreError> {
        tracing::debug!(seed = %seed, "Building transaction");
        match seed {
            TransactionSeed::None => match self.default_category(workspace) {
                Some(category) => self.build_from_category(workspace, category),
                None => {
                    tracing::debug!("No selectable category in workspace");
                    Ok(None)
                }
            },
            TransactionSeed::Category(id) => {
                let category = workspace.category(id)?;
                if !category.is_selectable() {
                    tracing::warn!(category = %id, "Rejected seed: category cannot be assigned");
                    return Ok(None);
                }
                self.build_from_category(workspace, category)
            }
            TransactionSeed::Payee(id) => self.build_from_payee(workspace, &id),
            TransactionSeed::Holding(id) => self.build_from_holding(workspace, &id),
            TransactionSeed::Account(id) => self.build_from_account(workspace, &id),
        }
    }

    fn build_from_category(
        &self,
        workspace: &Workspace,
        category: &TransactionCategory,
    ) -> Result<Option<Transaction>, CoreError> {
        let Some(account) = self.default_account(workspace, category) else {
            tracing::debug!(category = %category.name, "No account accepts category");
            return Ok(None);
        };
        let partner = self.default_partner(workspace, &account, category);
        self.finish(workspace, &account, category, partner.map(|p| p.id()))
    }

    fn build_from_payee(
        &self,
        workspace: &Workspace,
        id: &AssetId,
    ) -> Result<Option<Transaction>, CoreError> {
        let payee = workspace.resolve(id)?;
        if !payee.asset_type().is_payee() || !payee.is_available() {
            tracing::warn!(seed = %id, "Rejected seed: payee unavailable");
            return Ok(None);
        }
        let Some(category) = self.default_category(workspace) else {
            return Ok(None);
        };
        let Some(account) = self.default_account(workspace, category) else {
            return Ok(None);
        };
        if !self.rules.is_valid_partner(&account, category, &payee) {
            tracing::debug!(seed = %id, category = %category.name, "Payee is not a legal partner");
            return Ok(None);
        }
        self.finish(workspace, &account, category, Some(*id))
    }

    fn build_from_holding(
        &self,
        workspace: &Workspace,
        id: &AssetId,
    ) -> Result<Option<Transaction>, CoreError> {
        let holding = workspace.resolve(id)?;
        if !holding.asset_type().is_security_holding() || holding.is_closed() || holding.is_deleted()
        {
            tracing::warn!(seed = %id, "Rejected seed: holding unavailable");
            return Ok(None);
        }
        let Some(category) = self.first_legal_category(workspace, &holding) else {
            return Ok(None);
        };
        let partner = self.default_partner(workspace, &holding, category);
        self.finish(workspace, &holding, category, partner.map(|p| p.id()))
    }

    fn build_from_account(
        &self,
        workspace: &Workspace,
        id: &AssetId,
    ) -> Result<Option<Transaction>, CoreError> {
        let account = workspace.resolve(id)?;
        match account.asset_type() {
            kind if kind.is_payee() => return self.build_from_payee(workspace, id),
            kind if kind.is_security_holding() => return self.build_from_holding(workspace, id),
            _ => {}
        }
        if account.is_closed() || account.is_deleted() || !self.rules.is_valid_account(&account) {
            tracing::warn!(seed = %id, "Rejected seed: account unavailable");
            return Ok(None);
        }

        // Priority default first; an account that cannot take it gets the
        // first category it can.
        let category = match self.default_category(workspace) {
            Some(c) if self.rules.is_valid_category(&account, c) => Some(c),
            _ => self.first_legal_category(workspace, &account),
        };
        let Some(category) = category else {
            return Ok(None);
        };
        let partner = self.default_partner(workspace, &account, category);
        self.finish(workspace, &account, category, partner.map(|p| p.id()))
    }

    /// Shared tail of every build: date, zero amount, repair, final check.
    fn finish(
        &self,
        workspace: &Workspace,
        account: &TransactionAsset<'_>,
        category: &TransactionCategory,
        partner: Option<AssetId>,
    ) -> Result<Option<Transaction>, CoreError> {
        let Some(partner) = partner else {
            tracing::debug!(account = %account.id(), category = %category.name, "No legal partner");
            return Ok(None);
        };

        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let currency = account
            .currency()
            .cloned()
            .or_else(|| self.default_currency.clone())
            .unwrap_or_else(|| workspace.rates.base.clone());
        let direction = if category.class.is_income() {
            Direction::From
        } else {
            Direction::To
        };

        let mut transaction = Transaction::new(
            self.date_range.clamp(today),
            Money::zero(currency),
            account.id(),
            partner,
            category.id,
            direction,
        );
        self.auto_correct(workspace, &mut transaction)?;

        if self.rules.is_valid_transaction(workspace, &transaction)? {
            tracing::debug!(transaction = %transaction.id, "Built transaction");
            Ok(Some(transaction))
        } else {
            tracing::debug!(account = %account.id(), category = %category.name, "No legal combination");
            Ok(None)
        }
    }

    /// Repair `transaction` in place. A legal transaction is left unchanged.
    pub fn auto_correct(
        &self,
        workspace: &Workspace,
        transaction: &mut Transaction,
    ) -> Result<(), CoreError> {
        let account = workspace.resolve(&transaction.account)?;

        // 1. Category
        let current = workspace
            .category(transaction.category)
            .ok()
            .filter(|c| self.rules.is_valid_category(&account, c));
        let category = match current {
            Some(c) => Some(c),
            None => {
                let replacement = self.first_legal_category(workspace, &account);
                if let Some(c) = replacement {
                    tracing::debug!(transaction = %transaction.id, category = %c.name, "Replaced category");
                    transaction.category = c.id;
                }
                replacement
            }
        };

        if let Some(category) = category {
            // 2. Direction
            if !self
                .rules
                .is_valid_direction(&account, category, transaction.direction)
            {
                transaction.direction = transaction.direction.reverse();
                tracing::debug!(transaction = %transaction.id, direction = %transaction.direction, "Flipped direction");
            }

            // 3. Partner
            let partner_ok = workspace
                .resolve(&transaction.partner)
                .is_ok_and(|p| self.rules.is_valid_partner(&account, category, &p));
            if !partner_ok {
                if let Some(partner) = self.default_partner(workspace, &account, category) {
                    transaction.partner = partner.id();
                    tracing::debug!(transaction = %transaction.id, partner = %transaction.partner, "Replaced partner");
                }
            }
        }

        // 4. Currency
        if let Some(currency) = account.currency() {
            if &transaction.amount.currency != currency {
                transaction.amount =
                    self.currency
                        .convert(&workspace.rates, &transaction.amount, currency)?;
                tracing::debug!(transaction = %transaction.id, amount = %transaction.amount, "Converted amount");
            }
        }

        // 5. Unit-only events carry no cash
        if category.is_some_and(|c| c.class.needs_zero_amount()) && !transaction.amount.is_zero() {
            transaction.amount = Money::zero(transaction.amount.currency.clone());
            tracing::debug!(transaction = %transaction.id, "Zeroed amount");
        }

        // 6. Extension attributes
        TransactionPolicy::new(workspace, &self.currency).auto_correct(transaction)?;

        Ok(())
    }

    // ── Default searches ────────────────────────────────────────────

    fn default_category<'w>(&self, workspace: &'w Workspace) -> Option<&'w TransactionCategory> {
        CATEGORY_PRIORITY.iter().find_map(|kind| {
            workspace
                .categories
                .iter()
                .find(|c| c.is_selectable() && c.class.kind() == *kind)
        })
    }

    fn first_legal_category<'w>(
        &self,
        workspace: &'w Workspace,
        account: &TransactionAsset<'_>,
    ) -> Option<&'w TransactionCategory> {
        workspace
            .categories
            .iter()
            .find(|c| c.is_selectable() && self.rules.is_valid_category(account, c))
    }

    fn default_account<'w>(
        &self,
        workspace: &'w Workspace,
        category: &TransactionCategory,
    ) -> Option<TransactionAsset<'w>> {
        ACCOUNT_SEARCH
            .iter()
            .flat_map(|collection| workspace.assets(*collection))
            .find(|a| {
                !a.is_deleted()
                    && !a.is_closed()
                    && self.rules.is_valid_account(a)
                    && self.rules.is_valid_category(a, category)
            })
    }

    fn default_partner<'w>(
        &self,
        workspace: &'w Workspace,
        account: &TransactionAsset<'_>,
        category: &TransactionCategory,
    ) -> Option<TransactionAsset<'w>> {
        PARTNER_SEARCH
            .iter()
            .flat_map(|collection| workspace.assets(*collection))
            .find(|p| {
                !p.is_deleted()
                    && !p.is_closed()
                    && self.rules.is_valid_partner(account, category, p)
            })
    }
}

impl Default for TransactionComposer {
    fn default() -> Self {
        Self::new(DateRange::default())
    }
}
