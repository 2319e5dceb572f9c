use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::account::{
    Cash, Deposit, DepositCategoryClass, Loan, LoanCategoryClass, Payee, PayeeType, Portfolio,
    Security, SecurityHolding, SecurityType,
};
use super::asset::{AssetId, AssetType};
use super::category::TransactionCategory;
use super::money::{Currency, ExchangeRates};
use super::tax_year::TaxYear;
use crate::errors::CoreError;

/// The loaded records the rule layer works against.
///
/// Collections keep insertion order; default searches return the first
/// match in that order. Holdings are keyed by their owning portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub payees: Vec<Payee>,
    pub deposits: Vec<Deposit>,
    pub cash: Vec<Cash>,
    pub loans: Vec<Loan>,
    pub portfolios: Vec<Portfolio>,
    pub securities: Vec<Security>,
    pub holdings: HashMap<Uuid, Vec<SecurityHolding>>,
    pub categories: Vec<TransactionCategory>,
    pub tax_years: Vec<TaxYear>,
    pub rates: ExchangeRates,
}

/// One of the searchable account-like collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCollection {
    Payees,
    Deposits,
    /// Cash records, auto-expense ones included
    Cash,
    Loans,
    Portfolios,
    Holdings,
}

impl Workspace {
    pub fn new(base_currency: Currency) -> Self {
        Self {
            payees: Vec::new(),
            deposits: Vec::new(),
            cash: Vec::new(),
            loans: Vec::new(),
            portfolios: Vec::new(),
            securities: Vec::new(),
            holdings: HashMap::new(),
            categories: Vec::new(),
            tax_years: Vec::new(),
            rates: ExchangeRates::new(base_currency),
        }
    }

    // ── Builders ────────────────────────────────────────────────────

    pub fn add_payee(&mut self, payee: Payee) -> AssetId {
        let id = AssetId::Payee(payee.id);
        self.payees.push(payee);
        id
    }

    pub fn add_deposit(&mut self, deposit: Deposit) -> AssetId {
        let id = AssetId::Deposit(deposit.id);
        self.deposits.push(deposit);
        id
    }

    pub fn add_cash(&mut self, cash: Cash) -> AssetId {
        let id = AssetId::Cash(cash.id);
        self.cash.push(cash);
        id
    }

    pub fn add_loan(&mut self, loan: Loan) -> AssetId {
        let id = AssetId::Loan(loan.id);
        self.loans.push(loan);
        id
    }

    pub fn add_portfolio(&mut self, portfolio: Portfolio) -> AssetId {
        let id = AssetId::Portfolio(portfolio.id);
        self.portfolios.push(portfolio);
        id
    }

    pub fn add_security(&mut self, security: Security) -> AssetId {
        let id = AssetId::Security(security.id);
        self.securities.push(security);
        id
    }

    /// Open a holding of `security` inside `portfolio`. Both must exist.
    pub fn add_holding(&mut self, portfolio: Uuid, security: Uuid) -> Result<AssetId, CoreError> {
        if self.portfolio(portfolio).is_none() {
            return Err(CoreError::AssetNotFound(format!("portfolio:{portfolio}")));
        }
        if self.security(security).is_none() {
            return Err(CoreError::AssetNotFound(format!("security:{security}")));
        }
        let list = self.holdings.entry(portfolio).or_default();
        if !list.iter().any(|h| h.security == security) {
            list.push(SecurityHolding::new(portfolio, security));
        }
        Ok(AssetId::Holding {
            portfolio,
            security,
        })
    }

    pub fn add_category(&mut self, category: TransactionCategory) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        id
    }

    pub fn add_tax_year(&mut self, tax_year: TaxYear) {
        self.tax_years.push(tax_year);
    }

    // ── Lookups ─────────────────────────────────────────────────────

    pub fn payee(&self, id: Uuid) -> Option<&Payee> {
        self.payees.iter().find(|p| p.id == id)
    }

    pub fn deposit(&self, id: Uuid) -> Option<&Deposit> {
        self.deposits.iter().find(|d| d.id == id)
    }

    pub fn cash_account(&self, id: Uuid) -> Option<&Cash> {
        self.cash.iter().find(|c| c.id == id)
    }

    pub fn loan(&self, id: Uuid) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    pub fn portfolio(&self, id: Uuid) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.id == id)
    }

    pub fn security(&self, id: Uuid) -> Option<&Security> {
        self.securities.iter().find(|s| s.id == id)
    }

    pub fn tax_year(&self, year: i32) -> Option<&TaxYear> {
        self.tax_years.iter().find(|t| t.year == year)
    }

    pub fn category(&self, id: Uuid) -> Result<&TransactionCategory, CoreError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CategoryNotFound(id.to_string()))
    }

    /// Holdings of one portfolio, in the order they were opened.
    pub fn holdings_for(&self, portfolio: Uuid) -> &[SecurityHolding] {
        self.holdings
            .get(&portfolio)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve an id into a borrowed view of the record behind it.
    pub fn resolve(&self, id: &AssetId) -> Result<TransactionAsset<'_>, CoreError> {
        let missing = || CoreError::AssetNotFound(id.to_string());
        match *id {
            AssetId::Payee(uuid) => self.payee(uuid).map(TransactionAsset::Payee).ok_or_else(missing),
            AssetId::Deposit(uuid) => {
                self.deposit(uuid).map(TransactionAsset::Deposit).ok_or_else(missing)
            }
            AssetId::Cash(uuid) => {
                self.cash_account(uuid).map(TransactionAsset::Cash).ok_or_else(missing)
            }
            AssetId::Loan(uuid) => self.loan(uuid).map(TransactionAsset::Loan).ok_or_else(missing),
            AssetId::Portfolio(uuid) => {
                self.portfolio(uuid).map(TransactionAsset::Portfolio).ok_or_else(missing)
            }
            AssetId::Security(uuid) => {
                self.security(uuid).map(TransactionAsset::Security).ok_or_else(missing)
            }
            AssetId::Holding {
                portfolio,
                security,
            } => {
                let holding = self
                    .holdings_for(portfolio)
                    .iter()
                    .find(|h| h.security == security)
                    .ok_or_else(missing)?;
                self.holding_view(holding).ok_or_else(missing)
            }
        }
    }

    /// Every record of one collection, in workspace order.
    pub fn assets(&self, collection: AssetCollection) -> Vec<TransactionAsset<'_>> {
        match collection {
            AssetCollection::Payees => self.payees.iter().map(TransactionAsset::Payee).collect(),
            AssetCollection::Deposits => {
                self.deposits.iter().map(TransactionAsset::Deposit).collect()
            }
            AssetCollection::Cash => self.cash.iter().map(TransactionAsset::Cash).collect(),
            AssetCollection::Loans => self.loans.iter().map(TransactionAsset::Loan).collect(),
            AssetCollection::Portfolios => {
                self.portfolios.iter().map(TransactionAsset::Portfolio).collect()
            }
            AssetCollection::Holdings => self
                .portfolios
                .iter()
                .flat_map(|p| self.holdings_for(p.id))
                .filter_map(|h| self.holding_view(h))
                .collect(),
        }
    }

    fn holding_view<'a>(&'a self, holding: &'a SecurityHolding) -> Option<TransactionAsset<'a>> {
        Some(TransactionAsset::Holding {
            holding,
            portfolio: self.portfolio(holding.portfolio)?,
            security: self.security(holding.security)?,
        })
    }
}

/// Borrowed view of any transaction endpoint, as the rules see it.
#[derive(Debug, Clone, Copy)]
pub enum TransactionAsset<'a> {
    Payee(&'a Payee),
    Deposit(&'a Deposit),
    Cash(&'a Cash),
    Loan(&'a Loan),
    Portfolio(&'a Portfolio),
    Security(&'a Security),
    Holding {
        holding: &'a SecurityHolding,
        portfolio: &'a Portfolio,
        security: &'a Security,
    },
}

impl<'a> TransactionAsset<'a> {
    pub fn asset_type(&self) -> AssetType {
        match self {
            TransactionAsset::Payee(_) => AssetType::Payee,
            TransactionAsset::Deposit(_) => AssetType::Deposit,
            TransactionAsset::Cash(c) if c.is_auto_expense() => AssetType::AutoExpense,
            TransactionAsset::Cash(_) => AssetType::Cash,
            TransactionAsset::Loan(_) => AssetType::Loan,
            TransactionAsset::Portfolio(_) => AssetType::Portfolio,
            TransactionAsset::Security(_) => AssetType::Security,
            TransactionAsset::Holding { .. } => AssetType::SecurityHolding,
        }
    }

    pub fn id(&self) -> AssetId {
        match self {
            TransactionAsset::Payee(p) => AssetId::Payee(p.id),
            TransactionAsset::Deposit(d) => AssetId::Deposit(d.id),
            TransactionAsset::Cash(c) => AssetId::Cash(c.id),
            TransactionAsset::Loan(l) => AssetId::Loan(l.id),
            TransactionAsset::Portfolio(p) => AssetId::Portfolio(p.id),
            TransactionAsset::Security(s) => AssetId::Security(s.id),
            TransactionAsset::Holding { holding, .. } => AssetId::Holding {
                portfolio: holding.portfolio,
                security: holding.security,
            },
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            TransactionAsset::Payee(p) => &p.name,
            TransactionAsset::Deposit(d) => &d.name,
            TransactionAsset::Cash(c) => &c.name,
            TransactionAsset::Loan(l) => &l.name,
            TransactionAsset::Portfolio(p) => &p.name,
            TransactionAsset::Security(s) => &s.name,
            TransactionAsset::Holding { security, .. } => &security.name,
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            TransactionAsset::Payee(p) => p.flags.closed,
            TransactionAsset::Deposit(d) => d.flags.closed,
            TransactionAsset::Cash(c) => c.flags.closed,
            TransactionAsset::Loan(l) => l.flags.closed,
            TransactionAsset::Portfolio(p) => p.flags.closed,
            TransactionAsset::Security(s) => s.flags.closed,
            TransactionAsset::Holding {
                holding,
                portfolio,
                security,
            } => holding.closed || portfolio.flags.closed || security.flags.closed,
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            TransactionAsset::Payee(p) => p.flags.hidden,
            TransactionAsset::Deposit(d) => d.flags.hidden,
            TransactionAsset::Cash(c) => c.flags.hidden,
            TransactionAsset::Loan(l) => l.flags.hidden,
            TransactionAsset::Portfolio(p) => p.flags.hidden,
            TransactionAsset::Security(s) => s.flags.hidden,
            TransactionAsset::Holding {
                portfolio,
                security,
                ..
            } => portfolio.flags.hidden || security.flags.hidden,
        }
    }

    pub fn is_deleted(&self) -> bool {
        match self {
            TransactionAsset::Payee(p) => p.flags.deleted,
            TransactionAsset::Deposit(d) => d.flags.deleted,
            TransactionAsset::Cash(c) => c.flags.deleted,
            TransactionAsset::Loan(l) => l.flags.deleted,
            TransactionAsset::Portfolio(p) => p.flags.deleted,
            TransactionAsset::Security(s) => s.flags.deleted,
            TransactionAsset::Holding {
                portfolio,
                security,
                ..
            } => portfolio.flags.deleted || security.flags.deleted,
        }
    }

    /// Open, visible and not pending deletion.
    pub fn is_available(&self) -> bool {
        !self.is_deleted() && !self.is_closed() && !self.is_hidden()
    }

    /// Payees have no currency of their own.
    pub fn currency(&self) -> Option<&'a Currency> {
        match self {
            TransactionAsset::Payee(_) => None,
            TransactionAsset::Deposit(d) => Some(&d.currency),
            TransactionAsset::Cash(c) => Some(&c.currency),
            TransactionAsset::Loan(l) => Some(&l.currency),
            TransactionAsset::Portfolio(p) => Some(&p.currency),
            TransactionAsset::Security(s) => Some(&s.currency),
            TransactionAsset::Holding { security, .. } => Some(&security.currency),
        }
    }

    /// The portfolio a record is, or belongs to.
    pub fn portfolio_id(&self) -> Option<Uuid> {
        match self {
            TransactionAsset::Portfolio(p) => Some(p.id),
            TransactionAsset::Holding { holding, .. } => Some(holding.portfolio),
            _ => None,
        }
    }

    pub fn security_type(&self) -> Option<SecurityType> {
        match self {
            TransactionAsset::Security(s) => Some(s.security_type),
            TransactionAsset::Holding { security, .. } => Some(security.security_type),
            _ => None,
        }
    }

    pub fn payee_type(&self) -> Option<PayeeType> {
        match self {
            TransactionAsset::Payee(p) => Some(p.payee_type),
            _ => None,
        }
    }

    pub fn is_peer_to_peer(&self) -> bool {
        matches!(self, TransactionAsset::Deposit(d) if d.category == DepositCategoryClass::PeerToPeer)
    }

    pub fn is_credit_card(&self) -> bool {
        matches!(self, TransactionAsset::Loan(l) if l.category == LoanCategoryClass::CreditCard)
    }

    pub fn is_shares(&self) -> bool {
        self.security_type().is_some_and(SecurityType::is_shares)
    }

    pub fn is_property(&self) -> bool {
        self.security_type().is_some_and(SecurityType::is_property)
    }
}
