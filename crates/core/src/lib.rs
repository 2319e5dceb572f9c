pub mod errors;
pub mod logging;
pub mod models;
pub mod policy;
pub mod services;

use chrono::NaiveDate;
use models::{
    money::Currency,
    settings::{DateRange, Settings},
    tax_year::{TaxRegime, TaxYear},
    transaction::Transaction,
    validation::ValidationReport,
    workspace::Workspace,
};
use policy::{
    AttributePolicy, CashPolicy, DepositPolicy, PortfolioPolicy, TaxYearPolicy, TransactionPolicy,
};
use services::{
    currency_service::CurrencyService,
    transaction_composer::{TransactionComposer, TransactionSeed},
    transaction_rules::TransactionRules,
};
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the record-keeper rule layer.
/// Holds the loaded workspace and the engines that work against it.
#[must_use]
pub struct RecordKeeper {
    workspace: Workspace,
    settings: Settings,
    rules: TransactionRules,
    composer: TransactionComposer,
    currency_service: CurrencyService,
}

impl std::fmt::Debug for RecordKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordKeeper")
            .field("payees", &self.workspace.payees.len())
            .field("deposits", &self.workspace.deposits.len())
            .field("cash", &self.workspace.cash.len())
            .field("loans", &self.workspace.loans.len())
            .field("portfolios", &self.workspace.portfolios.len())
            .field("categories", &self.workspace.categories.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl RecordKeeper {
    pub fn new(workspace: Workspace, settings: Settings) -> Self {
        let mut composer = TransactionComposer::new(settings.date_range);
        composer.set_default_currency(settings.default_currency.clone());
        Self {
            workspace,
            settings,
            rules: TransactionRules::new(),
            composer,
            currency_service: CurrencyService::new(),
        }
    }

    /// Pin the date default transactions start from.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.composer = self.composer.with_today(today);
        self
    }

    #[must_use]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Build a legal default transaction around `seed`.
    ///
    /// `None` when no legal combination exists. Resolution failures are
    /// logged here and also come back as `None`.
    #[must_use]
    pub fn build_transaction(&self, seed: TransactionSeed) -> Option<Transaction> {
        match self.composer.build_transaction(&self.workspace, seed) {
            Ok(transaction) => transaction,
            Err(e) => {
                tracing::error!(seed = %seed, error = %e, "Failed to build transaction");
                None
            }
        }
    }

    /// Repair an edited transaction back to legality.
    pub fn auto_correct(&self, transaction: &mut Transaction) -> Result<(), CoreError> {
        self.composer.auto_correct(&self.workspace, transaction)
    }

    /// Do the account, category, direction and partner all agree?
    /// A transaction whose ids do not resolve is not legal.
    #[must_use]
    pub fn is_legal(&self, transaction: &Transaction) -> bool {
        self.rules
            .is_valid_transaction(&self.workspace, transaction)
            .unwrap_or_else(|e| {
                tracing::warn!(transaction = %transaction.id, error = %e, "Unresolvable transaction");
                false
            })
    }

    // ── Attribute validation ────────────────────────────────────────

    pub fn validate_transaction(&self, transaction: &Transaction) -> ValidationReport {
        TransactionPolicy::new(&self.workspace, &self.currency_service).validate(transaction)
    }

    pub fn validate_cash(&self, id: Uuid) -> Result<ValidationReport, CoreError> {
        let cash = self
            .workspace
            .cash_account(id)
            .ok_or_else(|| CoreError::AssetNotFound(format!("cash:{id}")))?;
        Ok(CashPolicy::new(&self.workspace).validate(cash))
    }

    pub fn validate_deposit(&self, id: Uuid) -> Result<ValidationReport, CoreError> {
        let deposit = self
            .workspace
            .deposit(id)
            .ok_or_else(|| CoreError::AssetNotFound(format!("deposit:{id}")))?;
        Ok(DepositPolicy::new().validate(deposit))
    }

    pub fn validate_portfolio(&self, id: Uuid) -> Result<ValidationReport, CoreError> {
        let portfolio = self
            .workspace
            .portfolio(id)
            .ok_or_else(|| CoreError::AssetNotFound(format!("portfolio:{id}")))?;
        Ok(PortfolioPolicy::new().validate(portfolio))
    }

    pub fn validate_tax_year(&self, year: i32) -> Result<ValidationReport, CoreError> {
        let tax_year = self
            .workspace
            .tax_year(year)
            .ok_or(CoreError::TaxYearNotFound(year))?;
        Ok(TaxYearPolicy::new().validate(tax_year))
    }

    /// Validate every attribute owner in the workspace, transactions aside.
    pub fn validate_all(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        let cash_policy = CashPolicy::new(&self.workspace);
        for cash in &self.workspace.cash {
            report.merge(cash_policy.validate(cash));
        }
        let deposit_policy = DepositPolicy::new();
        for deposit in &self.workspace.deposits {
            report.merge(deposit_policy.validate(deposit));
        }
        let portfolio_policy = PortfolioPolicy::new();
        for portfolio in &self.workspace.portfolios {
            report.merge(portfolio_policy.validate(portfolio));
        }
        let tax_year_policy = TaxYearPolicy::new();
        for tax_year in &self.workspace.tax_years {
            report.merge(tax_year_policy.validate(tax_year));
        }

        if !report.is_valid() {
            tracing::info!(errors = report.len(), "Workspace has attribute errors");
        }
        report
    }

    // ── Attribute auto-correction ───────────────────────────────────

    /// Drop disallowed and default missing attributes of a cash account.
    /// Returns the number of attributes changed.
    pub fn auto_correct_cash(&mut self, id: Uuid) -> Result<usize, CoreError> {
        let mut cash = self
            .workspace
            .cash_account(id)
            .cloned()
            .ok_or_else(|| CoreError::AssetNotFound(format!("cash:{id}")))?;
        let changed = CashPolicy::new(&self.workspace).auto_correct(&mut cash)?;
        if let Some(slot) = self.workspace.cash.iter_mut().find(|c| c.id == id) {
            *slot = cash;
        }
        Ok(changed)
    }

    pub fn auto_correct_deposit(&mut self, id: Uuid) -> Result<usize, CoreError> {
        let deposit = self
            .workspace
            .deposits
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| CoreError::AssetNotFound(format!("deposit:{id}")))?;
        DepositPolicy::new().auto_correct(deposit)
    }

    pub fn auto_correct_portfolio(&mut self, id: Uuid) -> Result<usize, CoreError> {
        let portfolio = self
            .workspace
            .portfolios
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::AssetNotFound(format!("portfolio:{id}")))?;
        PortfolioPolicy::new().auto_correct(portfolio)
    }

    /// Open a new tax year in the default currency with its mandatory
    /// thresholds and copied rates filled in.
    pub fn add_tax_year(&mut self, year: i32, regime: TaxRegime) -> Result<&TaxYear, CoreError> {
        if self.workspace.tax_year(year).is_some() {
            return Err(CoreError::TaxYearExists(year));
        }
        let mut tax_year = TaxYear::new(year, regime, self.settings.default_currency.clone());
        let changed = TaxYearPolicy::new().auto_correct(&mut tax_year)?;
        tracing::debug!(year, currency = %tax_year.currency, defaults = changed, "Added tax year");
        self.workspace.add_tax_year(tax_year);
        self.workspace.tax_year(year).ok_or(CoreError::TaxYearNotFound(year))
    }

    pub fn auto_correct_tax_year(&mut self, year: i32) -> Result<usize, CoreError> {
        let tax_year = self
            .workspace
            .tax_years
            .iter_mut()
            .find(|t| t.year == year)
            .ok_or(CoreError::TaxYearNotFound(year))?;
        TaxYearPolicy::new().auto_correct(tax_year)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the currency used for records created without one.
    pub fn set_default_currency(&mut self, code: &str) -> Result<(), CoreError> {
        let currency = Currency::new(code)?;
        self.composer.set_default_currency(currency.clone());
        self.settings.default_currency = currency;
        Ok(())
    }

    /// Change the window default transaction dates are clamped into.
    pub fn set_date_range(&mut self, date_range: DateRange) {
        self.settings.date_range = date_range;
        self.composer.set_date_range(date_range);
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn transaction_to_json(&self, transaction: &Transaction) -> Result<String, CoreError> {
        serde_json::to_string_pretty(transaction)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize transaction: {e}")))
    }
}
