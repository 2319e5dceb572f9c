use crate::errors::CoreError;
use crate::models::account::PayeeType;
use crate::models::category::{CategoryClass, TransactionCategory};
use crate::models::transaction::{Direction, Transaction};
use crate::models::workspace::{TransactionAsset, Workspace};

/// What the primary account must be for a category class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccountRule {
    Valued,
    Deposit,
    Asset,
    DepositOrPortfolio,
    SecurityHolding,
    PeerToPeerDeposit,
    PropertyHolding,
    SharesHolding,
    Loan,
    ValuedOrAutoExpense,
    HoldingOrPortfolio,
    CashBack,
    LoyaltyBonus,
    Any,
    Never,
}

/// Direction(s) a category class may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectionRule {
    From,
    To,
    Either,
}

/// What the partner must be for a category class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartnerRule {
    AnyPayee,
    PayeeOf(PayeeType),
    SelfReference,
    Dividend,
    StockRights,
    TakeOver,
    Demerger,
    LoyaltyBonus,
    PortfolioXfer,
    Transfer,
    Never,
}

fn account_rule(class: CategoryClass) -> AccountRule {
    use CategoryClass::*;
    match class {
        TaxedIncome | GrossIncome | OtherIncome => AccountRule::Valued,
        GrantIncome | BenefitIncome => AccountRule::Deposit,
        GiftedIncome | Inherited => AccountRule::Asset,
        Interest | TaxedInterest | GrossInterest | TaxFreeInterest | PeerToPeerInterest => {
            AccountRule::DepositOrPortfolio
        }
        Dividend | ShareDividend | UnitTrustDividend | ForeignDividend | TaxFreeDividend => {
            AccountRule::SecurityHolding
        }
        BadDebtCapital | BadDebtInterest => AccountRule::PeerToPeerDeposit,
        RentalIncome | RoomRentalIncome => AccountRule::PropertyHolding,
        UnitsAdjust | StockSplit | StockRightsIssue | StockDemerger | StockTakeOver => {
            AccountRule::SharesHolding
        }
        WriteOff | LoanInterestEarned | LoanInterestCharged => AccountRule::Loan,
        Expense | LocalTaxes | IncomeTax => AccountRule::ValuedOrAutoExpense,
        PortfolioXfer => AccountRule::HoldingOrPortfolio,
        CashBack => AccountRule::CashBack,
        LoyaltyBonus => AccountRule::LoyaltyBonus,
        Transfer => AccountRule::Any,
        TaxCredit | NatInsurance | DeemedBenefit | Withheld | OpeningBalance | MarketGrowth
        | CurrencyFluctuation | CapitalGain | IncomeTotals | ExpenseTotals | SecurityParent
        | Totals => AccountRule::Never,
    }
}

// Refunds are not supported for the single-direction classes yet.
fn direction_rule(class: CategoryClass) -> DirectionRule {
    use CategoryClass::*;
    match class {
        TaxedIncome | GrossIncome | OtherIncome | GrantIncome | BenefitIncome | GiftedIncome
        | Inherited | Interest | TaxedInterest | GrossInterest | TaxFreeInterest
        | PeerToPeerInterest | Dividend | ShareDividend | UnitTrustDividend | ForeignDividend
        | TaxFreeDividend | RentalIncome | RoomRentalIncome | LoyaltyBonus | CashBack
        | LoanInterestEarned | StockRightsIssue => DirectionRule::From,
        LoanInterestCharged | WriteOff | BadDebtCapital | BadDebtInterest | StockDemerger
        | StockTakeOver | PortfolioXfer => DirectionRule::To,
        Expense | LocalTaxes | IncomeTax | Transfer | UnitsAdjust | StockSplit | TaxCredit
        | NatInsurance | DeemedBenefit | Withheld | OpeningBalance | MarketGrowth
        | CurrencyFluctuation | CapitalGain | IncomeTotals | ExpenseTotals | SecurityParent
        | Totals => DirectionRule::Either,
    }
}

fn partner_rule(class: CategoryClass) -> PartnerRule {
    use CategoryClass::*;
    match class {
        TaxedIncome | GrossIncome => PartnerRule::PayeeOf(PayeeType::Employer),
        GrantIncome | BenefitIncome | LocalTaxes => PartnerRule::PayeeOf(PayeeType::Government),
        GiftedIncome | Inherited => PartnerRule::PayeeOf(PayeeType::Individual),
        IncomeTax => PartnerRule::PayeeOf(PayeeType::TaxMan),
        OtherIncome | Interest | TaxedInterest | GrossInterest | TaxFreeInterest
        | PeerToPeerInterest | RentalIncome | RoomRentalIncome | CashBack | Expense
        | BadDebtCapital | BadDebtInterest => PartnerRule::AnyPayee,
        Dividend | ShareDividend | UnitTrustDividend | ForeignDividend | TaxFreeDividend => {
            PartnerRule::Dividend
        }
        WriteOff | LoanInterestEarned | LoanInterestCharged | UnitsAdjust | StockSplit => {
            PartnerRule::SelfReference
        }
        StockRightsIssue => PartnerRule::StockRights,
        StockTakeOver => PartnerRule::TakeOver,
        StockDemerger => PartnerRule::Demerger,
        LoyaltyBonus => PartnerRule::LoyaltyBonus,
        PortfolioXfer => PartnerRule::PortfolioXfer,
        Transfer => PartnerRule::Transfer,
        TaxCredit | NatInsurance | DeemedBenefit | Withheld | OpeningBalance | MarketGrowth
        | CurrencyFluctuation | CapitalGain | IncomeTotals | ExpenseTotals | SecurityParent
        | Totals => PartnerRule::Never,
    }
}

/// Legality rules for transactions.
///
/// Pure decision functions over resolved endpoints: no I/O, never fails,
/// callers interpret the boolean.
pub struct TransactionRules;

impl TransactionRules {
    pub fn new() -> Self {
        Self
    }

    /// Can this record be the primary account of a transaction?
    pub fn is_valid_account(&self, account: &TransactionAsset<'_>) -> bool {
        account.asset_type().is_base_account() && !account.is_hidden()
    }

    /// Is `category` allowed with this primary account?
    pub fn is_valid_category(
        &self,
        account: &TransactionAsset<'_>,
        category: &TransactionCategory,
    ) -> bool {
        if category.is_hidden() {
            return false;
        }

        let kind = account.asset_type();
        match account_rule(category.class) {
            AccountRule::Valued => kind.is_valued(),
            AccountRule::Deposit => kind.is_deposit(),
            AccountRule::Asset => kind.is_asset(),
            AccountRule::DepositOrPortfolio => kind.is_deposit() || kind.is_portfolio(),
            AccountRule::SecurityHolding => kind.is_security_holding(),
            AccountRule::PeerToPeerDeposit => account.is_peer_to_peer(),
            AccountRule::PropertyHolding => kind.is_security_holding() && account.is_property(),
            AccountRule::SharesHolding => kind.is_security_holding() && account.is_shares(),
            AccountRule::Loan => kind.is_loan(),
            AccountRule::ValuedOrAutoExpense => kind.is_valued() || kind.is_auto_expense(),
            AccountRule::HoldingOrPortfolio => kind.is_security_holding() || kind.is_portfolio(),
            AccountRule::CashBack => check_cash_back(account),
            AccountRule::LoyaltyBonus => check_loyalty_bonus_account(account),
            AccountRule::Any => true,
            AccountRule::Never => false,
        }
    }

    /// Is `direction` allowed for this category?
    pub fn is_valid_direction(
        &self,
        _account: &TransactionAsset<'_>,
        category: &TransactionCategory,
        direction: Direction,
    ) -> bool {
        match direction_rule(category.class) {
            DirectionRule::From => direction.is_from(),
            DirectionRule::To => direction.is_to(),
            DirectionRule::Either => true,
        }
    }

    /// Is `partner` a legal counterparty for (account, category)?
    pub fn is_valid_partner(
        &self,
        account: &TransactionAsset<'_>,
        category: &TransactionCategory,
        partner: &TransactionAsset<'_>,
    ) -> bool {
        if partner.is_hidden() {
            return false;
        }

        let class = category.class;
        let account_kind = account.asset_type();
        let partner_kind = partner.asset_type();

        // Auto-expense endpoints only take part in transfers and plain expenses;
        // taxes, write-offs and loan charges keep their own partner rules out.
        if account_kind.is_auto_expense() || partner_kind.is_auto_expense() {
            return if class.is_transfer() {
                let other = if account_kind.is_auto_expense() {
                    partner_kind
                } else {
                    account_kind
                };
                other.is_valued()
            } else if class == CategoryClass::Expense {
                partner_kind.is_payee()
            } else {
                false
            };
        }

        match partner_rule(class) {
            PartnerRule::AnyPayee => partner_kind.is_payee(),
            PartnerRule::PayeeOf(payee_type) => partner.payee_type() == Some(payee_type),
            PartnerRule::SelfReference => account.id() == partner.id(),
            PartnerRule::Dividend => check_dividend(account, partner),
            PartnerRule::StockRights => check_stock_rights(account, partner),
            PartnerRule::TakeOver => check_take_over(account, partner),
            PartnerRule::Demerger => check_demerger(account, partner),
            PartnerRule::LoyaltyBonus => check_loyalty_bonus(account, partner),
            PartnerRule::PortfolioXfer => check_portfolio_xfer(account, partner),
            PartnerRule::Transfer => check_transfer(account, partner),
            PartnerRule::Never => false,
        }
    }

    /// All four rules at once.
    pub fn is_valid(
        &self,
        account: &TransactionAsset<'_>,
        category: &TransactionCategory,
        direction: Direction,
        partner: &TransactionAsset<'_>,
    ) -> bool {
        self.is_valid_account(account)
            && self.is_valid_category(account, category)
            && self.is_valid_direction(account, category, direction)
            && self.is_valid_partner(account, category, partner)
    }

    /// Resolve a stored transaction and check it. Fails only if an id
    /// does not resolve.
    pub fn is_valid_transaction(
        &self,
        workspace: &Workspace,
        transaction: &Transaction,
    ) -> Result<bool, CoreError> {
        let account = workspace.resolve(&transaction.account)?;
        let partner = workspace.resolve(&transaction.partner)?;
        let category = workspace.category(transaction.category)?;
        Ok(self.is_valid(&account, category, transaction.direction, &partner))
    }
}

impl Default for TransactionRules {
    fn default() -> Self {
        Self::new()
    }
}

// ── Sub-checks ──────────────────────────────────────────────────────

/// Reinvested (self), paid to the holding's own portfolio, or paid to a
/// valued account.
fn check_dividend(account: &TransactionAsset<'_>, partner: &TransactionAsset<'_>) -> bool {
    if account.id() == partner.id() {
        return true;
    }
    if let TransactionAsset::Portfolio(portfolio) = partner {
        return account.portfolio_id() == Some(portfolio.id);
    }
    partner.asset_type().is_valued()
}

/// Both holdings, different accounts, same portfolio, same security type.
fn check_take_over(account: &TransactionAsset<'_>, partner: &TransactionAsset<'_>) -> bool {
    account.asset_type().is_security_holding()
        && partner.asset_type().is_security_holding()
        && account.id() != partner.id()
        && account.portfolio_id() == partner.portfolio_id()
        && account.security_type() == partner.security_type()
}

/// A different shares holding in the same portfolio.
fn check_demerger(account: &TransactionAsset<'_>, partner: &TransactionAsset<'_>) -> bool {
    account.asset_type().is_security_holding()
        && partner.asset_type().is_security_holding()
        && account.id() != partner.id()
        && account.portfolio_id() == partner.portfolio_id()
        && partner.is_shares()
}

/// Paid from the holding's own portfolio, or from another valued account.
fn check_stock_rights(account: &TransactionAsset<'_>, partner: &TransactionAsset<'_>) -> bool {
    if let TransactionAsset::Portfolio(portfolio) = partner {
        return account.portfolio_id() == Some(portfolio.id);
    }
    partner.asset_type().is_valued()
}

fn check_cash_back(account: &TransactionAsset<'_>) -> bool {
    account.is_peer_to_peer() || account.is_credit_card()
}

fn check_loyalty_bonus_account(account: &TransactionAsset<'_>) -> bool {
    account.is_peer_to_peer() || account.asset_type().is_portfolio()
}

/// Self, or a portfolio paired with one of its own holdings.
fn check_loyalty_bonus(account: &TransactionAsset<'_>, partner: &TransactionAsset<'_>) -> bool {
    if account.id() == partner.id() {
        return true;
    }
    match (account, partner) {
        (TransactionAsset::Holding { holding, .. }, TransactionAsset::Portfolio(portfolio)) => {
            holding.portfolio == portfolio.id
        }
        (TransactionAsset::Portfolio(portfolio), TransactionAsset::Holding { holding, .. }) => {
            holding.portfolio == portfolio.id
        }
        _ => false,
    }
}

/// Plain transfer between two distinct assets. A holding may not transfer
/// to or from its own portfolio; a different portfolio is fine.
fn check_transfer(account: &TransactionAsset<'_>, partner: &TransactionAsset<'_>) -> bool {
    if account.id() == partner.id() || !partner.asset_type().is_asset() {
        return false;
    }
    match (account, partner) {
        (TransactionAsset::Holding { holding, .. }, TransactionAsset::Portfolio(portfolio))
        | (TransactionAsset::Portfolio(portfolio), TransactionAsset::Holding { holding, .. }) => {
            holding.portfolio != portfolio.id
        }
        _ => true,
    }
}

/// Partner is a portfolio other than the one the account is or sits in.
fn check_portfolio_xfer(account: &TransactionAsset<'_>, partner: &TransactionAsset<'_>) -> bool {
    let TransactionAsset::Portfolio(target) = partner else {
        return false;
    };
    match account {
        TransactionAsset::Portfolio(source) => source.id != target.id,
        TransactionAsset::Holding { holding, .. } => holding.portfolio != target.id,
        _ => false,
    }
}
