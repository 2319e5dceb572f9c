use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use uuid::Uuid;

use crate::errors::CoreError;

/// Broad grouping of category classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKind {
    Income,
    Expense,
    Transfer,
    /// Security and loan events that move units or restructure holdings
    Structural,
    /// Generated by the analysis layer, never chosen by the user
    System,
    /// Parent nodes of the category tree
    Group,
}

/// Purpose of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, Display)]
pub enum CategoryClass {
    // ── Income ──────────────────────────────────────────────────────
    TaxedIncome,
    GrossIncome,
    OtherIncome,
    GrantIncome,
    BenefitIncome,
    GiftedIncome,
    Inherited,
    Interest,
    TaxedInterest,
    GrossInterest,
    TaxFreeInterest,
    PeerToPeerInterest,
    Dividend,
    ShareDividend,
    UnitTrustDividend,
    ForeignDividend,
    TaxFreeDividend,
    RentalIncome,
    RoomRentalIncome,
    LoyaltyBonus,
    CashBack,
    LoanInterestEarned,

    // ── Expense ─────────────────────────────────────────────────────
    Expense,
    LocalTaxes,
    IncomeTax,
    LoanInterestCharged,
    WriteOff,
    BadDebtCapital,
    BadDebtInterest,

    // ── Transfer ────────────────────────────────────────────────────
    Transfer,

    // ── Structural ──────────────────────────────────────────────────
    UnitsAdjust,
    StockSplit,
    StockRightsIssue,
    StockDemerger,
    StockTakeOver,
    PortfolioXfer,

    // ── System (hidden) ─────────────────────────────────────────────
    TaxCredit,
    NatInsurance,
    DeemedBenefit,
    Withheld,
    OpeningBalance,
    MarketGrowth,
    CurrencyFluctuation,
    CapitalGain,

    // ── Groups ──────────────────────────────────────────────────────
    IncomeTotals,
    ExpenseTotals,
    SecurityParent,
    Totals,
}

impl CategoryClass {
    pub fn class_id(self) -> i32 {
        use CategoryClass::*;
        match self {
            TaxedIncome => 1,
            GrossIncome => 2,
            OtherIncome => 3,
            GrantIncome => 4,
            BenefitIncome => 5,
            GiftedIncome => 6,
            Inherited => 7,
            Interest => 8,
            TaxedInterest => 9,
            GrossInterest => 10,
            TaxFreeInterest => 11,
            PeerToPeerInterest => 12,
            Dividend => 13,
            ShareDividend => 14,
            UnitTrustDividend => 15,
            ForeignDividend => 16,
            TaxFreeDividend => 17,
            RentalIncome => 18,
            RoomRentalIncome => 19,
            LoyaltyBonus => 20,
            CashBack => 21,
            LoanInterestEarned => 22,
            Expense => 30,
            LocalTaxes => 31,
            IncomeTax => 32,
            LoanInterestCharged => 33,
            WriteOff => 34,
            BadDebtCapital => 35,
            BadDebtInterest => 36,
            Transfer => 40,
            UnitsAdjust => 50,
            StockSplit => 51,
            StockRightsIssue => 52,
            StockDemerger => 53,
            StockTakeOver => 54,
            PortfolioXfer => 55,
            TaxCredit => 60,
            NatInsurance => 61,
            DeemedBenefit => 62,
            Withheld => 63,
            OpeningBalance => 64,
            MarketGrowth => 65,
            CurrencyFluctuation => 66,
            CapitalGain => 67,
            IncomeTotals => 90,
            ExpenseTotals => 91,
            SecurityParent => 92,
            Totals => 93,
        }
    }

    pub fn from_class_id(id: i32) -> Result<Self, CoreError> {
        use strum::IntoEnumIterator;
        Self::iter()
            .find(|c| c.class_id() == id)
            .ok_or(CoreError::InvalidClassId { kind: "CategoryClass", id })
    }

    pub fn kind(self) -> CategoryKind {
        use CategoryClass::*;
        match self {
            TaxedIncome | GrossIncome | OtherIncome | GrantIncome | BenefitIncome
            | GiftedIncome | Inherited | Interest | TaxedInterest | GrossInterest
            | TaxFreeInterest | PeerToPeerInterest | Dividend | ShareDividend
            | UnitTrustDividend | ForeignDividend | TaxFreeDividend | RentalIncome
            | RoomRentalIncome | LoyaltyBonus | CashBack | LoanInterestEarned => {
                CategoryKind::Income
            }
            Expense | LocalTaxes | IncomeTax | LoanInterestCharged | WriteOff
            | BadDebtCapital | BadDebtInterest => CategoryKind::Expense,
            Transfer => CategoryKind::Transfer,
            UnitsAdjust | StockSplit | StockRightsIssue | StockDemerger | StockTakeOver
            | PortfolioXfer => CategoryKind::Structural,
            TaxCredit | NatInsurance | DeemedBenefit | Withheld | OpeningBalance
            | MarketGrowth | CurrencyFluctuation | CapitalGain => CategoryKind::System,
            IncomeTotals | ExpenseTotals | SecurityParent | Totals => CategoryKind::Group,
        }
    }

    /// System categories exist only for analysis and may never be assigned.
    pub fn is_hidden_type(self) -> bool {
        self.kind() == CategoryKind::System
    }

    /// Group nodes may own child categories but never a transaction.
    pub fn can_parent(self) -> bool {
        self.kind() == CategoryKind::Group
    }

    pub fn is_income(self) -> bool {
        self.kind() == CategoryKind::Income
    }

    pub fn is_expense(self) -> bool {
        self.kind() == CategoryKind::Expense
    }

    pub fn is_transfer(self) -> bool {
        self == CategoryClass::Transfer
    }

    pub fn is_dividend(self) -> bool {
        use CategoryClass::*;
        matches!(
            self,
            Dividend | ShareDividend | UnitTrustDividend | ForeignDividend | TaxFreeDividend
        )
    }

    pub fn is_interest(self) -> bool {
        use CategoryClass::*;
        matches!(
            self,
            Interest | TaxedInterest | GrossInterest | TaxFreeInterest | PeerToPeerInterest
        )
    }

    /// Events that move units only; the cash amount is always zero.
    pub fn needs_zero_amount(self) -> bool {
        use CategoryClass::*;
        matches!(self, UnitsAdjust | StockSplit | StockDemerger)
    }
}

impl TryFrom<i32> for CategoryClass {
    type Error = CoreError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_class_id(id)
    }
}

/// A node in the transaction category tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCategory {
    pub id: Uuid,
    pub name: String,
    pub class: CategoryClass,
    pub parent: Option<Uuid>,
    #[serde(default)]
    pub deleted: bool,
}

impl TransactionCategory {
    pub fn new(name: impl Into<String>, class: CategoryClass) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            class,
            parent: None,
            deleted: false,
        }
    }

    pub fn with_parent(mut self, parent: Uuid) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.class.is_hidden_type()
    }

    pub fn is_group(&self) -> bool {
        self.class.can_parent()
    }

    /// Usable as the category of a new or repaired transaction.
    pub fn is_selectable(&self) -> bool {
        !self.deleted && !self.is_group() && !self.is_hidden()
    }
}
