use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attribute::{AccountInfoClass, AttributeSet};
use super::money::Currency;
use crate::errors::CoreError;

// Sub-kind enumerations carry persisted class ids like `AssetType`.
macro_rules! class_ids {
    ($name:ident, $label:literal, { $($variant:ident = $id:literal),+ $(,)? }) => {
        impl $name {
            pub fn class_id(self) -> i32 {
                match self {
                    $($name::$variant => $id,)+
                }
            }

            pub fn from_class_id(id: i32) -> Result<Self, CoreError> {
                match id {
                    $($id => Ok($name::$variant),)+
                    _ => Err(CoreError::InvalidClassId { kind: $label, id }),
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = CoreError;

            fn try_from(id: i32) -> Result<Self, Self::Error> {
                Self::from_class_id(id)
            }
        }
    };
}

/// Kind of payee; several transaction categories demand a specific one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayeeType {
    Employer,
    Government,
    Individual,
    TaxMan,
    Institution,
    Market,
    Payee,
}

class_ids!(PayeeType, "PayeeType", {
    Employer = 1,
    Government = 2,
    Individual = 3,
    TaxMan = 4,
    Institution = 5,
    Market = 6,
    Payee = 7,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepositCategoryClass {
    Checking,
    Savings,
    TaxFreeSavings,
    PeerToPeer,
    Bond,
    TaxFreeBond,
}

class_ids!(DepositCategoryClass, "DepositCategoryClass", {
    Checking = 1,
    Savings = 2,
    TaxFreeSavings = 3,
    PeerToPeer = 4,
    Bond = 5,
    TaxFreeBond = 6,
});

impl DepositCategoryClass {
    /// Fixed-term accounts that carry a maturity date.
    pub fn is_bond(self) -> bool {
        matches!(self, DepositCategoryClass::Bond | DepositCategoryClass::TaxFreeBond)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashCategoryClass {
    Cash,
    AutoExpense,
}

class_ids!(CashCategoryClass, "CashCategoryClass", {
    Cash = 1,
    AutoExpense = 2,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanCategoryClass {
    CreditCard,
    PrivateLoan,
    Loan,
}

class_ids!(LoanCategoryClass, "LoanCategoryClass", {
    CreditCard = 1,
    PrivateLoan = 2,
    Loan = 3,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortfolioType {
    Standard,
    TaxFree,
    Pension,
}

class_ids!(PortfolioType, "PortfolioType", {
    Standard = 1,
    TaxFree = 2,
    Pension = 3,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityType {
    Shares,
    GrowthUnitTrust,
    IncomeUnitTrust,
    LifeBond,
    Property,
    Vehicle,
    Asset,
}

class_ids!(SecurityType, "SecurityType", {
    Shares = 1,
    GrowthUnitTrust = 2,
    IncomeUnitTrust = 3,
    LifeBond = 4,
    Property = 5,
    Vehicle = 6,
    Asset = 7,
});

impl SecurityType {
    /// Supports share events: splits, rights issues, take-overs, demergers.
    pub fn is_shares(self) -> bool {
        matches!(self, SecurityType::Shares)
    }

    pub fn is_property(self) -> bool {
        matches!(self, SecurityType::Property)
    }
}

/// Flags shared by every account-like record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFlags {
    pub closed: bool,
    pub hidden: bool,
    /// Pending deletion in the workspace; never chosen as a default.
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payee {
    pub id: Uuid,
    pub name: String,
    pub payee_type: PayeeType,
    pub flags: RecordFlags,
}

impl Payee {
    pub fn new(name: impl Into<String>, payee_type: PayeeType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            payee_type,
            flags: RecordFlags::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: Uuid,
    pub name: String,
    pub category: DepositCategoryClass,
    pub currency: Currency,
    pub parent: Option<Uuid>,
    pub flags: RecordFlags,
    #[serde(default)]
    pub info: AttributeSet<AccountInfoClass>,
}

impl Deposit {
    pub fn new(name: impl Into<String>, category: DepositCategoryClass, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            currency,
            parent: None,
            flags: RecordFlags::default(),
            info: AttributeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cash {
    pub id: Uuid,
    pub name: String,
    pub category: CashCategoryClass,
    pub currency: Currency,
    pub flags: RecordFlags,
    #[serde(default)]
    pub info: AttributeSet<AccountInfoClass>,
}

impl Cash {
    pub fn new(name: impl Into<String>, category: CashCategoryClass, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            currency,
            flags: RecordFlags::default(),
            info: AttributeSet::new(),
        }
    }

    pub fn is_auto_expense(&self) -> bool {
        self.category == CashCategoryClass::AutoExpense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: Uuid,
    pub name: String,
    pub category: LoanCategoryClass,
    pub currency: Currency,
    pub parent: Option<Uuid>,
    pub flags: RecordFlags,
}

impl Loan {
    pub fn new(name: impl Into<String>, category: LoanCategoryClass, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            currency,
            parent: None,
            flags: RecordFlags::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub name: String,
    pub portfolio_type: PortfolioType,
    pub currency: Currency,
    pub parent: Option<Uuid>,
    pub flags: RecordFlags,
    #[serde(default)]
    pub info: AttributeSet<AccountInfoClass>,
}

impl Portfolio {
    pub fn new(name: impl Into<String>, portfolio_type: PortfolioType, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            portfolio_type,
            currency,
            parent: None,
            flags: RecordFlags::default(),
            info: AttributeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Security {
    pub id: Uuid,
    pub name: String,
    pub security_type: SecurityType,
    pub currency: Currency,
    pub flags: RecordFlags,
}

impl Security {
    pub fn new(name: impl Into<String>, security_type: SecurityType, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            security_type,
            currency,
            flags: RecordFlags::default(),
        }
    }
}

/// One security held inside one portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityHolding {
    pub portfolio: Uuid,
    pub security: Uuid,
    pub closed: bool,
}

impl SecurityHolding {
    pub fn new(portfolio: Uuid, security: Uuid) -> Self {
        Self {
            portfolio,
            security,
            closed: false,
        }
    }
}
