use serde::{Deserialize, Serialize};
use strum::EnumIter;
use uuid::Uuid;

use crate::errors::CoreError;

/// The kind of a transaction endpoint.
///
/// Every capability predicate below is an exhaustive match, so adding a
/// variant forces each table to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum AssetType {
    /// Counterparty outside the user's books (employer, shop, taxman)
    Payee,
    /// Bank or savings account
    Deposit,
    /// Physical cash
    Cash,
    /// Cash account that records spending without holding a balance
    AutoExpense,
    /// Loan or credit card
    Loan,
    /// Investment portfolio (holds cash and securities)
    Portfolio,
    /// A security definition, not an account by itself
    Security,
    /// One security held within one portfolio
    SecurityHolding,
}

impl AssetType {
    /// Persisted class id of this type.
    pub fn class_id(self) -> i32 {
        match self {
            AssetType::Payee => 1,
            AssetType::Deposit => 2,
            AssetType::Cash => 3,
            AssetType::AutoExpense => 4,
            AssetType::Loan => 5,
            AssetType::Portfolio => 6,
            AssetType::Security => 7,
            AssetType::SecurityHolding => 8,
        }
    }

    /// Convert a persisted class id back into an `AssetType`.
    pub fn from_class_id(id: i32) -> Result<Self, CoreError> {
        match id {
            1 => Ok(AssetType::Payee),
            2 => Ok(AssetType::Deposit),
            3 => Ok(AssetType::Cash),
            4 => Ok(AssetType::AutoExpense),
            5 => Ok(AssetType::Loan),
            6 => Ok(AssetType::Portfolio),
            7 => Ok(AssetType::Security),
            8 => Ok(AssetType::SecurityHolding),
            _ => Err(CoreError::InvalidClassId { kind: "AssetType", id }),
        }
    }

    /// Holds a monetary balance of its own.
    pub fn is_valued(self) -> bool {
        match self {
            AssetType::Deposit | AssetType::Cash | AssetType::Loan | AssetType::Portfolio => true,
            AssetType::Payee
            | AssetType::AutoExpense
            | AssetType::Security
            | AssetType::SecurityHolding => false,
        }
    }

    /// Can be the primary account of a transaction.
    pub fn is_base_account(self) -> bool {
        match self {
            AssetType::Deposit
            | AssetType::Cash
            | AssetType::AutoExpense
            | AssetType::Loan
            | AssetType::Portfolio
            | AssetType::SecurityHolding => true,
            AssetType::Payee | AssetType::Security => false,
        }
    }

    /// Something the user owns (as opposed to a payee).
    pub fn is_asset(self) -> bool {
        match self {
            AssetType::Deposit
            | AssetType::Cash
            | AssetType::AutoExpense
            | AssetType::Loan
            | AssetType::Portfolio
            | AssetType::Security
            | AssetType::SecurityHolding => true,
            AssetType::Payee => false,
        }
    }

    pub fn is_deposit(self) -> bool {
        match self {
            AssetType::Deposit => true,
            AssetType::Payee
            | AssetType::Cash
            | AssetType::AutoExpense
            | AssetType::Loan
            | AssetType::Portfolio
            | AssetType::Security
            | AssetType::SecurityHolding => false,
        }
    }

    pub fn is_loan(self) -> bool {
        match self {
            AssetType::Loan => true,
            AssetType::Payee
            | AssetType::Deposit
            | AssetType::Cash
            | AssetType::AutoExpense
            | AssetType::Portfolio
            | AssetType::Security
            | AssetType::SecurityHolding => false,
        }
    }

    pub fn is_security(self) -> bool {
        match self {
            AssetType::Security => true,
            AssetType::Payee
            | AssetType::Deposit
            | AssetType::Cash
            | AssetType::AutoExpense
            | AssetType::Loan
            | AssetType::Portfolio
            | AssetType::SecurityHolding => false,
        }
    }

    pub fn is_security_holding(self) -> bool {
        match self {
            AssetType::SecurityHolding => true,
            AssetType::Payee
            | AssetType::Deposit
            | AssetType::Cash
            | AssetType::AutoExpense
            | AssetType::Loan
            | AssetType::Portfolio
            | AssetType::Security => false,
        }
    }

    pub fn is_portfolio(self) -> bool {
        match self {
            AssetType::Portfolio => true,
            AssetType::Payee
            | AssetType::Deposit
            | AssetType::Cash
            | AssetType::AutoExpense
            | AssetType::Loan
            | AssetType::Security
            | AssetType::SecurityHolding => false,
        }
    }

    pub fn is_payee(self) -> bool {
        match self {
            AssetType::Payee => true,
            AssetType::Deposit
            | AssetType::Cash
            | AssetType::AutoExpense
            | AssetType::Loan
            | AssetType::Portfolio
            | AssetType::Security
            | AssetType::SecurityHolding => false,
        }
    }

    pub fn is_auto_expense(self) -> bool {
        match self {
            AssetType::AutoExpense => true,
            AssetType::Payee
            | AssetType::Deposit
            | AssetType::Cash
            | AssetType::Loan
            | AssetType::Portfolio
            | AssetType::Security
            | AssetType::SecurityHolding => false,
        }
    }
}

impl TryFrom<i32> for AssetType {
    type Error = CoreError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_class_id(id)
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Payee => write!(f, "Payee"),
            AssetType::Deposit => write!(f, "Deposit"),
            AssetType::Cash => write!(f, "Cash"),
            AssetType::AutoExpense => write!(f, "AutoExpense"),
            AssetType::Loan => write!(f, "Loan"),
            AssetType::Portfolio => write!(f, "Portfolio"),
            AssetType::Security => write!(f, "Security"),
            AssetType::SecurityHolding => write!(f, "SecurityHolding"),
        }
    }
}

/// Stable identifier of a transaction endpoint.
///
/// Identity checks (self-reference, same portfolio) compare these ids
/// instead of the records themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetId {
    Payee(Uuid),
    Deposit(Uuid),
    Cash(Uuid),
    Loan(Uuid),
    Portfolio(Uuid),
    Security(Uuid),
    Holding { portfolio: Uuid, security: Uuid },
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetId::Payee(id) => write!(f, "payee:{id}"),
            AssetId::Deposit(id) => write!(f, "deposit:{id}"),
            AssetId::Cash(id) => write!(f, "cash:{id}"),
            AssetId::Loan(id) => write!(f, "loan:{id}"),
            AssetId::Portfolio(id) => write!(f, "portfolio:{id}"),
            AssetId::Security(id) => write!(f, "security:{id}"),
            AssetId::Holding { portfolio, security } => {
                write!(f, "holding:{portfolio}/{security}")
            }
        }
    }
}
