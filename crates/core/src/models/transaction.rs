use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::AssetId;
use super::attribute::{AttributeSet, TransactionInfoClass};
use super::money::Money;

/// Which way value moves relative to the primary account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// From the account to the partner
    To,
    /// From the partner into the account
    From,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::To => Direction::From,
            Direction::From => Direction::To,
        }
    }

    pub fn is_to(self) -> bool {
        self == Direction::To
    }

    pub fn is_from(self) -> bool {
        self == Direction::From
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::To => write!(f, "To"),
            Direction::From => write!(f, "From"),
        }
    }
}

/// A single money movement between an account and a partner.
///
/// Account and partner are ids resolved through the `Workspace`; they are
/// equal only for the self-referencing events the rules permit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: Money,
    pub account: AssetId,
    pub partner: AssetId,
    pub category: Uuid,
    pub direction: Direction,
    #[serde(default)]
    pub info: AttributeSet<TransactionInfoClass>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Money,
        account: AssetId,
        partner: AssetId,
        category: Uuid,
        direction: Direction,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            account,
            partner,
            category,
            direction,
            info: AttributeSet::new(),
        }
    }

    pub fn is_self_referencing(&self) -> bool {
        self.account == self.partner
    }
}
