use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};
use uuid::Uuid;

use super::asset::AssetId;
use super::money::Money;
use crate::errors::CoreError;

/// Whether an optional attribute must, may, or must not be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementState {
    MustExist,
    CanExist,
    NotAllowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay)]
pub enum AttributeDataType {
    Text,
    Money,
    Rate,
    Units,
    Ratio,
    Date,
    PayeeLink,
    CategoryLink,
    AssetLink,
    Tags,
}

/// Value of one extension attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Text(String),
    Money(Money),
    Rate(Decimal),
    Units(Decimal),
    Ratio(Decimal),
    Date(NaiveDate),
    Payee(Uuid),
    Category(Uuid),
    Asset(AssetId),
    Tags(Vec<String>),
}

impl AttributeValue {
    pub fn data_type(&self) -> AttributeDataType {
        match self {
            AttributeValue::Text(_) => AttributeDataType::Text,
            AttributeValue::Money(_) => AttributeDataType::Money,
            AttributeValue::Rate(_) => AttributeDataType::Rate,
            AttributeValue::Units(_) => AttributeDataType::Units,
            AttributeValue::Ratio(_) => AttributeDataType::Ratio,
            AttributeValue::Date(_) => AttributeDataType::Date,
            AttributeValue::Payee(_) => AttributeDataType::PayeeLink,
            AttributeValue::Category(_) => AttributeDataType::CategoryLink,
            AttributeValue::Asset(_) => AttributeDataType::AssetLink,
            AttributeValue::Tags(_) => AttributeDataType::Tags,
        }
    }

    /// Numeric payload for the value kinds that have one.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            AttributeValue::Money(m) => Some(m.amount),
            AttributeValue::Rate(d) | AttributeValue::Units(d) | AttributeValue::Ratio(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_money(&self) -> Option<&Money> {
        match self {
            AttributeValue::Money(m) => Some(m),
            _ => None,
        }
    }
}

/// An attribute class scoped to one owner kind.
pub trait AttributeClass:
    Copy + Eq + Ord + Hash + Debug + Display + IntoEnumIterator + Into<AttributeKey>
{
    fn data_type(self) -> AttributeDataType;

    /// Ceiling for text values, in characters.
    fn max_length(self) -> Option<usize> {
        None
    }

    fn allows_negative(self) -> bool {
        false
    }
}

/// Optional fields of cash, deposit and portfolio accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, StrumDisplay)]
pub enum AccountInfoClass {
    Maturity,
    OpeningBalance,
    AutoExpense,
    AutoPayee,
    SortCode,
    Account,
    Reference,
    WebSite,
    CustomerNo,
    UserId,
    Password,
    Notes,
}

impl AttributeClass for AccountInfoClass {
    fn data_type(self) -> AttributeDataType {
        match self {
            AccountInfoClass::Maturity => AttributeDataType::Date,
            AccountInfoClass::OpeningBalance => AttributeDataType::Money,
            AccountInfoClass::AutoExpense => AttributeDataType::CategoryLink,
            AccountInfoClass::AutoPayee => AttributeDataType::PayeeLink,
            AccountInfoClass::SortCode
            | AccountInfoClass::Account
            | AccountInfoClass::Reference
            | AccountInfoClass::WebSite
            | AccountInfoClass::CustomerNo
            | AccountInfoClass::UserId
            | AccountInfoClass::Password
            | AccountInfoClass::Notes => AttributeDataType::Text,
        }
    }

    fn max_length(self) -> Option<usize> {
        match self {
            AccountInfoClass::SortCode
            | AccountInfoClass::Account
            | AccountInfoClass::Reference
            | AccountInfoClass::CustomerNo
            | AccountInfoClass::UserId
            | AccountInfoClass::Password => Some(20),
            AccountInfoClass::WebSite => Some(50),
            AccountInfoClass::Notes => Some(500),
            AccountInfoClass::Maturity
            | AccountInfoClass::OpeningBalance
            | AccountInfoClass::AutoExpense
            | AccountInfoClass::AutoPayee => None,
        }
    }

    // Opening balances may be overdrawn.
    fn allows_negative(self) -> bool {
        self == AccountInfoClass::OpeningBalance
    }
}

/// Allowances, bands and rates of a tax year.
///
/// Declaration order matters: defaults copied from a sibling rate expect
/// the sibling to come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, StrumDisplay)]
pub enum TaxYearInfoClass {
    LoAllowance,
    LoAgeAllowance,
    HiAgeAllowance,
    AgeAllowanceLimit,
    AddAllowanceLimit,
    AddIncomeThreshold,
    CapitalAllowance,
    LoTaxBand,
    BasicTaxBand,
    LoTaxRate,
    BasicTaxRate,
    HiTaxRate,
    AddTaxRate,
    IntTaxRate,
    DivTaxRate,
    HiDivTaxRate,
    AddDivTaxRate,
    CapTaxRate,
    HiCapTaxRate,
}

impl AttributeClass for TaxYearInfoClass {
    fn data_type(self) -> AttributeDataType {
        use TaxYearInfoClass::*;
        match self {
            LoAllowance | LoAgeAllowance | HiAgeAllowance | AgeAllowanceLimit
            | AddAllowanceLimit | AddIncomeThreshold | CapitalAllowance | LoTaxBand
            | BasicTaxBand => AttributeDataType::Money,
            LoTaxRate | BasicTaxRate | HiTaxRate | AddTaxRate | IntTaxRate | DivTaxRate
            | HiDivTaxRate | AddDivTaxRate | CapTaxRate | HiCapTaxRate => AttributeDataType::Rate,
        }
    }
}

/// Extension fields of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, StrumDisplay)]
pub enum TransactionInfoClass {
    TaxCredit,
    EmployerNatIns,
    EmployeeNatIns,
    DeemedBenefit,
    Withheld,
    AccountDeltaUnits,
    PartnerDeltaUnits,
    Dilution,
    ReturnedCash,
    ReturnedCashAccount,
    PartnerAmount,
    Reference,
    Comments,
    Tags,
}

impl AttributeClass for TransactionInfoClass {
    fn data_type(self) -> AttributeDataType {
        use TransactionInfoClass::*;
        match self {
            TaxCredit | EmployerNatIns | EmployeeNatIns | DeemedBenefit | Withheld
            | ReturnedCash | PartnerAmount => AttributeDataType::Money,
            AccountDeltaUnits | PartnerDeltaUnits => AttributeDataType::Units,
            Dilution => AttributeDataType::Ratio,
            ReturnedCashAccount => AttributeDataType::AssetLink,
            Reference | Comments => AttributeDataType::Text,
            Tags => AttributeDataType::Tags,
        }
    }

    fn max_length(self) -> Option<usize> {
        match self {
            TransactionInfoClass::Reference => Some(20),
            TransactionInfoClass::Comments => Some(50),
            _ => None,
        }
    }

    // Unit deltas move holdings in either direction.
    fn allows_negative(self) -> bool {
        matches!(
            self,
            TransactionInfoClass::AccountDeltaUnits | TransactionInfoClass::PartnerDeltaUnits
        )
    }
}

/// Attribute class of any owner kind, used to key validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKey {
    Account(AccountInfoClass),
    TaxYear(TaxYearInfoClass),
    Transaction(TransactionInfoClass),
}

impl From<AccountInfoClass> for AttributeKey {
    fn from(c: AccountInfoClass) -> Self {
        AttributeKey::Account(c)
    }
}

impl From<TaxYearInfoClass> for AttributeKey {
    fn from(c: TaxYearInfoClass) -> Self {
        AttributeKey::TaxYear(c)
    }
}

impl From<TransactionInfoClass> for AttributeKey {
    fn from(c: TransactionInfoClass) -> Self {
        AttributeKey::Transaction(c)
    }
}

impl Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeKey::Account(c) => write!(f, "{c}"),
            AttributeKey::TaxYear(c) => write!(f, "{c}"),
            AttributeKey::Transaction(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub value: AttributeValue,
    /// Marked for removal by an edit that has not been committed yet.
    #[serde(default)]
    pub deleted: bool,
}

/// The extension attributes of one owner, keyed by class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C: Serialize",
    deserialize = "C: Deserialize<'de> + Ord"
))]
pub struct AttributeSet<C> {
    entries: BTreeMap<C, AttributeEntry>,
}

impl<C> Default for AttributeSet<C> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<C: AttributeClass> AttributeSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live value of `class`; deleted entries read as absent.
    pub fn get(&self, class: C) -> Option<&AttributeValue> {
        self.entries
            .get(&class)
            .filter(|e| !e.deleted)
            .map(|e| &e.value)
    }

    pub fn is_present(&self, class: C) -> bool {
        self.get(class).is_some()
    }

    /// Set or replace a value. The value kind must match the class.
    pub fn set(&mut self, class: C, value: AttributeValue) -> Result<(), CoreError> {
        let expected = class.data_type();
        if value.data_type() != expected {
            return Err(CoreError::AttributeTypeMismatch {
                class: class.to_string(),
                expected: expected.to_string(),
            });
        }
        self.entries.insert(
            class,
            AttributeEntry {
                value,
                deleted: false,
            },
        );
        Ok(())
    }

    pub fn remove(&mut self, class: C) -> Option<AttributeValue> {
        self.entries.remove(&class).map(|e| e.value)
    }

    /// Flag an entry as deleted without dropping it. Returns false if absent.
    pub fn mark_deleted(&mut self, class: C) -> bool {
        match self.entries.get_mut(&class) {
            Some(entry) => {
                entry.deleted = true;
                true
            }
            None => false,
        }
    }

    /// Raw entry lookup, including deleted ones.
    pub fn entry(&self, class: C) -> Option<&AttributeEntry> {
        self.entries.get(&class)
    }

    pub fn iter(&self) -> impl Iterator<Item = (C, &AttributeValue)> {
        self.entries
            .iter()
            .filter(|(_, e)| !e.deleted)
            .map(|(c, e)| (*c, &e.value))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
