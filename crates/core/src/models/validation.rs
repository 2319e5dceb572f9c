use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attribute::AttributeKey;

/// The record an attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerRef {
    Cash(Uuid),
    Deposit(Uuid),
    Portfolio(Uuid),
    TaxYear(i32),
    Transaction(Uuid),
}

impl std::fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerRef::Cash(id) => write!(f, "cash:{id}"),
            OwnerRef::Deposit(id) => write!(f, "deposit:{id}"),
            OwnerRef::Portfolio(id) => write!(f, "portfolio:{id}"),
            OwnerRef::TaxYear(year) => write!(f, "taxyear:{year}"),
            OwnerRef::Transaction(id) => write!(f, "transaction:{id}"),
        }
    }
}

/// Closed vocabulary of attribute validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    Missing,
    ExistsButDisallowed,
    Duplicate,
    Length,
    Negative,
    CurrencyMismatch,
    OrderViolation,
    BadCategoryAssignment,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationErrorKind::Missing => write!(f, "missing"),
            ValidationErrorKind::ExistsButDisallowed => write!(f, "not permitted"),
            ValidationErrorKind::Duplicate => write!(f, "duplicate value"),
            ValidationErrorKind::Length => write!(f, "too long"),
            ValidationErrorKind::Negative => write!(f, "must not be negative"),
            ValidationErrorKind::CurrencyMismatch => write!(f, "currency mismatch"),
            ValidationErrorKind::OrderViolation => write!(f, "out of order"),
            ValidationErrorKind::BadCategoryAssignment => write!(f, "invalid category"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    pub owner: OwnerRef,
    pub attribute: AttributeKey,
    pub kind: ValidationErrorKind,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.owner, self.attribute, self.kind)
    }
}

/// Errors accumulated by a validation pass. An owner is valid only when
/// its report is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, owner: OwnerRef, attribute: impl Into<AttributeKey>, kind: ValidationErrorKind) {
        self.errors.push(ValidationError {
            owner,
            attribute: attribute.into(),
            kind,
        });
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Does the report hold `kind` for `attribute` (on any owner)?
    pub fn has(&self, attribute: impl Into<AttributeKey>, kind: ValidationErrorKind) -> bool {
        let attribute = attribute.into();
        self.errors
            .iter()
            .any(|e| e.attribute == attribute && e.kind == kind)
    }

    pub fn errors_for(&self, owner: OwnerRef) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.owner == owner).collect()
    }
}
