use thiserror::Error;

/// Unified error type for the entire recordkeeper-core library.
///
/// Legality checks answer with `bool` and validation findings are collected
/// in a `ValidationReport`; only malformed identifiers, value coercion and
/// workspace resolution end up here.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Classification ──────────────────────────────────────────────
    #[error("Invalid class id for {kind}: {id}")]
    InvalidClassId { kind: &'static str, id: i32 },

    #[error("Invalid currency code '{0}': must be exactly 3 ASCII letters")]
    InvalidCurrency(String),

    // ── Workspace resolution ────────────────────────────────────────
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Transaction category not found: {0}")]
    CategoryNotFound(String),

    #[error("Tax year not found: {0}")]
    TaxYearNotFound(i32),

    #[error("Tax year already exists: {0}")]
    TaxYearExists(i32),

    // ── Attribute values ────────────────────────────────────────────
    #[error("Attribute {class} expects a {expected} value")]
    AttributeTypeMismatch { class: String, expected: String },

    #[error("Exchange rate not available from {from} to {to}")]
    RateNotAvailable { from: String, to: String },

    // ── Serialization / ambient ─────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
