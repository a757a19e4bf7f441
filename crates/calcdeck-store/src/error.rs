//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations
///
/// "Not found" is not an error: lookups return `Option` and delete returns
/// whether a record was removed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or empty
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// The submitted formula does not parse
    #[error("invalid formula: {0}")]
    InvalidFormula(#[from] calcdeck_formula::FormulaError),

    /// IO failure reading or writing the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document serialization failure
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}
