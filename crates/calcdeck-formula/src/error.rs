//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Unknown named constant
    #[error("Unknown constant: {0}")]
    UnknownConstant(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Variable referenced by the formula has no bound value
    #[error("Variable '{0}' has no bound value")]
    UnboundVariable(char),

    /// Bound value is NaN or infinite
    #[error("Binding for '{name}' is not a finite number: {value}")]
    NonFiniteBinding { name: char, value: f64 },
}
