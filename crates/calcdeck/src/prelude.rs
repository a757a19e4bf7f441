//! Convenience re-exports of the most commonly used types

pub use crate::calculation::CalculatorEvalExt;
pub use calcdeck_formula::{
    evaluate, extract_variables, parse, try_extract_variables, FormulaError, FormulaResult,
};
pub use calcdeck_store::{
    Calculator, CalculatorDraft, CalculatorStore, StoreConfig, StoreError, StoreResult, Uuid,
};
