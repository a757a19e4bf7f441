//! Evaluation of stored calculator records

use std::collections::HashMap;

use calcdeck_formula::{evaluate, FormulaResult};
use calcdeck_store::Calculator;

/// Extension trait evaluating a stored record against variable bindings
pub trait CalculatorEvalExt {
    /// Evaluate the record's formula against the given bindings
    ///
    /// Fails if a free variable is unbound or a binding is non-finite. A
    /// non-finite *result* (e.g. division by zero) is returned as-is; treating
    /// it as "incomplete input" is up to the caller.
    fn evaluate_with(&self, bindings: &HashMap<char, f64>) -> FormulaResult<f64>;

    /// The record's variables that have no entry in `bindings`
    fn missing_bindings(&self, bindings: &HashMap<char, f64>) -> Vec<char>;
}

impl CalculatorEvalExt for Calculator {
    fn evaluate_with(&self, bindings: &HashMap<char, f64>) -> FormulaResult<f64> {
        evaluate(&self.formula, bindings)
    }

    fn missing_bindings(&self, bindings: &HashMap<char, f64>) -> Vec<char> {
        self.variables
            .iter()
            .copied()
            .filter(|v| !bindings.contains_key(v))
            .collect()
    }
}
