//! # calcdeck
//!
//! Define, store, and evaluate named arithmetic formulas.
//!
//! A calculator is a titled formula whose free variables (single lowercase
//! letters) are detected automatically when the record is written. Stored
//! calculators can later be evaluated against caller-supplied numeric
//! bindings.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use calcdeck::prelude::*;
//!
//! let store = CalculatorStore::open(StoreConfig::new("calculators.json"));
//!
//! let record = store.create(
//!     CalculatorDraft::new("Circle area", "3.14159*r^2").with_label('r', "Radius"),
//! )?;
//! assert_eq!(record.variables, vec!['r']);
//!
//! let bindings = HashMap::from([('r', 5.0)]);
//! let area = record.evaluate_with(&bindings)?;
//! assert!((area - 78.53975).abs() < 1e-4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod calculation;
pub mod prelude;

pub use calculation::CalculatorEvalExt;

// Re-export formula types
pub use calcdeck_formula::{
    evaluate, evaluate_expr, extract_variables, parse, try_extract_variables, variables_of,
    BinaryOperator, Expr, FormulaError, FormulaResult, UnaryOperator,
};

// Re-export store types
pub use calcdeck_store::{
    Calculator, CalculatorDraft, CalculatorStore, StoreConfig, StoreError, StoreResult, Uuid,
};
