//! # calcdeck-formula
//!
//! Formula parser and evaluator for calcdeck.
//!
//! This crate provides:
//! - Formula parsing (text → AST)
//! - Free-variable extraction (AST → sorted variable names)
//! - Formula evaluation (AST + bindings → number)
//! - Built-in math functions and constants
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use calcdeck_formula::{evaluate, extract_variables};
//!
//! assert_eq!(extract_variables("3.14159 * r^2"), vec!['r']);
//!
//! let bindings = HashMap::from([('r', 5.0)]);
//! let area = evaluate("3.14159 * r^2", &bindings).unwrap();
//! assert!((area - 78.53975).abs() < 1e-4);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod extract;
pub mod functions;
pub mod parser;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, evaluate_expr};
pub use extract::{extract_variables, try_extract_variables, variables_of};
pub use parser::parse;
