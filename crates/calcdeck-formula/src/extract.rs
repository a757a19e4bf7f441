//! Free-variable extraction
//!
//! One shared traversal drives both policies: the fail-hard wrapper used when
//! validating new formulas, and the fail-soft wrapper used when re-deriving
//! from formulas that were already validated at write time.

use std::collections::BTreeSet;

use crate::ast::Expr;
use crate::error::FormulaResult;
use crate::parser::parse;

/// Extract the free variables of a formula, failing on parse errors.
///
/// The result is sorted ascending and duplicate-free. Function and constant
/// names never contribute, only bare single-lowercase-letter identifiers.
pub fn try_extract_variables(formula: &str) -> FormulaResult<Vec<char>> {
    let expr = parse(formula)?;
    Ok(variables_of(&expr))
}

/// Extract the free variables of a formula, treating parse failure as "no
/// variables".
///
/// Intended for read paths over stored formulas, which were validated when
/// written. Write paths must use [`try_extract_variables`] instead so that a
/// malformed formula blocks the write.
pub fn extract_variables(formula: &str) -> Vec<char> {
    match try_extract_variables(formula) {
        Ok(variables) => variables,
        Err(err) => {
            log::debug!("formula failed to parse, yielding no variables: {err}");
            Vec::new()
        }
    }
}

/// Collect the free variables of an already-parsed expression tree.
pub fn variables_of(expr: &Expr) -> Vec<char> {
    let mut seen = BTreeSet::new();
    expr.walk(&mut |node| {
        if let Expr::Variable(name) = node {
            seen.insert(*name);
        }
    });
    seen.into_iter().collect()
}
