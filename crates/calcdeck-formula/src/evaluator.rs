//! Formula evaluator
//!
//! Evaluates formulas against variable bindings to produce numbers.
//!
//! Numeric semantics are plain IEEE-754 double precision: division by zero
//! yields an infinity (or NaN for `0/0`), and non-finite results surface
//! as-is so callers can decide how to present them.

use std::collections::HashMap;
use std::sync::OnceLock;

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use crate::parser::parse;

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

fn function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Named constants resolvable in formulas
static CONSTANTS: Lazy<AHashMap<&'static str, f64>> = Lazy::new(|| {
    let mut constants = AHashMap::new();
    constants.insert("pi", std::f64::consts::PI);
    constants.insert("e", std::f64::consts::E);
    constants.insert("tau", std::f64::consts::TAU);
    constants
});

/// Parse and evaluate a formula against variable bindings
///
/// # Example
/// ```rust
/// use std::collections::HashMap;
/// use calcdeck_formula::evaluate;
///
/// let bindings = HashMap::from([('r', 5.0)]);
/// let area = evaluate("3.14159 * r^2", &bindings).unwrap();
/// assert!((area - 78.53975).abs() < 1e-4);
/// ```
pub fn evaluate(formula: &str, bindings: &HashMap<char, f64>) -> FormulaResult<f64> {
    let expr = parse(formula)?;
    evaluate_expr(&expr, bindings)
}

/// Evaluate an already-parsed expression tree against variable bindings
pub fn evaluate_expr(expr: &Expr, bindings: &HashMap<char, f64>) -> FormulaResult<f64> {
    match expr {
        Expr::Number(n) => Ok(*n),

        Expr::Variable(name) => {
            let value = bindings
                .get(name)
                .copied()
                .ok_or(FormulaError::UnboundVariable(*name))?;
            if !value.is_finite() {
                return Err(FormulaError::NonFiniteBinding { name: *name, value });
            }
            Ok(value)
        }

        Expr::Constant(name) => CONSTANTS
            .get(name.as_str())
            .copied()
            .ok_or_else(|| FormulaError::UnknownConstant(name.clone())),

        Expr::BinaryOp { op, left, right } => {
            let l = evaluate_expr(left, bindings)?;
            let r = evaluate_expr(right, bindings)?;
            Ok(match op {
                BinaryOperator::Add => l + r,
                BinaryOperator::Subtract => l - r,
                BinaryOperator::Multiply => l * r,
                BinaryOperator::Divide => l / r,
                BinaryOperator::Power => l.powf(r),
            })
        }

        Expr::UnaryOp { op, operand } => {
            let value = evaluate_expr(operand, bindings)?;
            Ok(match op {
                UnaryOperator::Negate => -value,
            })
        }

        Expr::Function { name, args } => evaluate_function(name, args, bindings),
    }
}

/// Evaluate a function call
fn evaluate_function(
    name: &str,
    args: &[Expr],
    bindings: &HashMap<char, f64>,
) -> FormulaResult<f64> {
    let registry = function_registry();

    let func = registry
        .get(name)
        .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;

    // Check argument count
    if args.len() < func.min_args {
        return Err(FormulaError::ArgumentCount {
            function: name.to_string(),
            expected: format!("at least {}", func.min_args),
            actual: args.len(),
        });
    }

    if let Some(max) = func.max_args {
        if args.len() > max {
            return Err(FormulaError::ArgumentCount {
                function: name.to_string(),
                expected: format!("at most {max}"),
                actual: args.len(),
            });
        }
    }

    // Evaluate arguments
    let mut evaluated_args = Vec::with_capacity(args.len());
    for arg in args {
        evaluated_args.push(evaluate_expr(arg, bindings)?);
    }

    Ok((func.implementation)(&evaluated_args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(formula: &str) -> FormulaResult<f64> {
        evaluate(formula, &HashMap::new())
    }

    fn eval_with(formula: &str, bindings: &[(char, f64)]) -> FormulaResult<f64> {
        evaluate(formula, &bindings.iter().copied().collect())
    }

    #[test]
    fn test_evaluate_literals() {
        assert_eq!(eval("42").unwrap(), 42.0);
        assert_eq!(eval("3.14").unwrap(), 3.14);
        assert_eq!(eval("-5").unwrap(), -5.0);
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("1+2*3").unwrap(), 7.0);
        assert_eq!(eval("(1+2)*3").unwrap(), 9.0);
        assert_eq!(eval("2^3^2").unwrap(), 512.0);
        assert_eq!(eval("10-4-3").unwrap(), 3.0);
    }

    #[test]
    fn test_evaluate_circle_area() {
        let area = eval_with("3.14159 * r^2", &[('r', 5.0)]).unwrap();
        assert!((area - 78.53975).abs() < 1e-4);
    }

    #[test]
    fn test_evaluate_functions() {
        assert!((eval("sin(0)").unwrap()).abs() < 1e-12);
        assert!((eval("cos(0)").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(eval("sqrt(16)").unwrap(), 4.0);
        assert_eq!(eval("max(1, 7, 3)").unwrap(), 7.0);
        assert_eq!(eval("pow(2, 10)").unwrap(), 1024.0);
    }

    #[test]
    fn test_evaluate_constants() {
        assert!((eval("2*pi").unwrap() - std::f64::consts::TAU).abs() < 1e-12);
        assert!((eval("tau").unwrap() - std::f64::consts::TAU).abs() < 1e-12);
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        let result = eval_with("1/x", &[('x', 0.0)]).unwrap();
        assert!(result.is_infinite());

        // 0/0 is NaN, still not an error
        let result = eval_with("x/x", &[('x', 0.0)]).unwrap();
        assert!(result.is_nan());
    }

    #[test]
    fn test_unbound_variable() {
        assert_eq!(
            eval("x + 1").unwrap_err(),
            FormulaError::UnboundVariable('x')
        );
    }

    #[test]
    fn test_non_finite_binding() {
        let err = eval_with("x + 1", &[('x', f64::NAN)]).unwrap_err();
        assert!(matches!(err, FormulaError::NonFiniteBinding { name: 'x', .. }));
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            eval("frob(1)").unwrap_err(),
            FormulaError::UnknownFunction("frob".into())
        );
    }

    #[test]
    fn test_unknown_constant() {
        assert_eq!(
            eval("phi * 2").unwrap_err(),
            FormulaError::UnknownConstant("phi".into())
        );
    }

    #[test]
    fn test_argument_count() {
        assert!(matches!(
            eval("sqrt(1, 2)").unwrap_err(),
            FormulaError::ArgumentCount { .. }
        ));
        assert!(matches!(
            eval("pow(2)").unwrap_err(),
            FormulaError::ArgumentCount { .. }
        ));
    }

    #[test]
    fn test_evaluate_parse_failure() {
        assert!(matches!(eval("1 +").unwrap_err(), FormulaError::Parse(_)));
    }

    #[test]
    fn test_evaluation_is_pure() {
        let bindings = HashMap::from([('x', 2.0)]);
        let first = evaluate("x^3", &bindings).unwrap();
        let second = evaluate("x^3", &bindings).unwrap();
        assert_eq!(first, second);
    }
}
