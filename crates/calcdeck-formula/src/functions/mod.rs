//! Built-in formula functions

pub mod math;

use ahash::AHashMap;

/// Function implementation signature
///
/// All built-ins are pure numeric functions; arity is enforced by the
/// evaluator before the call, so implementations may index their arguments.
pub type FunctionImpl = fn(&[f64]) -> f64;

/// Function definition
pub struct FunctionDef {
    /// Function name (lowercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

/// Function registry
pub struct FunctionRegistry {
    functions: AHashMap<&'static str, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: AHashMap::new(),
        };

        registry.register_math_functions();

        registry
    }

    /// Look up a function by name
    ///
    /// Names are matched exactly: built-ins are lowercase.
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name, def);
    }

    fn register_math_functions(&mut self) {
        // Fixed single-argument functions
        for (name, implementation) in [
            ("sqrt", math::fn_sqrt as FunctionImpl),
            ("cbrt", math::fn_cbrt),
            ("abs", math::fn_abs),
            ("sign", math::fn_sign),
            ("floor", math::fn_floor),
            ("ceil", math::fn_ceil),
            ("round", math::fn_round),
            ("exp", math::fn_exp),
            ("log", math::fn_log),
            ("log10", math::fn_log10),
            ("log2", math::fn_log2),
            ("sin", math::fn_sin),
            ("cos", math::fn_cos),
            ("tan", math::fn_tan),
            ("asin", math::fn_asin),
            ("acos", math::fn_acos),
            ("atan", math::fn_atan),
            ("sinh", math::fn_sinh),
            ("cosh", math::fn_cosh),
            ("tanh", math::fn_tanh),
        ] {
            self.register(FunctionDef {
                name,
                min_args: 1,
                max_args: Some(1),
                implementation,
            });
        }

        // pow
        self.register(FunctionDef {
            name: "pow",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_pow,
        });

        // atan2
        self.register(FunctionDef {
            name: "atan2",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_atan2,
        });

        // hypot
        self.register(FunctionDef {
            name: "hypot",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_hypot,
        });

        // min (variadic)
        self.register(FunctionDef {
            name: "min",
            min_args: 1,
            max_args: None,
            implementation: math::fn_min,
        });

        // max (variadic)
        self.register(FunctionDef {
            name: "max",
            min_args: 1,
            max_args: None,
            implementation: math::fn_max,
        });
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("sqrt").is_some());
        assert!(registry.get("atan2").is_some());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("SQRT").is_none());
    }

    #[test]
    fn test_arity_bounds() {
        let registry = FunctionRegistry::new();

        let sqrt = registry.get("sqrt").unwrap();
        assert_eq!(sqrt.min_args, 1);
        assert_eq!(sqrt.max_args, Some(1));

        let min = registry.get("min").unwrap();
        assert_eq!(min.min_args, 1);
        assert_eq!(min.max_args, None);
    }
}
