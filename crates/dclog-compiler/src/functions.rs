//! The known-function table for arithmetic evaluation.
//!
//! Lookup is by (functor, arity): first the builtin arithmetic table,
//! then the session's extension table. An unknown function is an
//! arithmetic error, not a predicate failure.

use std::collections::HashMap;
use std::rc::Rc;

use dclog_ir::{EvalError, Number};

/// Handler type for extension functions.
pub type ExtraFn = Rc<dyn Fn(&[Number]) -> Result<Number, EvalError>>;

/// Builtin plus session-registered arithmetic functions.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    extras: HashMap<(String, usize), ExtraFn>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an extension function for this session. Shadowed by the
    /// builtin table: builtins are looked up first.
    pub fn register(
        &mut self,
        functor: impl Into<String>,
        arity: usize,
        handler: ExtraFn,
    ) {
        self.extras.insert((functor.into(), arity), handler);
    }

    /// Whether (functor, arity) names a known function.
    pub fn contains(&self, functor: &str, arity: usize) -> bool {
        builtin_supported(functor, arity)
            || self.extras.contains_key(&(functor.to_string(), arity))
    }

    /// Applies a known function to numeric operands.
    pub fn apply(&self, functor: &str, args: &[Number]) -> Result<Number, EvalError> {
        if let Some(result) = apply_builtin(functor, args) {
            return result;
        }
        if let Some(handler) = self.extras.get(&(functor.to_string(), args.len())) {
            return handler(args);
        }
        Err(EvalError::UnknownFunction {
            functor: functor.to_string(),
            arity: args.len(),
        })
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("extras", &self.extras.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn builtin_supported(functor: &str, arity: usize) -> bool {
    matches!(
        (functor, arity),
        ("+", 2)
            | ("-", 2)
            | ("*", 2)
            | ("/", 2)
            | ("//", 2)
            | ("mod", 2)
            | ("**", 2)
            | ("^", 2)
            | ("min", 2)
            | ("max", 2)
            | ("+", 1)
            | ("-", 1)
            | ("abs", 1)
            | ("exp", 1)
            | ("log", 1)
            | ("sqrt", 1)
            | ("sin", 1)
            | ("cos", 1)
            | ("tan", 1)
            | ("floor", 1)
            | ("ceil", 1)
            | ("round", 1)
    )
}

fn apply_builtin(functor: &str, args: &[Number]) -> Option<Result<Number, EvalError>> {
    let result = match (functor, args) {
        ("+", [a, b]) => Ok(a.add(*b)),
        ("-", [a, b]) => Ok(a.sub(*b)),
        ("*", [a, b]) => Ok(a.mul(*b)),
        ("/", [a, b]) => a.div(*b),
        ("//", [a, b]) => a.idiv(*b),
        ("mod", [a, b]) => a.rem(*b),
        ("**", [a, b]) | ("^", [a, b]) => Ok(a.pow(*b)),
        ("min", [a, b]) => Ok(a.min(*b)),
        ("max", [a, b]) => Ok(a.max(*b)),
        ("+", [a]) => Ok(*a),
        ("-", [a]) => Ok(a.neg()),
        ("abs", [a]) => Ok(a.abs()),
        ("exp", [a]) => Ok(a.exp()),
        ("log", [a]) => a.log(),
        ("sqrt", [a]) => a.sqrt(),
        ("sin", [a]) => Ok(a.sin()),
        ("cos", [a]) => Ok(a.cos()),
        ("tan", [a]) => Ok(a.tan()),
        ("floor", [a]) => Ok(a.floor()),
        ("ceil", [a]) => Ok(a.ceil()),
        ("round", [a]) => Ok(a.round()),
        _ => return None,
    };
    Some(result)
}
