//! Error taxonomy for builtin evaluation.
//!
//! Three failure classes share this enum. Arithmetic errors
//! ([`EvalError::UnknownFunction`], [`EvalError::DivisionByZero`],
//! [`EvalError::DomainError`]) abort the enclosing builtin call and are
//! reportable to the user. Contract violations ([`EvalError::UngroundTerm`],
//! [`EvalError::VectorLengthMismatch`],
//! [`EvalError::MultiDimensionalObservation`]) indicate a bug in the caller
//! or an unsupported program shape. [`EvalError::UnsupportedComparison`]
//! fires unconditionally for `eq`/`ne` over random variables.
//!
//! Ordinary predicate failure is *not* an error: builtins signal it by
//! returning an empty result list.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("unknown function '{functor}'/{arity}")]
    UnknownFunction { functor: String, arity: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic domain error in '{functor}': {message}")]
    DomainError { functor: String, message: String },
    #[error("argument of '{functor}' is not ground: {term}")]
    UngroundTerm { functor: String, term: String },
    #[error("vector lengths do not match (lhs: {expected}, rhs: {actual})")]
    VectorLengthMismatch { expected: usize, actual: usize },
    #[error("cannot observe a {dimensions}-dimensional random variable; only scalar observations are supported")]
    MultiDimensionalObservation { dimensions: usize },
    #[error("comparison '{functor}' is not supported over random variables")]
    UnsupportedComparison { functor: String },
}

impl EvalError {
    /// True for the contract-violation class: caller bugs, not runtime
    /// conditions a program should handle.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            EvalError::UngroundTerm { .. }
                | EvalError::VectorLengthMismatch { .. }
                | EvalError::MultiDimensionalObservation { .. }
        )
    }
}
