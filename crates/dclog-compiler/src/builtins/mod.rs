//! The builtin predicates exposed to the host engine.
//!
//! Every entry point shares the shape
//! `(args…, engine, target, database, config) -> result list`: one
//! `(resolved args, node)` pair per alternative. An empty list is
//! ordinary predicate failure; errors abort the whole call.

mod assign;
mod compare;
mod density;
mod observation;

use anyhow::Result;

use dclog_ir::{EvalError, Term};

use crate::circuit::CircuitNode;
use crate::engine::EvalConfig;

pub use assign::builtin_is;
pub use compare::{
    builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt, builtin_ne, CompareOp,
};
pub use density::builtin_query_density;
pub use observation::builtin_observation;

/// Result shape shared by the two-argument builtins.
pub type BuiltinResult = Vec<((Term, Term), CircuitNode)>;

/// Name/arity of every predicate this module exports, for host-side
/// registration.
pub fn builtin_signatures() -> &'static [(&'static str, usize)] {
    &[
        ("is", 2),
        ("<", 2),
        (">", 2),
        ("=<", 2),
        (">=", 2),
        ("observation", 2),
        ("query_density", 1),
    ]
}

/// Mode check: the builtin requires this argument to be ground.
pub(crate) fn require_ground(functor: &str, term: &Term, config: &EvalConfig) -> Result<()> {
    if config.mode_check && !term.is_ground() {
        return Err(EvalError::UngroundTerm {
            functor: functor.to_string(),
            term: term.to_string(),
        }
        .into());
    }
    Ok(())
}
