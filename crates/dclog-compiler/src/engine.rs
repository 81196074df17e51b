//! The seam to the host grounding engine.
//!
//! The engine owns unification and clause resolution; this layer only
//! needs its "ground this goal" service. Grounding is re-entrant: while
//! resolving a nested sub-goal the engine may call back into
//! [`evaluate_term`](crate::eval::evaluate_term), so the call shape is
//! ordinary recursion through the host, not a scheduler.

use anyhow::Result;

use dclog_ir::{Distribution, Term};

use crate::circuit::{CircuitNode, WeightedCircuit};
use crate::functions::FunctionRegistry;

/// One way a distribution goal grounded: the grounded variable term, its
/// resolved distribution description, and the circuit node guarding the
/// grounding. `distribution` is `None` for a deliberately-unset density.
#[derive(Clone, Debug)]
pub struct Grounding {
    pub variable: Term,
    pub distribution: Option<Distribution>,
    pub node: CircuitNode,
}

impl Grounding {
    pub fn new(variable: Term, distribution: Distribution, node: CircuitNode) -> Self {
        Grounding {
            variable,
            distribution: Some(distribution),
            node,
        }
    }

    /// A grounding whose density was deliberately left undefined.
    pub fn unset(variable: Term, node: CircuitNode) -> Self {
        Grounding {
            variable,
            distribution: None,
            node,
        }
    }
}

/// The host grounding engine.
///
/// `ground` instantiates `goal` against `database`, growing `target` with
/// whatever choice structure the clauses introduce, and returns every
/// resulting distribution grounding in order. Implementations may re-enter
/// the evaluator while grounding.
pub trait Grounder {
    type Database;

    fn ground(
        &mut self,
        database: &Self::Database,
        goal: &Term,
        target: &mut WeightedCircuit,
        subcall: bool,
    ) -> Result<Vec<Grounding>>;
}

/// The implicit "draw from distribution" goal for a term: `~(term, D)`.
pub fn distribution_goal(term: &Term) -> Term {
    Term::compound("~", vec![term.clone(), Term::var("Distribution")])
}

/// Recognized-options bag threaded through every builtin call.
///
/// Forwarded, not interpreted, beyond the two knobs this core reads: the
/// mode-checking flag and the function table for `is/2` evaluation.
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Whether this call is already a grounding sub-call.
    pub subcall: bool,
    /// Enforce ground-argument modes on builtin entry.
    pub mode_check: bool,
    /// Arithmetic function table, including session-registered extras.
    pub functions: FunctionRegistry,
}

impl EvalConfig {
    pub fn new() -> Self {
        EvalConfig {
            subcall: false,
            mode_check: true,
            functions: FunctionRegistry::new(),
        }
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::new()
    }
}
