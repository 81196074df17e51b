//! Compilation of `observation/2`: conditioning a random variable on a
//! concrete value.
//!
//! The produced atom carries an `observation(handle, value)` payload; the
//! actual density weight is computed later by the numeric backend, never
//! here. Observation atoms are per-occurrence: their identifier derives
//! from the density name, not from the payload's structure.

use std::rc::Rc;

use anyhow::Result;
use tracing::debug;

use dclog_ir::{EvalError, SymbolicConstant, Term, Value};

use crate::circuit::{CircuitNode, WeightedCircuit};
use crate::engine::{distribution_goal, EvalConfig, Grounder};
use crate::resolve::resolve_distribution;

use super::BuiltinResult;

/// `observation(term, value)`
///
/// Grounds the variable's distribution goal; per grounding, builds one
/// observation atom conjoined with the grounding's support, then ORs the
/// per-grounding nodes together. Groundings whose density is deliberately
/// unset contribute nothing. Only scalar variables may be observed.
pub fn builtin_observation<G: Grounder>(
    term: &Term,
    observed: &Term,
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    _config: &EvalConfig,
) -> Result<BuiltinResult> {
    let goal = distribution_goal(term);
    let groundings = engine.ground(database, &goal, target, false)?;

    let mut observation_node: Option<CircuitNode> = None;
    for grounding in &groundings {
        let (value, node) = resolve_distribution(grounding, target)?;
        let Some(handle) = value else {
            // Unset density: excluded from the disjunction.
            continue;
        };
        if !handle.is_scalar() {
            return Err(EvalError::MultiDimensionalObservation {
                dimensions: handle.dimensions,
            }
            .into());
        }

        let observed_value = target.create_ast_representation(observed)?;
        let identifier = format!("observation_of({})", handle.density_name);
        let weight = SymbolicConstant::new(
            "observation",
            vec![Value::Random(Rc::clone(&handle)), observed_value],
        );
        debug!(identifier = %identifier, "observation atom");

        let atom = target.add_atom(identifier, weight);
        let per_grounding = target.add_and(&[atom, node]);
        observation_node = Some(match observation_node {
            None => per_grounding,
            Some(previous) => target.add_or(&[previous, per_grounding]),
        });
    }

    // With no contributing grounding the observation constrains nothing.
    let node = observation_node.unwrap_or(CircuitNode::True);
    Ok(vec![((term.clone(), observed.clone()), node)])
}
