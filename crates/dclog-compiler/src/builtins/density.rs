//! Compilation of `query_density/1`: direct marginal density queries.

use std::rc::Rc;

use anyhow::Result;
use indexmap::IndexMap;

use dclog_ir::{Mixture, RandomVariableConstant, Term};

use crate::circuit::{CircuitNode, WeightedCircuit};
use crate::engine::{distribution_goal, EvalConfig, Grounder};
use crate::resolve::resolve_distribution;

/// `query_density(term)`
///
/// Grounds the term's distribution goal and buckets the live groundings
/// by their grounded variable term, in grounding order. Each bucket
/// becomes one [`Mixture`]. Density queries are definitional, not
/// conditioned, so every mixture is paired with vacuous support.
pub fn builtin_query_density<G: Grounder>(
    term: &Term,
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    _config: &EvalConfig,
) -> Result<Vec<(Mixture, CircuitNode)>> {
    let goal = distribution_goal(term);
    let groundings = engine.ground(database, &goal, target, false)?;

    // Keyed by the grounding's variable term, not its density name.
    let mut buckets: IndexMap<String, (Term, Vec<Rc<RandomVariableConstant>>)> = IndexMap::new();
    for grounding in &groundings {
        let (value, _node) = resolve_distribution(grounding, target)?;
        let Some(handle) = value else {
            continue;
        };
        buckets
            .entry(grounding.variable.to_string())
            .or_insert_with(|| (grounding.variable.clone(), Vec::new()))
            .1
            .push(handle);
    }

    Ok(buckets
        .into_values()
        .map(|(origin, components)| (Mixture::new(origin, components), CircuitNode::True))
        .collect())
}
