//! The distribution resolver: grounding occurrence to canonical handle.

use std::rc::Rc;

use anyhow::Result;
use dclog_ir::{RandomVariableConstant, Value};

use crate::circuit::{CircuitNode, WeightedCircuit};
use crate::engine::Grounding;

/// Resolves one grounding of a random variable to its canonical handle.
///
/// The handle is memoized under the grounding's density name in the
/// circuit's session cache: resolving the same (variable, node) pair twice
/// returns the identical `Rc`, never a fresh copy. A grounding with an
/// undefined distribution resolves to `None`.
pub fn resolve_distribution(
    grounding: &Grounding,
    target: &mut WeightedCircuit,
) -> Result<(Option<Rc<RandomVariableConstant>>, CircuitNode)> {
    let Some(distribution) = &grounding.distribution else {
        return Ok((None, grounding.node));
    };

    let density_name = target.get_density_name(&grounding.variable, grounding.node);
    if let Some(cached) = target.density_values.get(&density_name) {
        return Ok((Some(Rc::clone(cached)), grounding.node));
    }

    let args = distribution
        .args
        .iter()
        .map(|arg| target.create_ast_representation(arg))
        .collect::<Result<Vec<Value>, _>>()?;
    let handle = Rc::new(RandomVariableConstant::new(
        distribution.functor.clone(),
        args,
        density_name.clone(),
        distribution.dimensions,
    ));
    tracing::debug!(density = %density_name, functor = %distribution.functor, "new density");
    target
        .density_values
        .insert(density_name, Rc::clone(&handle));
    Ok((Some(handle), grounding.node))
}
