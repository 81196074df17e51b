//! Argument evaluation: terms to (value, support) alternatives.
//!
//! Every evaluated value carries the circuit node whose truth is required
//! for the value to exist. Supports are conjoined whenever values are
//! composed and are never dropped.

use anyhow::Result;
use tracing::trace;

use dclog_ir::{EvalError, Number, SymbolicConstant, Term, Value};

use crate::circuit::{CircuitNode, WeightedCircuit};
use crate::engine::{distribution_goal, EvalConfig, Grounder};
use crate::resolve::resolve_distribution;

/// One alternative resolution of a term: a value (or `None` when the
/// grounding has no defined density) plus its support node.
#[derive(Clone, Debug)]
pub struct Evaluated {
    pub value: Option<Value>,
    pub support: CircuitNode,
}

impl Evaluated {
    /// A value with vacuous support (the `0` sentinel).
    pub fn unconditional(value: Value) -> Self {
        Evaluated {
            value: Some(value),
            support: CircuitNode::True,
        }
    }
}

/// Resolves a term into every (value, support) alternative it currently
/// has.
///
/// Dispatch is by term shape: numeric constants and already-evaluated
/// values pass through with vacuous support; applications of known
/// functions go through [`apply_function`]; anything else must denote a
/// random variable and is grounded through the host engine as a re-entrant
/// sub-call, one alternative per grounding.
///
/// An unground term on the random-variable path is a contract violation.
/// A compound term that neither names a known function nor grounds to any
/// distribution is an unknown function.
pub fn evaluate_term<G: Grounder>(
    term: &Term,
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    config: &EvalConfig,
) -> Result<Vec<Evaluated>> {
    match term {
        Term::Int(i) => Ok(vec![Evaluated::unconditional(Value::int(*i))]),
        Term::Float(x) => Ok(vec![Evaluated::unconditional(Value::float(*x))]),
        Term::Value(value) => Ok(vec![Evaluated::unconditional(value.clone())]),
        Term::Compound { functor, args } if config.functions.contains(functor, args.len()) => {
            apply_function(functor, args, engine, target, database, config)
        }
        _ => {
            if !term.is_ground() {
                return Err(EvalError::UngroundTerm {
                    functor: "~".to_string(),
                    term: term.to_string(),
                }
                .into());
            }
            let goal = distribution_goal(term);
            trace!(goal = %goal, "grounding distribution sub-call");
            let groundings = engine.ground(database, &goal, target, true)?;
            if groundings.is_empty() {
                if let Term::Compound { functor, args } = term {
                    // A ground compound that grounds to nothing was an
                    // unregistered function call, not a failed predicate.
                    return Err(EvalError::UnknownFunction {
                        functor: functor.clone(),
                        arity: args.len(),
                    }
                    .into());
                }
            }
            let mut alternatives = Vec::with_capacity(groundings.len());
            for grounding in &groundings {
                let (value, node) = resolve_distribution(grounding, target)?;
                alternatives.push(Evaluated {
                    value: value.map(Value::Random),
                    support: node,
                });
            }
            Ok(alternatives)
        }
    }
}

/// Applies a known arithmetic/Boolean function across the Cartesian
/// product of its arguments' alternatives.
///
/// Each combination's support is the conjunction of the chosen
/// per-argument supports (vacuous supports omitted). All-numeric
/// combinations are computed eagerly; a combination with any symbolic
/// operand produces a residual [`SymbolicConstant`] with the unioned
/// free-variable set. Arithmetic errors abort the whole call.
pub fn apply_function<G: Grounder>(
    functor: &str,
    args: &[Term],
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    config: &EvalConfig,
) -> Result<Vec<Evaluated>> {
    if !config.functions.contains(functor, args.len()) {
        return Err(EvalError::UnknownFunction {
            functor: functor.to_string(),
            arity: args.len(),
        }
        .into());
    }

    let mut per_arg = Vec::with_capacity(args.len());
    for arg in args {
        per_arg.push(evaluate_term(arg, engine, target, database, config)?);
    }

    let mut results = Vec::new();
    for combination in cartesian_product(&per_arg) {
        let supports: Vec<CircuitNode> = combination.iter().map(|e| e.support).collect();
        let support = target.add_and(&supports);

        let values: Option<Vec<Value>> = combination.iter().map(|e| e.value.clone()).collect();
        let value = match values {
            // An undefined operand makes the whole combination undefined.
            None => None,
            Some(values) => Some(apply_to_values(functor, values, config)?),
        };
        results.push(Evaluated { value, support });
    }
    Ok(results)
}

/// Applies the function to one combination of argument values.
fn apply_to_values(functor: &str, values: Vec<Value>, config: &EvalConfig) -> Result<Value> {
    let numbers: Option<Vec<Number>> = values.iter().map(Value::as_number).collect();
    match numbers {
        Some(numbers) => {
            let result = config.functions.apply(functor, &numbers)?;
            Ok(Value::Num(result))
        }
        None => Ok(Value::Symbolic(SymbolicConstant::new(functor, values))),
    }
}

/// Every combination of one element per input list. An empty input list
/// anywhere yields an empty product.
fn cartesian_product<'a>(lists: &'a [Vec<Evaluated>]) -> Vec<Vec<&'a Evaluated>> {
    let mut product: Vec<Vec<&Evaluated>> = vec![Vec::new()];
    for list in lists {
        let mut next = Vec::with_capacity(product.len() * list.len());
        for prefix in &product {
            for item in list {
                let mut extended = prefix.clone();
                extended.push(item);
                next.push(extended);
            }
        }
        product = next;
    }
    product
}
