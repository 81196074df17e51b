//! Compilation of `is/2`: unify the left operand with the evaluated
//! right-hand side.

use anyhow::Result;

use dclog_ir::{EvalError, Number, Term, Value};

use crate::circuit::WeightedCircuit;
use crate::engine::{EvalConfig, Grounder};
use crate::eval::evaluate_term;

use super::{require_ground, BuiltinResult};

/// `lhs is rhs`
///
/// The right-hand side must be ground. Every alternative with a defined
/// value yields one result pairing the resolved left term with the
/// alternative's support; undefined alternatives are skipped. Zero
/// alternatives is ordinary predicate failure, an empty result list.
pub fn builtin_is<G: Grounder>(
    lhs: &Term,
    rhs: &Term,
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    config: &EvalConfig,
) -> Result<BuiltinResult> {
    require_ground("is", rhs, config)?;

    let alternatives = evaluate_term(rhs, engine, target, database, config)?;
    let mut results = Vec::with_capacity(alternatives.len());
    for alternative in alternatives {
        let Some(value) = alternative.value else {
            continue;
        };
        let resolved = match &value {
            Value::Num(Number::Int(i)) => Term::Int(*i),
            Value::Num(Number::Float(x)) => Term::Float(*x),
            _ => bind_value(lhs, value)?,
        };
        results.push(((resolved, rhs.clone()), alternative.support));
    }
    Ok(results)
}

/// Binds a symbolic or vector value against the left-hand term.
///
/// A list pattern on the left requires a component count matching the
/// value's; a mismatch is a vector-length contract violation. Any other
/// left shape (a fresh variable) takes the value wholesale.
fn bind_value(lhs: &Term, value: Value) -> Result<Term, EvalError> {
    let Term::List(items) = lhs else {
        return Ok(Term::Value(value));
    };
    if items.len() != value.component_count() {
        return Err(EvalError::VectorLengthMismatch {
            expected: items.len(),
            actual: value.component_count(),
        });
    }
    let components = match value {
        Value::Vector(vector) => vector.components,
        Value::Random(handle) => (0..handle.dimensions)
            .map(|index| {
                Value::RandomComponent(dclog_ir::RandomVariableComponentConstant {
                    variable: std::rc::Rc::clone(&handle),
                    index,
                })
            })
            .collect(),
        scalar => vec![scalar],
    };
    Ok(Term::List(
        components.into_iter().map(Term::Value).collect(),
    ))
}
