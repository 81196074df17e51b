//! Compilation of the numeric comparison builtins (`<`, `>`, `=<`, `>=`).
//!
//! Two regimes per evaluated alternative: an all-numeric pair computes the
//! Boolean directly and maps it to the true/false terminal (no circuit
//! growth), anything else becomes a canonicalized symbolic predicate atom
//! conjoined with the operands' carried supports.

use anyhow::Result;
use tracing::trace;

use dclog_ir::{EvalError, Number, SymbolicConstant, Term, Value};

use crate::circuit::{CircuitNode, WeightedCircuit};
use crate::engine::{EvalConfig, Grounder};
use crate::eval::evaluate_term;

use super::{require_ground, BuiltinResult};

/// The supported scalar comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    /// Surface syntax of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "=<",
            CompareOp::Ge => ">=",
        }
    }

    /// Functor tag used in the canonical predicate form.
    fn canonical(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }

    fn holds(self, a: Number, b: Number) -> bool {
        let (a, b) = (a.as_f64(), b.as_f64());
        match self {
            CompareOp::Lt => a < b,
            CompareOp::Gt => a > b,
            CompareOp::Le => a <= b,
            CompareOp::Ge => a >= b,
        }
    }
}

/// `arg1 < arg2`
pub fn builtin_lt<G: Grounder>(
    arg1: &Term,
    arg2: &Term,
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    config: &EvalConfig,
) -> Result<BuiltinResult> {
    compare(CompareOp::Lt, arg1, arg2, engine, target, database, config)
}

/// `arg1 > arg2`
pub fn builtin_gt<G: Grounder>(
    arg1: &Term,
    arg2: &Term,
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    config: &EvalConfig,
) -> Result<BuiltinResult> {
    compare(CompareOp::Gt, arg1, arg2, engine, target, database, config)
}

/// `arg1 =< arg2`
pub fn builtin_le<G: Grounder>(
    arg1: &Term,
    arg2: &Term,
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    config: &EvalConfig,
) -> Result<BuiltinResult> {
    compare(CompareOp::Le, arg1, arg2, engine, target, database, config)
}

/// `arg1 >= arg2`
pub fn builtin_ge<G: Grounder>(
    arg1: &Term,
    arg2: &Term,
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    config: &EvalConfig,
) -> Result<BuiltinResult> {
    compare(CompareOp::Ge, arg1, arg2, engine, target, database, config)
}

/// `=:=` is not defined for continuous random variables: equality of two
/// densities has measure zero. Fails unconditionally.
pub fn builtin_eq(_arg1: &Term, _arg2: &Term) -> Result<BuiltinResult> {
    Err(EvalError::UnsupportedComparison {
        functor: "=:=".to_string(),
    }
    .into())
}

/// `=\=` is not defined for continuous random variables. Fails
/// unconditionally.
pub fn builtin_ne(_arg1: &Term, _arg2: &Term) -> Result<BuiltinResult> {
    Err(EvalError::UnsupportedComparison {
        functor: "=\\=".to_string(),
    }
    .into())
}

fn compare<G: Grounder>(
    op: CompareOp,
    arg1: &Term,
    arg2: &Term,
    engine: &mut G,
    target: &mut WeightedCircuit,
    database: &G::Database,
    config: &EvalConfig,
) -> Result<BuiltinResult> {
    require_ground(op.symbol(), arg1, config)?;
    require_ground(op.symbol(), arg2, config)?;

    let a_values = evaluate_term(arg1, engine, target, database, config)?;
    let b_values = evaluate_term(arg2, engine, target, database, config)?;

    let mut results = Vec::with_capacity(a_values.len() * b_values.len());
    for a in &a_values {
        for b in &b_values {
            match (&a.value, &b.value) {
                // Numeric fast path: terminal node, no atom created.
                (Some(Value::Num(x)), Some(Value::Num(y))) => {
                    let node = if op.holds(*x, *y) {
                        CircuitNode::True
                    } else {
                        CircuitNode::False
                    };
                    results.push((
                        (Term::Value(Value::Num(*x)), Term::Value(Value::Num(*y))),
                        node,
                    ));
                }
                // No valid grounding on either side: terminal false.
                (None, _) | (_, None) => {
                    results.push(((arg1.clone(), arg2.clone()), CircuitNode::False));
                }
                (Some(x), Some(y)) => {
                    let lhs = scalar_operand(x)?;
                    let rhs = scalar_operand(y)?;
                    let support = target.add_and(&[a.support, b.support]);

                    let predicate =
                        SymbolicConstant::new(op.canonical(), vec![lhs.clone(), rhs.clone()]);
                    let identifier = predicate.canonical_form();
                    trace!(predicate = %identifier, "symbolic comparison");
                    let atom = target.add_atom(identifier, predicate);
                    let node = target.add_and(&[support, atom]);
                    results.push(((Term::Value(lhs), Term::Value(rhs)), node));
                }
            }
        }
    }
    Ok(results)
}

/// Unwraps a length-1 vector to its scalar; any other vector-valued
/// operand in a scalar comparison is a contract violation, never a
/// truncation. A multi-dimensional random variable is vector-valued too.
fn scalar_operand(value: &Value) -> Result<Value, EvalError> {
    match value {
        Value::Vector(vector) => {
            if vector.len() != 1 {
                return Err(EvalError::VectorLengthMismatch {
                    expected: 1,
                    actual: vector.len(),
                });
            }
            Ok(vector.components[0].clone())
        }
        Value::Random(handle) if !handle.is_scalar() => {
            Err(EvalError::VectorLengthMismatch {
                expected: 1,
                actual: handle.dimensions,
            })
        }
        other => Ok(other.clone()),
    }
}
