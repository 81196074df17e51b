//! Unit tests for the grounding layer.

use std::rc::Rc;

use anyhow::Result;

use dclog_ir::{Distribution, EvalError, SymbolicConstant, Term, Value};

use crate::builtins::{
    builtin_eq, builtin_is, builtin_lt, builtin_observation, builtin_query_density,
};
use crate::circuit::{CircuitNode, NodeKind, WeightedCircuit};
use crate::engine::{EvalConfig, Grounder, Grounding};
use crate::eval::evaluate_term;

/// How a fixture clause guards its grounding.
#[derive(Clone)]
enum Guard {
    /// Unconditional: support is the vacuous sentinel.
    Fact,
    /// Guarded by a probabilistic choice atom with this identifier.
    Choice(String),
}

/// A canned grounding engine: clauses are (variable term, distribution,
/// guard) triples matched syntactically against `~(term, D)` goals.
struct FixtureGrounder {
    clauses: Vec<(Term, Option<Distribution>, Guard)>,
}

impl FixtureGrounder {
    fn new() -> Self {
        FixtureGrounder { clauses: vec![] }
    }

    fn fact(mut self, variable: Term, distribution: Distribution) -> Self {
        self.clauses.push((variable, Some(distribution), Guard::Fact));
        self
    }

    fn choice(mut self, variable: Term, distribution: Distribution, id: &str) -> Self {
        self.clauses
            .push((variable, Some(distribution), Guard::Choice(id.to_string())));
        self
    }

    fn unset(mut self, variable: Term) -> Self {
        self.clauses.push((variable, None, Guard::Fact));
        self
    }
}

impl Grounder for FixtureGrounder {
    type Database = ();

    fn ground(
        &mut self,
        _database: &(),
        goal: &Term,
        target: &mut WeightedCircuit,
        _subcall: bool,
    ) -> Result<Vec<Grounding>> {
        let Term::Compound { functor, args } = goal else {
            return Ok(vec![]);
        };
        assert_eq!(functor, "~");
        let subject = &args[0];

        let mut groundings = Vec::new();
        for (variable, distribution, guard) in &self.clauses {
            if variable != subject {
                continue;
            }
            let node = match guard {
                Guard::Fact => CircuitNode::True,
                // Choice atoms dedup by identifier, so re-grounding the
                // same clause yields the same node.
                Guard::Choice(id) => target.add_atom(id.clone(), SymbolicConstant::leaf(id.clone())),
            };
            groundings.push(Grounding {
                variable: variable.clone(),
                distribution: distribution.clone(),
                node,
            });
        }
        Ok(groundings)
    }
}

fn gaussian() -> Distribution {
    Distribution::scalar("normal", vec![Term::Int(0), Term::Int(1)])
}

fn eval_error(err: &anyhow::Error) -> &EvalError {
    err.downcast_ref::<EvalError>().expect("expected EvalError")
}

#[test]
fn test_is_pure_arithmetic() {
    let mut engine = FixtureGrounder::new();
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let rhs = Term::compound("+", vec![Term::Int(1), Term::Int(2)]);
    let results = builtin_is(&Term::var("X"), &rhs, &mut engine, &mut target, &(), &config).unwrap();

    assert_eq!(results.len(), 1);
    let ((resolved, _), support) = &results[0];
    assert_eq!(resolved, &Term::Int(3));
    assert_eq!(*support, CircuitNode::True);
    assert!(target.is_empty());
}

#[test]
fn test_numeric_fast_path_creates_no_atoms() {
    let mut engine = FixtureGrounder::new();
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let results =
        builtin_lt(&Term::Int(2), &Term::Int(5), &mut engine, &mut target, &(), &config).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].1, CircuitNode::True);

    let results =
        builtin_lt(&Term::Int(5), &Term::Int(2), &mut engine, &mut target, &(), &config).unwrap();
    assert_eq!(results[0].1, CircuitNode::False);

    assert_eq!(target.atom_count(), 0);
    assert!(target.is_empty());
}

#[test]
fn test_symbolic_comparison_canonical_atom() {
    let mut engine = FixtureGrounder::new().fact(Term::atom("x"), gaussian());
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let first = builtin_lt(
        &Term::Int(3),
        &Term::atom("x"),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(target.atom_count(), 1);

    // The identical comparison reuses the registered atom.
    let second = builtin_lt(
        &Term::Int(3),
        &Term::atom("x"),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap();
    assert_eq!(first[0].1, second[0].1);
    assert_eq!(target.atom_count(), 1);
}

#[test]
fn test_resolver_idempotence() {
    let mut engine = FixtureGrounder::new().choice(Term::atom("x"), gaussian(), "c0");
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let first = evaluate_term(&Term::atom("x"), &mut engine, &mut target, &(), &config).unwrap();
    let second = evaluate_term(&Term::atom("x"), &mut engine, &mut target, &(), &config).unwrap();

    let (Some(Value::Random(a)), Some(Value::Random(b))) =
        (&first[0].value, &second[0].value)
    else {
        panic!("expected random-variable values");
    };
    assert!(Rc::ptr_eq(a, b));
    assert_eq!(target.density_values.len(), 1);
}

#[test]
fn test_density_cache_is_session_scoped() {
    let mut engine = FixtureGrounder::new().fact(Term::atom("x"), gaussian());
    let config = EvalConfig::new();

    let mut session1 = WeightedCircuit::new();
    let mut session2 = WeightedCircuit::new();
    let first = evaluate_term(&Term::atom("x"), &mut engine, &mut session1, &(), &config).unwrap();
    let second = evaluate_term(&Term::atom("x"), &mut engine, &mut session2, &(), &config).unwrap();

    let (Some(Value::Random(a)), Some(Value::Random(b))) =
        (&first[0].value, &second[0].value)
    else {
        panic!("expected random-variable values");
    };
    // Same structure, but never the same handle across sessions.
    assert!(!Rc::ptr_eq(a, b));
}

#[test]
fn test_cartesian_alternatives() {
    let mut engine = FixtureGrounder::new()
        .choice(Term::atom("x"), gaussian(), "cx0")
        .choice(
            Term::atom("x"),
            Distribution::scalar("normal", vec![Term::Int(5), Term::Int(1)]),
            "cx1",
        )
        .choice(Term::atom("y"), gaussian(), "cy0")
        .choice(
            Term::atom("y"),
            Distribution::scalar("beta", vec![Term::Int(1), Term::Int(1)]),
            "cy1",
        )
        .choice(
            Term::atom("y"),
            Distribution::scalar("uniform", vec![Term::Int(0), Term::Int(1)]),
            "cy2",
        );
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let sum = Term::compound("+", vec![Term::atom("x"), Term::atom("y")]);
    let alternatives = evaluate_term(&sum, &mut engine, &mut target, &(), &config).unwrap();

    // 2 alternatives for x, 3 for y: exactly 6 combinations.
    assert_eq!(alternatives.len(), 6);
    for alternative in &alternatives {
        // Both choices are real atoms, so every combined support is a
        // conjunction node.
        let CircuitNode::Node(id) = alternative.support else {
            panic!("expected a combined support node");
        };
        assert!(matches!(target.node(id), Some(NodeKind::And(operands)) if operands.len() == 2));
        let Some(Value::Symbolic(symbolic)) = &alternative.value else {
            panic!("expected a symbolic sum");
        };
        assert_eq!(symbolic.functor, "+");
        assert_eq!(symbolic.cvariables.len(), 2);
    }
}

#[test]
fn test_unknown_function_fails() {
    let mut engine = FixtureGrounder::new();
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let rhs = Term::compound("foo", vec![Term::Int(1), Term::Int(2)]);
    let err =
        builtin_is(&Term::var("X"), &rhs, &mut engine, &mut target, &(), &config).unwrap_err();
    assert_eq!(
        eval_error(&err),
        &EvalError::UnknownFunction {
            functor: "foo".to_string(),
            arity: 2,
        }
    );
}

#[test]
fn test_registered_extra_function() {
    let mut engine = FixtureGrounder::new();
    let mut target = WeightedCircuit::new();
    let mut config = EvalConfig::new();
    config.functions.register(
        "double",
        1,
        Rc::new(|args| Ok(args[0].add(args[0]))),
    );

    let rhs = Term::compound("double", vec![Term::Int(21)]);
    let results = builtin_is(&Term::var("X"), &rhs, &mut engine, &mut target, &(), &config).unwrap();
    assert_eq!(results[0].0 .0, Term::Int(42));
}

#[test]
fn test_division_by_zero_aborts_call() {
    let mut engine = FixtureGrounder::new();
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let rhs = Term::compound("/", vec![Term::Int(1), Term::Int(0)]);
    let err =
        builtin_is(&Term::var("X"), &rhs, &mut engine, &mut target, &(), &config).unwrap_err();
    assert_eq!(eval_error(&err), &EvalError::DivisionByZero);
}

#[test]
fn test_unground_rhs_is_contract_violation() {
    let mut engine = FixtureGrounder::new();
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let err = builtin_is(
        &Term::var("X"),
        &Term::var("Y"),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap_err();
    assert!(eval_error(&err).is_contract_violation());
}

#[test]
fn test_symbolic_arithmetic_keeps_support_and_cvariables() {
    let mut engine = FixtureGrounder::new().choice(Term::atom("x"), gaussian(), "c0");
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let rhs = Term::compound("+", vec![Term::atom("x"), Term::Int(1)]);
    let results = builtin_is(&Term::var("X"), &rhs, &mut engine, &mut target, &(), &config).unwrap();

    assert_eq!(results.len(), 1);
    let ((resolved, _), support) = &results[0];
    // The support is the choice atom, carried through the application.
    assert!(matches!(support, CircuitNode::Node(_)));
    let Term::Value(Value::Symbolic(symbolic)) = resolved else {
        panic!("expected a residual symbolic value");
    };
    assert_eq!(symbolic.functor, "+");
    assert_eq!(symbolic.cvariables.len(), 1);
}

#[test]
fn test_vector_in_scalar_comparison() {
    let mut engine = FixtureGrounder::new();
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let vector = Term::Value(Value::Vector(dclog_ir::LogicVectorConstant::new(vec![
        Value::int(1),
        Value::int(2),
    ])));
    let err = builtin_lt(
        &vector,
        &Term::Value(Value::Symbolic(SymbolicConstant::leaf("s"))),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap_err();
    assert_eq!(
        eval_error(&err),
        &EvalError::VectorLengthMismatch {
            expected: 1,
            actual: 2,
        }
    );

    // A length-1 vector unwraps to its scalar instead.
    let singleton = Term::Value(Value::Vector(dclog_ir::LogicVectorConstant::new(vec![
        Value::int(1),
    ])));
    let results = builtin_lt(
        &singleton,
        &Term::Value(Value::Symbolic(SymbolicConstant::leaf("s"))),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn test_multidimensional_variable_in_scalar_comparison() {
    let mut engine = FixtureGrounder::new().fact(
        Term::atom("v"),
        Distribution::new("normalMV", vec![], 2),
    );
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let err = builtin_lt(
        &Term::atom("v"),
        &Term::Int(0),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap_err();
    assert_eq!(
        eval_error(&err),
        &EvalError::VectorLengthMismatch {
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn test_comparison_with_unset_operand_is_false() {
    let mut engine = FixtureGrounder::new().unset(Term::atom("x"));
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let results = builtin_lt(
        &Term::atom("x"),
        &Term::Int(0),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap();

    // The unset grounding's alternative collapses to the false terminal;
    // no predicate atom is registered for it.
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].1, CircuitNode::False);
    assert_eq!(target.atom_count(), 0);
}

#[test]
fn test_is_vector_binding() {
    let mut engine = FixtureGrounder::new();
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let rhs = Term::Value(Value::Vector(dclog_ir::LogicVectorConstant::new(vec![
        Value::int(1),
        Value::int(2),
    ])));
    let lhs = Term::list(vec![Term::var("A"), Term::var("B")]);
    let results = builtin_is(&lhs, &rhs, &mut engine, &mut target, &(), &config).unwrap();
    assert_eq!(
        results[0].0 .0,
        Term::list(vec![
            Term::Value(Value::int(1)),
            Term::Value(Value::int(2)),
        ])
    );

    // Arity mismatch between the list pattern and the vector.
    let bad_lhs = Term::list(vec![Term::var("A")]);
    let err = builtin_is(&bad_lhs, &rhs, &mut engine, &mut target, &(), &config).unwrap_err();
    assert_eq!(
        eval_error(&err),
        &EvalError::VectorLengthMismatch {
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn test_observation_defers_weight() {
    let mut engine = FixtureGrounder::new().choice(Term::atom("x"), gaussian(), "c0");
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let results = builtin_observation(
        &Term::atom("x"),
        &Term::Float(1.5),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    // One observation atom, conjoined with the grounding's choice atom.
    let CircuitNode::Node(id) = results[0].1 else {
        panic!("expected a conjunction node");
    };
    assert!(matches!(target.node(id), Some(NodeKind::And(operands)) if operands.len() == 2));

    let observation_atom = target
        .atom_identifiers()
        .find(|id| id.starts_with("observation_of("))
        .expect("observation atom registered");
    assert!(observation_atom.contains("x_"));
}

#[test]
fn test_observation_multiple_groundings_or() {
    let mut engine = FixtureGrounder::new()
        .choice(Term::atom("x"), gaussian(), "c0")
        .choice(
            Term::atom("x"),
            Distribution::scalar("normal", vec![Term::Int(5), Term::Int(1)]),
            "c1",
        );
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let results = builtin_observation(
        &Term::atom("x"),
        &Term::Float(1.5),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap();

    let CircuitNode::Node(id) = results[0].1 else {
        panic!("expected a disjunction node");
    };
    assert!(matches!(target.node(id), Some(NodeKind::Or(operands)) if operands.len() == 2));
}

#[test]
fn test_observation_excludes_unset_grounding() {
    let mut engine = FixtureGrounder::new()
        .unset(Term::atom("x"))
        .choice(Term::atom("x"), gaussian(), "c0");
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let results = builtin_observation(
        &Term::atom("x"),
        &Term::Float(1.5),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap();

    // The unset grounding contributes nothing: no OR node, just the one
    // conjunction from the defined grounding.
    let CircuitNode::Node(id) = results[0].1 else {
        panic!("expected a conjunction node");
    };
    assert!(matches!(target.node(id), Some(NodeKind::And(_))));
}

#[test]
fn test_observation_rejects_multidimensional() {
    let mut engine = FixtureGrounder::new().fact(
        Term::atom("v"),
        Distribution::new("normalMV", vec![], 2),
    );
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let err = builtin_observation(
        &Term::atom("v"),
        &Term::Float(1.5),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap_err();
    assert_eq!(
        eval_error(&err),
        &EvalError::MultiDimensionalObservation { dimensions: 2 }
    );
}

#[test]
fn test_query_density_groups_into_mixture() {
    let mut engine = FixtureGrounder::new()
        .choice(Term::atom("d"), gaussian(), "c0")
        .choice(
            Term::atom("d"),
            Distribution::scalar("normal", vec![Term::Int(5), Term::Int(1)]),
            "c1",
        );
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    let mixtures =
        builtin_query_density(&Term::atom("d"), &mut engine, &mut target, &(), &config).unwrap();

    assert_eq!(mixtures.len(), 1);
    let (mixture, support) = &mixtures[0];
    assert_eq!(mixture.components.len(), 2);
    assert_eq!(*support, CircuitNode::True);
    assert_eq!(mixture.origin, Term::atom("d"));
}

#[test]
fn test_eq_is_unsupported() {
    let err = builtin_eq(&Term::Int(1), &Term::Int(1)).unwrap_err();
    assert!(matches!(
        eval_error(&err),
        EvalError::UnsupportedComparison { .. }
    ));
}

#[test]
fn test_no_groundings_is_predicate_failure() {
    let mut engine = FixtureGrounder::new();
    let mut target = WeightedCircuit::new();
    let config = EvalConfig::new();

    // An atom with no clause fails softly: empty list, no error.
    let results = builtin_is(
        &Term::var("X"),
        &Term::atom("unknown_rv"),
        &mut engine,
        &mut target,
        &(),
        &config,
    )
    .unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_circuit_connective_simplification() {
    let mut target = WeightedCircuit::new();
    let atom = target.add_atom("a", SymbolicConstant::leaf("a"));

    assert_eq!(target.add_and(&[]), CircuitNode::True);
    assert_eq!(target.add_and(&[CircuitNode::True, atom]), atom);
    assert_eq!(
        target.add_and(&[CircuitNode::False, atom]),
        CircuitNode::False
    );
    assert_eq!(target.add_or(&[]), CircuitNode::False);
    assert_eq!(target.add_or(&[CircuitNode::False, atom]), atom);
    assert_eq!(target.add_or(&[CircuitNode::True, atom]), CircuitNode::True);

    // Atom registration dedups by identifier.
    let again = target.add_atom("a", SymbolicConstant::leaf("a"));
    assert_eq!(atom, again);
    assert_eq!(target.atom_count(), 1);
}
