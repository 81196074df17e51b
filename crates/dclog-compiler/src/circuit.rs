//! The weighted Boolean circuit builder.
//!
//! The circuit is owned by one grounding/query session. Builtins grow it
//! through the narrow surface here: atom registration (with structural
//! deduplication by identifier), AND/OR combination, density-name
//! generation, and the session-scoped density cache. Solving and weight
//! evaluation happen elsewhere; this layer only records structure and
//! algebraic payloads.

use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use dclog_ir::{
    EvalError, LogicVectorConstant, RandomVariableConstant, SymbolicConstant, Term, Value,
};

/// An opaque handle to one circuit node.
///
/// `True` is the `0` sentinel: "no constraint yet". Conjoining a node
/// with `True` returns the node unchanged; `False` is absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CircuitNode {
    True,
    False,
    Node(usize),
}

impl CircuitNode {
    pub fn is_true(self) -> bool {
        matches!(self, CircuitNode::True)
    }

    pub fn is_false(self) -> bool {
        matches!(self, CircuitNode::False)
    }
}

impl std::fmt::Display for CircuitNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitNode::True => write!(f, "0"),
            CircuitNode::False => write!(f, "none"),
            CircuitNode::Node(id) => write!(f, "{}", id + 1),
        }
    }
}

/// One allocated node of the circuit.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// A weighted leaf. The weight is an algebraic payload a numeric
    /// backend evaluates later.
    Atom {
        identifier: String,
        weight: SymbolicConstant,
    },
    And(Vec<CircuitNode>),
    Or(Vec<CircuitNode>),
}

/// A weighted Boolean circuit under construction, plus the session state
/// that lives and dies with it.
#[derive(Debug, Default)]
pub struct WeightedCircuit {
    nodes: Vec<NodeKind>,
    /// Atom deduplication: identifier, allocated node index.
    atom_index: IndexMap<String, usize>,
    /// Density cache: density name, canonical random-variable handle.
    /// Scoped to this circuit; discarded with it.
    pub density_values: HashMap<String, Rc<RandomVariableConstant>>,
}

impl WeightedCircuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an atom, or returns the existing node when an atom with
    /// the same identifier was registered before. Identical identifier
    /// implies identical node id for the lifetime of the circuit.
    pub fn add_atom(&mut self, identifier: impl Into<String>, weight: SymbolicConstant) -> CircuitNode {
        let identifier = identifier.into();
        if let Some(&id) = self.atom_index.get(&identifier) {
            return CircuitNode::Node(id);
        }
        let id = self.nodes.len();
        tracing::trace!(identifier = %identifier, node = id, "add atom");
        self.nodes.push(NodeKind::Atom {
            identifier: identifier.clone(),
            weight,
        });
        self.atom_index.insert(identifier, id);
        CircuitNode::Node(id)
    }

    /// Conjunction. `True` operands are dropped, `False` is absorbing, a
    /// single remaining operand passes through unchanged, and the empty
    /// conjunction is `True`.
    pub fn add_and(&mut self, operands: &[CircuitNode]) -> CircuitNode {
        if operands.iter().any(|n| n.is_false()) {
            return CircuitNode::False;
        }
        let live: Vec<CircuitNode> = operands.iter().copied().filter(|n| !n.is_true()).collect();
        match live.len() {
            0 => CircuitNode::True,
            1 => live[0],
            _ => {
                let id = self.nodes.len();
                self.nodes.push(NodeKind::And(live));
                CircuitNode::Node(id)
            }
        }
    }

    /// Disjunction, the dual of [`add_and`](Self::add_and).
    pub fn add_or(&mut self, operands: &[CircuitNode]) -> CircuitNode {
        if operands.iter().any(|n| n.is_true()) {
            return CircuitNode::True;
        }
        let live: Vec<CircuitNode> = operands.iter().copied().filter(|n| !n.is_false()).collect();
        match live.len() {
            0 => CircuitNode::False,
            1 => live[0],
            _ => {
                let id = self.nodes.len();
                self.nodes.push(NodeKind::Or(live));
                CircuitNode::Node(id)
            }
        }
    }

    /// The session-unique density name for one grounding of a random
    /// variable. Stable per (term, node) pair.
    pub fn get_density_name(&self, term: &Term, node: CircuitNode) -> String {
        format!("{}_{}", term, node)
    }

    /// Translates term syntax into the evaluated value domain.
    ///
    /// Numbers pass through, already-evaluated values unwrap, atoms become
    /// symbolic leaves, compounds become symbolic expressions with unioned
    /// free-variable sets, and lists become vectors. A logic variable here
    /// is a contract violation: AST representations exist only for ground
    /// terms.
    pub fn create_ast_representation(&self, term: &Term) -> Result<Value, EvalError> {
        match term {
            Term::Int(i) => Ok(Value::int(*i)),
            Term::Float(x) => Ok(Value::float(*x)),
            Term::Value(value) => Ok(value.clone()),
            Term::Atom(name) => Ok(Value::Symbolic(SymbolicConstant::leaf(name.clone()))),
            Term::List(items) => {
                let components = items
                    .iter()
                    .map(|item| self.create_ast_representation(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Vector(LogicVectorConstant::new(components)))
            }
            Term::Compound { functor, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.create_ast_representation(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Symbolic(SymbolicConstant::new(functor.clone(), args)))
            }
            Term::Var(_) => Err(EvalError::UngroundTerm {
                functor: "ast".to_string(),
                term: term.to_string(),
            }),
        }
    }

    pub fn node(&self, id: usize) -> Option<&NodeKind> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of registered atoms (after deduplication).
    pub fn atom_count(&self) -> usize {
        self.atom_index.len()
    }

    /// Registered atom identifiers, in registration order.
    pub fn atom_identifiers(&self) -> impl Iterator<Item = &str> {
        self.atom_index.keys().map(String::as_str)
    }
}
