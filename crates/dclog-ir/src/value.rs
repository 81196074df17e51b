//! Evaluated values: numbers, symbolic expressions, and random-variable
//! handles.
//!
//! A builtin call resolves its argument terms into values of this domain.
//! Values that still depend on random variables stay symbolic; their
//! canonical string form (the `Display` impl) is the deduplication key for
//! circuit atoms. The canonicalization is purely syntactic: `+(a,b)` and
//! `+(b,a)` are distinct forms even though they denote the same quantity.

use std::collections::BTreeSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::number::Number;

/// The result of evaluating one argument term.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Num(Number),
    Symbolic(SymbolicConstant),
    Random(Rc<RandomVariableConstant>),
    RandomComponent(RandomVariableComponentConstant),
    Vector(LogicVectorConstant),
}

impl Value {
    pub fn int(value: i64) -> Self {
        Value::Num(Number::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Value::Num(Number::Float(value))
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Free random-variable identifiers (density names) this value
    /// depends on.
    pub fn cvariables(&self) -> BTreeSet<String> {
        match self {
            Value::Num(_) => BTreeSet::new(),
            Value::Symbolic(symbolic) => symbolic.cvariables.clone(),
            Value::Random(handle) => std::iter::once(handle.density_name.clone()).collect(),
            Value::RandomComponent(component) => {
                std::iter::once(component.variable.density_name.clone()).collect()
            }
            Value::Vector(vector) => {
                let mut union = BTreeSet::new();
                for component in &vector.components {
                    union.extend(component.cvariables());
                }
                union
            }
        }
    }

    /// Number of scalar components when this value is unified against a
    /// logic list.
    pub fn component_count(&self) -> usize {
        match self {
            Value::Vector(vector) => vector.components.len(),
            Value::Random(handle) => handle.dimensions,
            _ => 1,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", n),
            Value::Symbolic(symbolic) => write!(f, "{}", symbolic),
            Value::Random(handle) => write!(f, "{}", handle.density_name),
            Value::RandomComponent(component) => write!(
                f,
                "{}[{}]",
                component.variable.density_name, component.index
            ),
            Value::Vector(vector) => {
                write!(f, "[")?;
                for (i, component) in vector.components.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", component)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// An uncomputed algebraic or Boolean expression over constants and
/// random variables. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolicConstant {
    pub functor: String,
    pub args: Vec<Value>,
    /// Free random-variable identifiers, the union over `args`.
    pub cvariables: BTreeSet<String>,
}

impl SymbolicConstant {
    /// Builds an expression node, unioning the free-variable sets of the
    /// operands.
    pub fn new(functor: impl Into<String>, args: Vec<Value>) -> Self {
        let mut cvariables = BTreeSet::new();
        for arg in &args {
            cvariables.extend(arg.cvariables());
        }
        SymbolicConstant {
            functor: functor.into(),
            args,
            cvariables,
        }
    }

    /// A zero-arity symbolic leaf.
    pub fn leaf(functor: impl Into<String>) -> Self {
        SymbolicConstant::new(functor, Vec::new())
    }

    /// The canonical string form. Identical forms share one circuit atom.
    pub fn canonical_form(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for SymbolicConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            return write!(f, "{}", self.functor);
        }
        write!(f, "{}(", self.functor)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// The canonical handle for one concrete grounding of a random variable.
///
/// Handles are created once per (variable, grounding node) pair and cached
/// on the circuit; every later reference yields the same `Rc`. Weight
/// bookkeeping downstream relies on that identity, so these are never
/// rebuilt from their parts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomVariableConstant {
    pub functor: String,
    pub args: Vec<Value>,
    /// Session-unique identifier for this grounded density.
    pub density_name: String,
    /// Vector length of the distribution's values; `1` for scalars.
    pub dimensions: usize,
}

impl RandomVariableConstant {
    pub fn new(
        functor: impl Into<String>,
        args: Vec<Value>,
        density_name: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        RandomVariableConstant {
            functor: functor.into(),
            args,
            density_name: density_name.into(),
            dimensions,
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.dimensions == 1
    }
}

/// One scalar component of a vector-valued random variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomVariableComponentConstant {
    pub variable: Rc<RandomVariableConstant>,
    pub index: usize,
}

/// A fixed-length ordered sequence of component values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogicVectorConstant {
    pub components: Vec<Value>,
}

impl LogicVectorConstant {
    pub fn new(components: Vec<Value>) -> Self {
        LogicVectorConstant { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
