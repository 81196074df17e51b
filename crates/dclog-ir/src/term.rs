//! Logic terms consumed by the grounding layer.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A logic term as produced by the surface parser or the host engine.
///
/// This is a closed variant set: builtin evaluation dispatches on the term
/// shape exhaustively instead of probing types at run time. Evaluated
/// values re-enter the term layer through [`Term::Value`], which is how a
/// symbolic constant produced by one builtin flows into the next.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Term {
    Int(i64),
    Float(f64),
    /// A zero-arity symbol, e.g. a random-variable name like `temp`.
    Atom(String),
    /// A named logic variable. Ground checks fail on these.
    Var(String),
    /// A logic list, used for vector-valued unification in `is/2`.
    List(Vec<Term>),
    Compound {
        functor: String,
        args: Vec<Term>,
    },
    /// An already-evaluated value passed back through the term layer.
    Value(Value),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn list(items: Vec<Term>) -> Self {
        Term::List(items)
    }

    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound {
            functor: functor.into(),
            args,
        }
    }

    /// True when the term contains no logic variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::List(items) => items.iter().all(Term::is_ground),
            Term::Compound { args, .. } => args.iter().all(Term::is_ground),
            _ => true,
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Functor and arity, treating atoms as zero-arity compounds.
    pub fn functor_arity(&self) -> Option<(&str, usize)> {
        match self {
            Term::Atom(name) => Some((name, 0)),
            Term::Compound { functor, args } => Some((functor, args.len())),
            _ => None,
        }
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Int(value)
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Float(value)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Int(i) => write!(f, "{}", i),
            Term::Float(x) => write!(f, "{}", x),
            Term::Atom(name) => write!(f, "{}", name),
            Term::Var(name) => write!(f, "?{}", name),
            Term::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Term::Compound { functor, args } => {
                write!(f, "{}(", functor)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Term::Value(value) => write!(f, "{}", value),
        }
    }
}
