//! Distribution descriptions and density mixtures.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::term::Term;
use crate::value::RandomVariableConstant;

/// A resolved distribution description, as delivered by the grounding
/// engine: the distribution functor (`normal`, `beta`, ...), its argument
/// terms, and the declared vector length of its values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub functor: String,
    pub args: Vec<Term>,
    pub dimensions: usize,
}

impl Distribution {
    pub fn new(functor: impl Into<String>, args: Vec<Term>, dimensions: usize) -> Self {
        Distribution {
            functor: functor.into(),
            args,
            dimensions,
        }
    }

    /// A scalar distribution (`dimensions == 1`).
    pub fn scalar(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Distribution::new(functor, args, 1)
    }
}

impl std::fmt::Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
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

/// A named group of distribution instances answering a direct marginal
/// density query. All live groundings of one term that share an origin are
/// collected into a single mixture.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mixture {
    /// The grounded term the components were collected under.
    pub origin: Term,
    pub components: Vec<Rc<RandomVariableConstant>>,
}

impl Mixture {
    pub fn new(origin: Term, components: Vec<Rc<RandomVariableConstant>>) -> Self {
        Mixture { origin, components }
    }

    /// The shared density name, taken from the first component.
    pub fn density_name(&self) -> Option<&str> {
        self.components
            .first()
            .map(|component| component.density_name.as_str())
    }
}
