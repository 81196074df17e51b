//! # dclog IR
//!
//! Data model for the dclog hybrid probabilistic-logic core.
//!
//! This crate holds the value domain shared between the grounding layer
//! and the numeric backend: logic [`Term`]s, evaluated [`Value`]s,
//! canonical random-variable handles ([`RandomVariableConstant`]),
//! unresolved algebraic expressions ([`SymbolicConstant`]), vector values,
//! distribution descriptions, density [`Mixture`]s, and the typed error
//! taxonomy ([`EvalError`]).
//!
//! ## Identity and canonical forms
//!
//! Two properties of this model carry the correctness of the circuit the
//! compiler crate builds on top of it:
//!
//! - A [`RandomVariableConstant`] is allocated once per grounded density
//!   and shared by `Rc`; repeated references to the same grounding within
//!   one session resolve to the identical handle.
//! - A [`SymbolicConstant`]'s canonical string form
//!   ([`SymbolicConstant::canonical_form`]) determines circuit-atom
//!   sharing: identical form, identical atom. The form is syntactic;
//!   commuted but equivalent expressions do not collapse.

pub mod distribution;
pub mod error;
pub mod number;
pub mod term;
pub mod value;

pub use distribution::{Distribution, Mixture};
pub use error::EvalError;
pub use number::Number;
pub use term::Term;
pub use value::{
    LogicVectorConstant, RandomVariableComponentConstant, RandomVariableConstant,
    SymbolicConstant, Value,
};
