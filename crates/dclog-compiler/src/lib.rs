//! # dclog compiler
//!
//! The hybrid symbolic-grounding layer of the dclog probabilistic logic
//! engine.
//!
//! Given a builtin predicate invocation (arithmetic assignment, numeric
//! comparison, observation, density query) whose operands may be plain
//! constants, random-variable handles, or unresolved algebraic
//! expressions, this crate compiles the call into nodes of a weighted
//! Boolean circuit. Each atom carries an algebraic payload
//! ([`dclog_ir::SymbolicConstant`]) that a separate numeric backend later
//! evaluates by sampling or exact density computation; no probability is
//! ever computed here.
//!
//! ## Structure
//!
//! - [`circuit`]: the [`WeightedCircuit`] builder (atoms, AND/OR nodes,
//!   the session density cache).
//! - [`engine`]: the [`Grounder`] seam to the host grounding engine and
//!   the pass-through [`EvalConfig`].
//! - [`eval`]: the argument evaluator and function applicator, producing
//!   (value, support) alternatives.
//! - [`functions`]: the known arithmetic function table plus session
//!   extensions.
//! - [`resolve`]: the memoized distribution resolver.
//! - [`builtins`]: the predicate entry points (`is/2`, comparisons,
//!   `observation/2`, `query_density/1`).
//!
//! ## Example
//!
//! ```no_run
//! use dclog_compiler::{builtins::builtin_is, EvalConfig, WeightedCircuit};
//! use dclog_ir::Term;
//! # use dclog_compiler::{Grounder, Grounding};
//! # struct Engine;
//! # impl Grounder for Engine {
//! #     type Database = ();
//! #     fn ground(&mut self, _: &(), _: &Term, _: &mut WeightedCircuit, _: bool)
//! #         -> anyhow::Result<Vec<Grounding>> { Ok(vec![]) }
//! # }
//! # let mut engine = Engine;
//! let mut circuit = WeightedCircuit::new();
//! let config = EvalConfig::new();
//!
//! // X is 1 + 2
//! let rhs = Term::compound("+", vec![Term::Int(1), Term::Int(2)]);
//! let results =
//!     builtin_is(&Term::var("X"), &rhs, &mut engine, &mut circuit, &(), &config).unwrap();
//! assert_eq!(results.len(), 1);
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded by construction: builtins recurse through the host
//! engine on one call stack, and the circuit plus its density cache have
//! a single logical writer. The cache's lifetime is exactly one session;
//! dropping the circuit drops it.

pub mod builtins;
pub mod circuit;
pub mod engine;
pub mod eval;
pub mod functions;
pub mod resolve;

pub use circuit::{CircuitNode, NodeKind, WeightedCircuit};
pub use engine::{distribution_goal, EvalConfig, Grounder, Grounding};
pub use eval::{apply_function, evaluate_term, Evaluated};
pub use functions::FunctionRegistry;
pub use resolve::resolve_distribution;

#[cfg(test)]
mod tests;
