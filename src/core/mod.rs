//! Core automaton graph types.
//!
//! This module contains the representation consumed by automaton algorithms:
//! - Transition predicates and their canonicalizing interner
//! - Automaton states with ordered outgoing edges
//! - The node arena that owns a whole (possibly cyclic) graph
//!
//! Nothing here drives an automaton over input. Evaluation of a single
//! transition against a single symbol is the only execution primitive.

mod automaton;
mod error;
mod interner;
mod node;
mod transition;

pub use automaton::{Automaton, AutomatonDisplay};
pub use error::{ArgumentViolation, GraphError, TransitionError};
pub use interner::TransitionInterner;
pub use node::{FiniteAutomataNode, NodeId};
pub use transition::{CodeRange, Transition, TransitionKind, CODE_POINT_LIMIT};
