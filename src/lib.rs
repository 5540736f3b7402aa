//! dfa-utils: the state/transition graph behind a regex or lexer automaton
//!
//! The crate provides the representation that automaton construction and
//! simulation algorithms work on, and nothing that drives it over input.
//!
//! # Core Concepts
//!
//! - **Transitions**: Interned predicates over a single input symbol
//!   (epsilon, one character, or code-point ranges)
//! - **Interner**: An explicit registry guaranteeing one shared instance per
//!   distinct transition, so handle identity means value equality
//! - **Nodes**: Automaton states with ordered outgoing edges and an accept flag
//! - **Automaton**: The arena owning a whole graph, cycles included
//! - **Snapshots**: Serializable checkpoints of an automaton
//!
//! # Example
//!
//! ```rust
//! use dfa_utils::core::{Automaton, CodeRange, TransitionInterner};
//!
//! let interner = TransitionInterner::new();
//! let mut automaton = Automaton::new();
//!
//! // [A-Z][a-z]*
//! let start = automaton.add_node(false);
//! let word = automaton.add_node(true);
//! let upper = interner.range([CodeRange::inclusive('A', 'Z')]).unwrap();
//! let lower = interner.range([CodeRange::inclusive('a', 'z')]).unwrap();
//!
//! automaton.add_edge(start, upper, word).unwrap();
//! automaton.add_edge(word, lower, word).unwrap();
//!
//! let node = automaton.node(start).unwrap();
//! assert_eq!(node.targets_for('Q').collect::<Vec<_>>(), [word]);
//! assert!(node.targets_for('q').next().is_none());
//! assert!(automaton.node(word).unwrap().is_accept());
//! ```

pub mod checkpoint;
pub mod core;

// Re-export commonly used types
pub use checkpoint::{CheckpointError, Snapshot};
pub use crate::core::{
    Automaton, CodeRange, FiniteAutomataNode, GraphError, NodeId, Transition, TransitionError,
    TransitionInterner, TransitionKind,
};
