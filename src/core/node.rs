//! Automaton states and their outgoing edges.

use super::transition::Transition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a node inside an [`Automaton`](super::Automaton).
///
/// Edges refer to their targets by id rather than by ownership, so a node
/// may point back at itself or at any earlier node.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    pub(crate) const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A state of a finite automaton.
///
/// The node is a passive data holder: an ordered list of
/// `(transition, target)` edges plus an accept flag. Edge order is
/// insertion order and duplicates are kept. Whatever drives the automaton
/// decides how to interpret them.
///
/// # Example
///
/// ```rust
/// use dfa_utils::core::{FiniteAutomataNode, NodeId, TransitionInterner};
///
/// let interner = TransitionInterner::new();
/// let mut node = FiniteAutomataNode::new(false);
///
/// node.add_edge(interner.char('a'), NodeId::new(1));
/// node.add_edge(interner.epsilon(), NodeId::new(0));
///
/// assert_eq!(node.successors().len(), 2);
/// assert_eq!(node.targets_for('a').collect::<Vec<_>>(), [NodeId::new(1), NodeId::new(0)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FiniteAutomataNode {
    successors: Vec<(Transition, NodeId)>,
    is_accept: bool,
}

impl FiniteAutomataNode {
    pub fn new(is_accept: bool) -> Self {
        Self {
            successors: Vec::new(),
            is_accept,
        }
    }

    /// Append an edge. Only this node is modified; `target` is not checked.
    pub fn add_edge(&mut self, transition: Transition, target: NodeId) {
        self.successors.push((transition, target));
    }

    /// Outgoing edges in insertion order.
    pub fn successors(&self) -> &[(Transition, NodeId)] {
        &self.successors
    }

    pub fn is_accept(&self) -> bool {
        self.is_accept
    }

    pub fn set_accept(&mut self, is_accept: bool) {
        self.is_accept = is_accept;
    }

    /// Targets of edges whose transition accepts `symbol`, in edge order.
    ///
    /// Epsilon edges are included since they accept every symbol.
    pub fn targets_for(&self, symbol: char) -> impl Iterator<Item = NodeId> + '_ {
        self.successors
            .iter()
            .filter(move |(transition, _)| transition.evaluate(symbol))
            .map(|(_, target)| *target)
    }

    /// Targets of epsilon edges, in edge order.
    pub fn epsilon_targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.successors
            .iter()
            .filter(|(transition, _)| transition.is_epsilon())
            .map(|(_, target)| *target)
    }
}
