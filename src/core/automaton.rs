//! Arena owning every node of one automaton graph.
//!
//! Nodes are stored contiguously and addressed by [`NodeId`]. Edges hold ids,
//! never owning pointers, so cycles need no special handling and the whole
//! graph is released at once when the automaton is dropped. Ids are issued
//! densely in allocation order and never reused.

use super::error::GraphError;
use super::node::{FiniteAutomataNode, NodeId};
use super::transition::Transition;
use std::collections::HashSet;
use std::fmt;
use tracing::trace;

/// Node arena for a single finite automaton.
///
/// # Example
///
/// ```rust
/// use dfa_utils::core::{Automaton, TransitionInterner};
///
/// let interner = TransitionInterner::new();
/// let mut automaton = Automaton::new();
///
/// // a*b
/// let start = automaton.add_node(false);
/// let done = automaton.add_node(true);
/// automaton.add_edge(start, interner.char('a'), start).unwrap();
/// automaton.add_edge(start, interner.char('b'), done).unwrap();
///
/// assert_eq!(automaton.reachable_from(start), [start, done]);
/// assert_eq!(automaton.render(start), "0\n  0 -a> 0\n  0 -b> 1\n1 (accept)\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Automaton {
    nodes: Vec<FiniteAutomataNode>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Allocate a node with no edges and return its id.
    pub fn add_node(&mut self, is_accept: bool) -> NodeId {
        debug_assert!(self.nodes.len() < u32::MAX as usize, "node arena is full");
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(FiniteAutomataNode::new(is_accept));
        id
    }

    /// Append the edge `from --transition--> to`.
    ///
    /// Both ids must come from this automaton. Self-loops and cycles are
    /// legal; nothing besides `from`'s edge list changes.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        transition: Transition,
        to: NodeId,
    ) -> Result<(), GraphError> {
        if !self.contains(to) {
            return Err(GraphError::UnknownNode(to));
        }
        let node = self
            .nodes
            .get_mut(from.index())
            .ok_or(GraphError::UnknownNode(from))?;

        trace!(%from, %to, %transition, "adding edge");
        node.add_edge(transition, to);
        Ok(())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&FiniteAutomataNode> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut FiniteAutomataNode> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of edges across all nodes.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.successors().len()).sum()
    }

    /// Nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &FiniteAutomataNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId::new(idx as u32), node))
    }

    /// Ids of accepting nodes, in id order.
    pub fn accepting(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, node)| node.is_accept())
            .map(|(id, _)| id)
    }

    /// Nodes reachable from `start`, including `start`, in depth-first
    /// discovery order following edge order.
    ///
    /// Terminates on cyclic graphs. Returns an empty list when `start` is
    /// not part of this automaton.
    pub fn reachable_from(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if !self.contains(start) {
            return order;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            if let Some(node) = self.node(id) {
                // Reversed so the first edge is explored first.
                stack.extend(
                    node.successors()
                        .iter()
                        .rev()
                        .map(|(_, target)| *target)
                        .filter(|target| !visited.contains(target)),
                );
            }
        }

        order
    }

    /// Printable view of the subgraph reachable from `start`.
    pub fn display_from(&self, start: NodeId) -> AutomatonDisplay<'_> {
        AutomatonDisplay {
            automaton: self,
            start,
        }
    }

    /// Human-readable dump of the subgraph reachable from `start`.
    ///
    /// One header line per node (`3` or `3 (accept)`), followed by one
    /// indented line per edge (`  3 -a> 4`).
    pub fn render(&self, start: NodeId) -> String {
        self.display_from(start).to_string()
    }
}

/// See [`Automaton::display_from`].
pub struct AutomatonDisplay<'a> {
    automaton: &'a Automaton,
    start: NodeId,
}

impl fmt::Display for AutomatonDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.automaton.reachable_from(self.start) {
            let Some(node) = self.automaton.node(id) else {
                continue;
            };
            if node.is_accept() {
                writeln!(f, "{id} (accept)")?;
            } else {
                writeln!(f, "{id}")?;
            }
            for (transition, target) in node.successors() {
                writeln!(f, "  {id} {transition} {target}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionInterner;

    #[test]
    fn add_node_issues_dense_ids() {
        let mut automaton = Automaton::new();
        let ids: Vec<_> = (0..4).map(|i| automaton.add_node(i % 2 == 0)).collect();

        assert_eq!(
            ids.iter().map(NodeId::as_u32).collect::<Vec<_>>(),
            [0, 1, 2, 3]
        );
        assert_eq!(automaton.len(), 4);
        assert_eq!(
            automaton.accepting().collect::<Vec<_>>(),
            [NodeId::new(0), NodeId::new(2)]
        );
    }

    #[test]
    fn single_char_edge_scenario() {
        let interner = TransitionInterner::new();
        let mut automaton = Automaton::new();
        let a = automaton.add_node(false);
        let b = automaton.add_node(true);

        automaton.add_edge(a, interner.char('a'), b).unwrap();

        let node_a = automaton.node(a).unwrap();
        let (transition, target) = &node_a.successors()[0];
        assert!(transition.evaluate('a'));
        assert!(automaton.node(*target).unwrap().is_accept());
        assert!(!node_a.is_accept());
    }

    #[test]
    fn add_edge_only_touches_source() {
        let interner = TransitionInterner::new();
        let mut automaton = Automaton::new();
        let a = automaton.add_node(false);
        let b = automaton.add_node(false);

        automaton.add_edge(a, interner.epsilon(), b).unwrap();

        assert_eq!(automaton.node(a).unwrap().successors().len(), 1);
        assert!(automaton.node(b).unwrap().successors().is_empty());
        assert_eq!(automaton.edge_count(), 1);
    }

    #[test]
    fn add_edge_rejects_foreign_ids() {
        let interner = TransitionInterner::new();
        let mut automaton = Automaton::new();
        let a = automaton.add_node(false);
        let stray = NodeId::new(9);

        assert_eq!(
            automaton.add_edge(a, interner.epsilon(), stray),
            Err(GraphError::UnknownNode(stray))
        );
        assert_eq!(
            automaton.add_edge(stray, interner.epsilon(), a),
            Err(GraphError::UnknownNode(stray))
        );
        assert_eq!(automaton.edge_count(), 0);
    }

    #[test]
    fn self_loop_is_allowed() {
        let interner = TransitionInterner::new();
        let mut automaton = Automaton::new();
        let n = automaton.add_node(true);

        automaton.add_edge(n, interner.char('a'), n).unwrap();

        assert_eq!(automaton.node(n).unwrap().successors()[0].1, n);
        assert_eq!(automaton.reachable_from(n), [n]);
        assert_eq!(automaton.render(n), "0 (accept)\n  0 -a> 0\n");
    }

    #[test]
    fn reachable_from_terminates_on_cycles() {
        let interner = TransitionInterner::new();
        let mut automaton = Automaton::new();
        let a = automaton.add_node(false);
        let b = automaton.add_node(false);
        let c = automaton.add_node(true);
        let unreachable = automaton.add_node(false);

        automaton.add_edge(a, interner.char('x'), b).unwrap();
        automaton.add_edge(b, interner.char('y'), a).unwrap();
        automaton.add_edge(b, interner.epsilon(), c).unwrap();
        automaton.add_edge(c, interner.epsilon(), a).unwrap();
        automaton.add_edge(unreachable, interner.epsilon(), a).unwrap();

        assert_eq!(automaton.reachable_from(a), [a, b, c]);
        assert_eq!(automaton.reachable_from(c), [c, a, b]);
        assert!(automaton.reachable_from(NodeId::new(42)).is_empty());
    }

    #[test]
    fn reachable_follows_edge_order() {
        let interner = TransitionInterner::new();
        let mut automaton = Automaton::new();
        let root = automaton.add_node(false);
        let left = automaton.add_node(false);
        let right = automaton.add_node(false);
        let deep = automaton.add_node(true);

        automaton.add_edge(root, interner.char('l'), left).unwrap();
        automaton.add_edge(root, interner.char('r'), right).unwrap();
        automaton.add_edge(left, interner.char('d'), deep).unwrap();

        assert_eq!(automaton.reachable_from(root), [root, left, deep, right]);
    }

    #[test]
    fn render_lists_reachable_edges() {
        let interner = TransitionInterner::new();
        let mut automaton = Automaton::new();
        let start = automaton.add_node(false);
        let word = automaton.add_node(true);
        let letters = interner.range([97..123, 65..91]).unwrap();

        automaton.add_edge(start, letters.clone(), word).unwrap();
        automaton.add_edge(word, letters, word).unwrap();
        automaton.add_edge(word, interner.epsilon(), start).unwrap();

        assert_eq!(
            automaton.render(start),
            "0\n  0 -[a-zA-Z]> 1\n1 (accept)\n  1 -[a-zA-Z]> 1\n  1 -ϵ> 0\n"
        );
    }

    #[test]
    fn node_mut_allows_flipping_accept() {
        let mut automaton = Automaton::new();
        let n = automaton.add_node(false);
        automaton.node_mut(n).unwrap().set_accept(true);
        assert_eq!(automaton.accepting().collect::<Vec<_>>(), [n]);
    }
}
