//! Snapshot and restore for automaton graphs.
//!
//! Transition handles only mean something relative to the interner that
//! issued them, so a snapshot stores transition values in a table and edges
//! refer to table slots. Restoring re-interns every value into the target
//! interner, which re-establishes identity sharing there.

use crate::core::{Automaton, NodeId, Transition, TransitionInterner, TransitionKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// One edge, referring to the transition table and a node slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub transition: usize,
    pub target: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub is_accept: bool,
    /// Edges in insertion order
    pub edges: Vec<EdgeRecord>,
}

/// Serializable checkpoint of an automaton.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was captured
    pub timestamp: DateTime<Utc>,

    /// Each distinct transition once, in first-use order
    pub transitions: Vec<TransitionKind>,

    /// Nodes in id order
    pub nodes: Vec<NodeRecord>,
}

impl Snapshot {
    /// Capture the full node arena of `automaton`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dfa_utils::checkpoint::Snapshot;
    /// use dfa_utils::core::{Automaton, TransitionInterner};
    ///
    /// let interner = TransitionInterner::new();
    /// let mut automaton = Automaton::new();
    /// let start = automaton.add_node(false);
    /// let end = automaton.add_node(true);
    /// automaton.add_edge(start, interner.char('a'), end).unwrap();
    /// automaton.add_edge(end, interner.char('a'), end).unwrap();
    ///
    /// let snapshot = Snapshot::capture(&automaton);
    /// assert_eq!(snapshot.transitions.len(), 1);
    ///
    /// let fresh = TransitionInterner::new();
    /// let restored = snapshot.restore(&fresh).unwrap();
    /// assert_eq!(restored.render(start), automaton.render(start));
    /// ```
    pub fn capture(automaton: &Automaton) -> Self {
        let mut slots: HashMap<&Transition, usize> = HashMap::new();
        let mut transitions = Vec::new();

        let nodes: Vec<NodeRecord> = automaton
            .iter()
            .map(|(_, node)| NodeRecord {
                is_accept: node.is_accept(),
                edges: node
                    .successors()
                    .iter()
                    .map(|(transition, target)| EdgeRecord {
                        transition: *slots.entry(transition).or_insert_with(|| {
                            transitions.push(transition.kind().clone());
                            transitions.len() - 1
                        }),
                        target: target.as_u32(),
                    })
                    .collect(),
            })
            .collect();

        debug!(
            nodes = nodes.len(),
            transitions = transitions.len(),
            "captured automaton snapshot"
        );

        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            transitions,
            nodes,
        }
    }

    /// Rebuild the automaton, interning its transitions into `interner`.
    ///
    /// Node ids and edge order are preserved.
    pub fn restore(&self, interner: &TransitionInterner) -> Result<Automaton, CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let table = self
            .transitions
            .iter()
            .enumerate()
            .map(|(index, kind)| {
                interner
                    .intern(kind.clone())
                    .map_err(|source| CheckpointError::InvalidTransition { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut automaton = Automaton::with_capacity(self.nodes.len());
        for record in &self.nodes {
            automaton.add_node(record.is_accept);
        }

        for (from, record) in numbered(&self.nodes) {
            for edge in &record.edges {
                let transition = table.get(edge.transition).cloned().ok_or(
                    CheckpointError::MissingTransition {
                        node: from.as_u32(),
                        index: edge.transition,
                    },
                )?;
                automaton
                    .add_edge(from, transition, NodeId::new(edge.target))
                    .map_err(|_| CheckpointError::MissingTarget {
                        node: from.as_u32(),
                        target: edge.target,
                    })?;
            }
        }

        debug!(
            id = %self.id,
            nodes = automaton.len(),
            transitions = table.len(),
            "restored automaton snapshot"
        );

        Ok(automaton)
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

fn numbered(nodes: &[NodeRecord]) -> impl Iterator<Item = (NodeId, &NodeRecord)> {
    nodes
        .iter()
        .enumerate()
        .map(|(idx, record)| (NodeId::new(idx as u32), record))
}
