//! Snapshot error types.

use crate::core::TransitionError;
use thiserror::Error;

/// Errors that can occur while encoding, decoding or restoring snapshots
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A stored transition value would be rejected by its constructor
    #[error("Transition #{index} is invalid: {source}")]
    InvalidTransition {
        index: usize,
        #[source]
        source: TransitionError,
    },

    #[error("Node {node} refers to missing transition #{index}")]
    MissingTransition { node: u32, index: usize },

    #[error("Node {node} has an edge to missing node {target}")]
    MissingTarget { node: u32, target: u32 },
}
