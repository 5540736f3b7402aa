//! Construction errors for transitions and automaton graphs.

use super::node::NodeId;
use thiserror::Error;

/// A single reason a transition's constructor arguments were rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgumentViolation {
    #[error("expected exactly one character, found {found}")]
    CharLength { found: usize },

    #[error("range transition requires at least one interval")]
    EmptyRangeList,

    #[error("interval [{start}, {stop}) is empty")]
    EmptyInterval { start: u32, stop: u32 },

    #[error("interval stop {stop:#X} is past the last code point")]
    OutOfBounds { stop: u32 },
}

/// Errors raised when constructing transitions.
///
/// Raised synchronously by the constructor and never by evaluation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid argument: {}", describe(.0))]
    InvalidArgument(Vec<ArgumentViolation>),
}

fn describe(violations: &[ArgumentViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised when wiring nodes of an automaton.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} does not belong to this automaton")]
    UnknownNode(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_lists_every_violation() {
        let err = TransitionError::InvalidArgument(vec![
            ArgumentViolation::EmptyInterval { start: 5, stop: 3 },
            ArgumentViolation::OutOfBounds { stop: 0x11_0001 },
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid argument: interval [5, 3) is empty; \
             interval stop 0x110001 is past the last code point"
        );
    }

    #[test]
    fn char_length_reports_count() {
        let err = TransitionError::InvalidArgument(vec![ArgumentViolation::CharLength {
            found: 2,
        }]);
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected exactly one character, found 2"
        );
    }

    #[test]
    fn unknown_node_names_the_id() {
        assert_eq!(
            GraphError::UnknownNode(NodeId::new(7)).to_string(),
            "Node 7 does not belong to this automaton"
        );
    }
}
