//! Transition predicates that label automaton edges.
//!
//! A transition is a pure predicate over a single input symbol. The variant
//! set is closed: epsilon, a single character, or a list of code-point
//! intervals. Values live behind [`Transition`] handles handed out by a
//! [`TransitionInterner`](super::TransitionInterner), so two handles are
//! equal exactly when they point at the same canonical instance.

use super::error::{ArgumentViolation, TransitionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// One past the largest Unicode code point.
pub const CODE_POINT_LIMIT: u32 = 0x11_0000;

/// Half-open interval of code points, `[start, stop)`.
///
/// # Example
///
/// ```rust
/// use dfa_utils::core::CodeRange;
///
/// let upper = CodeRange::new(65, 91);
/// assert!(upper.contains('A'));
/// assert!(!upper.contains('a'));
/// assert_eq!(upper, CodeRange::inclusive('A', 'Z'));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeRange {
    /// First code point in the interval
    pub start: u32,
    /// First code point past the interval
    pub stop: u32,
}

impl CodeRange {
    pub const fn new(start: u32, stop: u32) -> Self {
        Self { start, stop }
    }

    /// Interval covering `low..=high`.
    pub const fn inclusive(low: char, high: char) -> Self {
        Self {
            start: low as u32,
            stop: high as u32 + 1,
        }
    }

    /// Check whether the symbol's code point lies in the interval.
    pub fn contains(&self, symbol: char) -> bool {
        let code_point = u32::from(symbol);
        self.start <= code_point && code_point < self.stop
    }
}

impl From<Range<u32>> for CodeRange {
    fn from(range: Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Renders as `low-high` with an inclusive upper bound.
impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_code_point(f, self.start)?;
        f.write_str("-")?;
        write_code_point(f, self.stop.saturating_sub(1))
    }
}

fn write_code_point(f: &mut fmt::Formatter<'_>, code_point: u32) -> fmt::Result {
    match char::from_u32(code_point) {
        Some(c) => write!(f, "{c}"),
        None => write!(f, "\\u{{{code_point:X}}}"),
    }
}

/// The value behind a transition handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Matches without constraining the input.
    Epsilon,
    /// Matches exactly one character.
    Char(char),
    /// Matches any symbol whose code point lies in one of the intervals.
    ///
    /// Interval order is significant for interning: permuted lists are
    /// distinct transitions.
    Range(Vec<CodeRange>),
}

impl TransitionKind {
    /// Apply the predicate to one input symbol. Total and side-effect free.
    pub fn evaluate(&self, symbol: char) -> bool {
        match self {
            Self::Epsilon => true,
            Self::Char(c) => *c == symbol,
            Self::Range(ranges) => ranges.iter().any(|range| range.contains(symbol)),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Self::Epsilon)
    }

    /// Check constructor arguments, reporting every violation at once.
    ///
    /// Range lists must be non-empty, every interval must satisfy
    /// `start < stop`, and no interval may extend past [`CODE_POINT_LIMIT`].
    /// Overlapping intervals are accepted as-is.
    pub fn validate(&self) -> Result<(), TransitionError> {
        let ranges = match self {
            Self::Epsilon | Self::Char(_) => return Ok(()),
            Self::Range(ranges) => ranges,
        };

        if ranges.is_empty() {
            return Err(TransitionError::InvalidArgument(vec![
                ArgumentViolation::EmptyRangeList,
            ]));
        }

        let mut checks: Vec<Validation<(), NonEmptyVec<ArgumentViolation>>> = Vec::new();

        for range in ranges {
            let ordered = if range.start < range.stop {
                Validation::success(())
            } else {
                Validation::fail(ArgumentViolation::EmptyInterval {
                    start: range.start,
                    stop: range.stop,
                })
            };
            checks.push(ordered);

            let bounded = if range.stop <= CODE_POINT_LIMIT {
                Validation::success(())
            } else {
                Validation::fail(ArgumentViolation::OutOfBounds { stop: range.stop })
            };
            checks.push(bounded);
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(TransitionError::InvalidArgument(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

/// Renders as `-ϵ>`, `-a>` or `-[a-zA-Z]>`.
impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epsilon => f.write_str("-ϵ>"),
            Self::Char(c) => write!(f, "-{c}>"),
            Self::Range(ranges) => {
                f.write_str("-[")?;
                for range in ranges {
                    write!(f, "{range}")?;
                }
                f.write_str("]>")
            }
        }
    }
}

/// Shared handle to a canonical transition.
///
/// Handles are cheap to clone. Equality and hashing go by identity, which
/// coincides with value equality for handles obtained from the same
/// interner. Handles from different interners never compare equal.
#[derive(Clone)]
pub struct Transition(Arc<TransitionKind>);

impl Transition {
    pub(crate) fn from_canonical(kind: Arc<TransitionKind>) -> Self {
        Self(kind)
    }

    pub fn kind(&self) -> &TransitionKind {
        &self.0
    }

    /// Apply the predicate to one input symbol.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dfa_utils::core::TransitionInterner;
    ///
    /// let interner = TransitionInterner::new();
    /// let upper = interner.range([65..91]).unwrap();
    ///
    /// assert!(upper.evaluate('A'));
    /// assert!(!upper.evaluate('a'));
    /// assert!(interner.epsilon().evaluate('7'));
    /// ```
    pub fn evaluate(&self, symbol: char) -> bool {
        self.0.evaluate(symbol)
    }

    pub fn is_epsilon(&self) -> bool {
        self.0.is_epsilon()
    }
}

impl PartialEq for Transition {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Transition {}

impl Hash for Transition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transition").field(&*self.0).finish()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> TransitionKind {
        TransitionKind::Range(vec![
            CodeRange::inclusive('a', 'z'),
            CodeRange::inclusive('A', 'Z'),
        ])
    }

    #[test]
    fn epsilon_accepts_every_symbol() {
        for symbol in ['a', 'Z', '0', ' ', '\u{0}', '\u{10FFFF}', 'ϵ'] {
            assert!(TransitionKind::Epsilon.evaluate(symbol));
        }
    }

    #[test]
    fn char_matches_only_itself() {
        let kind = TransitionKind::Char('a');
        assert!(kind.evaluate('a'));
        assert!(!kind.evaluate('b'));
        assert!(!kind.evaluate('A'));
    }

    #[test]
    fn range_is_half_open() {
        let kind = TransitionKind::Range(vec![CodeRange::new(65, 91)]);
        assert!(kind.evaluate('A'));
        assert!(kind.evaluate('Z'));
        assert!(!kind.evaluate('['));
        assert!(!kind.evaluate('@'));
        assert!(!kind.evaluate('a'));
    }

    #[test]
    fn range_matches_any_interval() {
        let kind = letters();
        assert!(kind.evaluate('q'));
        assert!(kind.evaluate('Q'));
        assert!(!kind.evaluate('5'));
        assert!(!kind.evaluate('é'));
    }

    #[test]
    fn inclusive_constructor_covers_both_ends() {
        let range = CodeRange::inclusive('a', 'c');
        assert_eq!(range, CodeRange::new(97, 100));
        assert!(range.contains('a'));
        assert!(range.contains('c'));
        assert!(!range.contains('d'));
    }

    #[test]
    fn display_matches_debug_notation() {
        assert_eq!(TransitionKind::Epsilon.to_string(), "-ϵ>");
        assert_eq!(TransitionKind::Char('a').to_string(), "-a>");
        assert_eq!(letters().to_string(), "-[a-zA-Z]>");
        assert_eq!(
            TransitionKind::Range(vec![CodeRange::new(48, 58)]).to_string(),
            "-[0-9]>"
        );
    }

    #[test]
    fn display_escapes_surrogates() {
        let kind = TransitionKind::Range(vec![CodeRange::new(0xD800, 0xE000)]);
        assert_eq!(kind.to_string(), "-[\\u{D800}-\\u{DFFF}]>");
    }

    #[test]
    fn validate_accepts_well_formed_kinds() {
        assert!(TransitionKind::Epsilon.validate().is_ok());
        assert!(TransitionKind::Char('x').validate().is_ok());
        assert!(letters().validate().is_ok());
        assert!(TransitionKind::Range(vec![CodeRange::new(0, CODE_POINT_LIMIT)])
            .validate()
            .is_ok());
    }

    #[test]
    fn validate_rejects_empty_range_list() {
        let err = TransitionKind::Range(Vec::new()).validate().unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidArgument(vec![ArgumentViolation::EmptyRangeList])
        );
    }

    #[test]
    fn validate_accumulates_all_violations() {
        let kind = TransitionKind::Range(vec![
            CodeRange::new(10, 10),
            CodeRange::new(65, 91),
            CodeRange::new(0x11_0005, 0x11_0001),
        ]);

        let TransitionError::InvalidArgument(violations) = kind.validate().unwrap_err();

        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&ArgumentViolation::EmptyInterval { start: 10, stop: 10 }));
        assert!(violations.contains(&ArgumentViolation::EmptyInterval {
            start: 0x11_0005,
            stop: 0x11_0001
        }));
        assert!(violations.contains(&ArgumentViolation::OutOfBounds { stop: 0x11_0001 }));
    }

    #[test]
    fn overlapping_intervals_are_accepted() {
        let kind = TransitionKind::Range(vec![CodeRange::new(65, 80), CodeRange::new(70, 91)]);
        assert!(kind.validate().is_ok());
        assert!(kind.evaluate('T'));
    }

    #[test]
    fn kind_serializes_correctly() {
        let kind = letters();
        let json = serde_json::to_string(&kind).unwrap();
        let deserialized: TransitionKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, deserialized);
    }
}
