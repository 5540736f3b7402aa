//! Canonicalizing registry for transitions.
//!
//! The interner guarantees that every `(variant, arguments)` pair maps to a
//! single shared [`Transition`] for as long as the interner lives. Entries
//! are never evicted. Identity comparison of handles is therefore a valid
//! substitute for structural comparison.

use super::error::{ArgumentViolation, TransitionError};
use super::transition::{CodeRange, Transition, TransitionKind};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

type Table = HashMap<TransitionKind, Transition>;

/// Registry of canonical transitions.
///
/// The interner is an ordinary value owned by whatever builds automata and
/// passed explicitly to construction code. It is `Send + Sync`; racing
/// constructors for the same key always observe one instance.
///
/// # Example
///
/// ```rust
/// use dfa_utils::core::TransitionInterner;
///
/// let interner = TransitionInterner::new();
///
/// let a1 = interner.char('a');
/// let a2 = interner.char_str("a").unwrap();
/// let b = interner.char('b');
///
/// assert_eq!(a1, a2);
/// assert_ne!(a1, b);
/// assert!(interner.char_str("ab").is_err());
/// ```
#[derive(Debug, Default)]
pub struct TransitionInterner {
    table: RwLock<Table>,
}

impl TransitionInterner {
    /// Create an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty interner with room for `capacity` transitions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// The canonical epsilon transition.
    pub fn epsilon(&self) -> Transition {
        self.canonical(TransitionKind::Epsilon)
    }

    /// The canonical transition matching exactly `c`.
    pub fn char(&self, c: char) -> Transition {
        self.canonical(TransitionKind::Char(c))
    }

    /// The canonical transition matching the single character in `s`.
    ///
    /// Fails with [`TransitionError::InvalidArgument`] when `s` is empty or
    /// holds more than one character.
    pub fn char_str(&self, s: &str) -> Result<Transition, TransitionError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(self.char(c)),
            _ => Err(TransitionError::InvalidArgument(vec![
                ArgumentViolation::CharLength {
                    found: s.chars().count(),
                },
            ])),
        }
    }

    /// The canonical transition matching any code point in `ranges`.
    ///
    /// Intervals are keyed in the order given and are not normalized.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dfa_utils::core::{CodeRange, TransitionInterner};
    ///
    /// let interner = TransitionInterner::new();
    ///
    /// let letters = interner
    ///     .range([CodeRange::inclusive('a', 'z'), CodeRange::inclusive('A', 'Z')])
    ///     .unwrap();
    /// assert_eq!(letters.to_string(), "-[a-zA-Z]>");
    ///
    /// assert!(interner.range(Vec::<CodeRange>::new()).is_err());
    /// assert!(interner.range([90..65]).is_err());
    /// ```
    pub fn range<I, R>(&self, ranges: I) -> Result<Transition, TransitionError>
    where
        I: IntoIterator<Item = R>,
        R: Into<CodeRange>,
    {
        let ranges = ranges.into_iter().map(Into::into).collect();
        self.intern(TransitionKind::Range(ranges))
    }

    /// The canonical transition for an arbitrary variant, after validation.
    pub fn intern(&self, kind: TransitionKind) -> Result<Transition, TransitionError> {
        kind.validate()?;
        Ok(self.canonical(kind))
    }

    /// Number of canonical transitions held.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn canonical(&self, kind: TransitionKind) -> Transition {
        let existing = self.read().get(&kind).cloned();
        if let Some(transition) = existing {
            return transition;
        }

        // Another constructor may have inserted the key between the two
        // locks; the entry lookup under the write lock settles it.
        let mut table = self.write();
        let interned = table.len() + 1;
        table
            .entry(kind)
            .or_insert_with_key(|kind| {
                debug!(transition = %kind, interned, "interned new transition");
                Transition::from_canonical(Arc::new(kind.clone()))
            })
            .clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned transition table");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned transition table");
            poisoned.into_inner()
        })
    }
}
