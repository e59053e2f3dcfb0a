//! Structured row keys.
//!
//! A [`RowKey`] is the ordered list of key-field values of a row (case-folded
//! when the source is case-insensitive). The first `parent_len` values form
//! the [`ParentKey`] that groups siblings; the remaining values form the
//! [`ChildId`] used to recognise a row that moved to a different parent.
//!
//! Keys compare structurally, so a value containing the display delimiter
//! cannot collide with a different split of the same text.
use std::fmt;

/// Delimiter used when rendering keys as text.
pub const KEY_DELIMITER: &str = "~";

/// Folds a cell value for case-insensitive keys and comparisons.
pub fn fold_case(value: &str) -> String {
    value.to_uppercase()
}

/// Composite key identifying one indexed row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey {
    values: Vec<String>,
    parent_len: usize,
    occurrence: usize,
}

impl RowKey {
    /// Creates a canonical key from key-field values, the first `parent_len`
    /// of which are parent fields.
    ///
    /// `parent_len` is clamped to the number of values.
    pub fn new(values: Vec<String>, parent_len: usize) -> Self {
        let parent_len = parent_len.min(values.len());
        Self {
            values,
            parent_len,
            occurrence: 0,
        }
    }

    /// Returns a copy of this key disambiguated as duplicate number `occurrence`.
    pub fn with_occurrence(&self, occurrence: usize) -> Self {
        Self {
            occurrence,
            ..self.clone()
        }
    }

    /// All key-field values, parent values first.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Duplicate occurrence number; `0` for the canonical key.
    pub fn occurrence(&self) -> usize {
        self.occurrence
    }

    /// Returns `true` if this key was disambiguated because of a collision.
    pub fn is_duplicate(&self) -> bool {
        self.occurrence > 0
    }

    /// The parent portion of the key.
    pub fn parent(&self) -> ParentKey {
        ParentKey(self.values[..self.parent_len].to_vec())
    }

    /// The child portion of the key, ignoring the parent.
    pub fn child(&self) -> ChildId {
        ChildId {
            values: self.values[self.parent_len..].to_vec(),
            occurrence: self.occurrence,
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values.join(KEY_DELIMITER))?;
        if self.occurrence > 0 {
            write!(f, "[{}]", self.occurrence)?;
        }
        Ok(())
    }
}

/// Key of a sibling group: the parent-field values of a row.
///
/// Sources without parent fields place every row under the empty parent key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ParentKey(Vec<String>);

impl ParentKey {
    /// Parent-field values.
    pub fn values(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ParentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(KEY_DELIMITER))
    }
}

/// Child identity of a row: its key with the parent portion removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildId {
    values: Vec<String>,
    occurrence: usize,
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values.join(KEY_DELIMITER))?;
        if self.occurrence > 0 {
            write!(f, "[{}]", self.occurrence)?;
        }
        Ok(())
    }
}
