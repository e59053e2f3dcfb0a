use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Classification of a changed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    /// Present on the right only.
    Add,
    /// Present on the left only.
    Delete,
    /// Present on both sides with differing field values.
    Update,
    /// Present on both sides at a different sibling position, or re-parented.
    Move,
}

impl DiffType {
    /// All variants, in reporting order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Delete, Self::Update, Self::Move];

    /// Lower-case name (`"add"`, `"delete"`, `"update"`, `"move"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Move => "move",
        }
    }

    /// Capitalised action label (`"Add"`, `"Delete"`, `"Update"`, `"Move"`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Delete => "Delete",
            Self::Update => "Update",
            Self::Move => "Move",
        }
    }
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-based position of a row among its siblings.
///
/// Serializes as a number, a two-element array, or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingPosition {
    /// A single position.
    Single(usize),
    /// Old (left) and new (right) positions of a moved row.
    Pair(usize, usize),
    /// No sibling position. Never produced by the diff engine.
    None,
}

impl SiblingPosition {
    /// Builds a position from zero-based sibling indexes.
    ///
    /// Indexes become one-based positions. Two or more make a pair (first and
    /// last), one makes a single position. An empty list makes
    /// [`SiblingPosition::None`]; the diff engine always knows a row's sibling
    /// index, so `-1` only appears for positions built directly.
    pub fn from_indexes(indexes: &[usize]) -> Self {
        match indexes {
            [] => Self::None,
            [only] => Self::Single(only + 1),
            [first, .., last] => Self::Pair(first + 1, last + 1),
        }
    }

    /// Positions as a list (`[]` for [`SiblingPosition::None`]).
    pub fn to_vec(self) -> Vec<usize> {
        match self {
            Self::Single(p) => vec![p],
            Self::Pair(old, new) => vec![old, new],
            Self::None => Vec::new(),
        }
    }
}

impl Serialize for SiblingPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(p) => serializer.serialize_u64(*p as u64),
            Self::Pair(old, new) => [*old, *new].serialize(serializer),
            Self::None => serializer.serialize_i64(-1),
        }
    }
}

impl fmt::Display for SiblingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(p) => write!(f, "{p}"),
            Self::Pair(old, new) => write!(f, "{old} -> {new}"),
            Self::None => f.write_str("-1"),
        }
    }
}

/// A field carried by a [`Diff`]: either a plain value or a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// An identifying or full-row value.
    Value(Option<String>),
    /// Left and right values of a changed field.
    Change(Option<String>, Option<String>),
}

impl FieldValue {
    /// Returns `true` for [`FieldValue::Change`].
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Change(..))
    }

    /// The current value: the plain value, or the right side of a change.
    pub fn current(&self) -> Option<&str> {
        match self {
            Self::Value(v) | Self::Change(_, v) => v.as_deref(),
        }
    }

    /// The left side of a change; `None` for plain values.
    pub fn previous(&self) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::Change(old, _) => old.as_deref(),
        }
    }
}

/// One entry of a changeset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diff {
    /// What happened to the key.
    #[serde(rename = "action")]
    pub diff_type: DiffType,
    /// For adds and deletes the full row; otherwise the identifying fields
    /// plus a [`FieldValue::Change`] per changed field.
    pub fields: IndexMap<String, FieldValue>,
    /// One-based row number in the right source (left source for deletes).
    pub row: usize,
    /// Position among siblings.
    pub sibling_position: SiblingPosition,
}

impl Diff {
    /// Capitalised action label.
    pub fn action(&self) -> &'static str {
        self.diff_type.label()
    }

    /// A single field by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Only the changed fields.
    pub fn changes(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .filter(|(_, v)| v.is_change())
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// Counts of diffs by type plus the number of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiffSummary {
    /// Number of adds.
    pub adds: usize,
    /// Number of deletes.
    pub deletes: usize,
    /// Number of updates.
    pub updates: usize,
    /// Number of moves.
    pub moves: usize,
    /// Number of warnings from both sources and the diff itself.
    pub warnings: usize,
}

impl DiffSummary {
    /// Tallies `diffs`; `warnings` is taken as given.
    pub fn tally<'a, I>(diffs: I, warnings: usize) -> Self
    where
        I: IntoIterator<Item = &'a Diff>,
    {
        let mut summary = Self {
            warnings,
            ..Self::default()
        };
        for diff in diffs {
            match diff.diff_type {
                DiffType::Add => summary.adds += 1,
                DiffType::Delete => summary.deletes += 1,
                DiffType::Update => summary.updates += 1,
                DiffType::Move => summary.moves += 1,
            }
        }
        summary
    }

    /// Count for one diff type.
    pub fn count(&self, diff_type: DiffType) -> usize {
        match diff_type {
            DiffType::Add => self.adds,
            DiffType::Delete => self.deletes,
            DiffType::Update => self.updates,
            DiffType::Move => self.moves,
        }
    }

    /// Total number of diffs.
    pub fn total(&self) -> usize {
        self.adds + self.deletes + self.updates + self.moves
    }

    /// Returns `true` if no diffs were found.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} deleted, {} updated, {} moved, {} warning(s)",
            self.adds, self.deletes, self.updates, self.moves, self.warnings
        )
    }
}
