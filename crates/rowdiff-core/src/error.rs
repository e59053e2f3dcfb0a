//! Error types for source construction and diffing.
//!
//! Configuration problems ([`ConfigError`]) and precondition failures
//! ([`DiffError`]) are fatal: the operation stops and no partial result is
//! produced. Duplicate keys are not errors; they surface as warnings on the
//! [`crate::Source`] instead.

/// Invalid source configuration detected while resolving fields or filters.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A field name could not be located among the source's field names.
    #[error("could not locate field '{field}' in source field names: {}", available.join(", "))]
    UnknownField {
        /// The field specification as written.
        field: String,
        /// The field names that were available.
        available: Vec<String>,
    },

    /// A positional field index is past the last column.
    #[error("field index {index} is out of range for {count} field(s)")]
    IndexOutOfRange {
        /// The requested zero-based index.
        index: usize,
        /// Number of field names in the source.
        count: usize,
    },

    /// Neither key fields nor parent/child fields were configured.
    #[error("no key fields specified: supply key_field(s) or parent_field(s) and child_field(s)")]
    MissingKeyFields,

    /// Key fields were configured together with parent/child fields.
    #[error("key_field(s) cannot be combined with parent_field(s)/child_field(s)")]
    ConflictingKeyFields,

    /// Parent fields were configured without any child field.
    #[error("child_field(s) must name at least one field")]
    EmptyChildFields,

    /// A filter pattern failed to compile.
    #[error("invalid filter expression for field '{field}': {detail}")]
    InvalidFilter {
        /// Field the filter was attached to.
        field: String,
        /// Regex compiler message.
        detail: String,
    },

    /// No field names were supplied and there was no header row to read them from.
    #[error("no field names supplied and the input has no header row")]
    MissingHeader,
}

/// Which input of a diff an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The left ("from") input.
    Left,
    /// The right ("to") input.
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("left (from)"),
            Self::Right => f.write_str("right (to)"),
        }
    }
}

/// Preconditions that both sources of a diff must satisfy.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The two sources disagree on case sensitivity.
    #[error("left and right must have the same settings for case-sensitivity")]
    CaseSensitivityMismatch,

    /// The two sources have a different number of parent fields.
    #[error(
        "left and right must have the same settings for parent/child fields \
         (left has {left} parent field(s), right has {right})"
    )]
    ParentFieldCountMismatch {
        /// Parent field count of the left source.
        left: usize,
        /// Parent field count of the right source.
        right: usize,
    },

    /// One of the sources ended up without any field names.
    #[error("no field names found in {side} source")]
    NoFieldNames {
        /// The offending input.
        side: Side,
    },
}

/// Any error produced by the crate's public entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// See [`DiffError`].
    #[error(transparent)]
    Diff(#[from] DiffError),
}
