//! Field specifications and their resolution to column indexes.
use std::fmt;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::key::fold_case;

/// A reference to a column, either by zero-based position or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    /// Zero-based column index.
    Index(usize),
    /// Field name, matched against the source's field names.
    Name(String),
}

impl FieldSpec {
    /// Parses textual input: a string made only of ASCII digits is an index,
    /// anything else a name.
    pub fn parse(text: &str) -> Self {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = text.parse() {
                return Self::Index(index);
            }
        }
        Self::Name(text.to_owned())
    }
}

impl From<usize> for FieldSpec {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(n) => f.write_str(n),
        }
    }
}

/// Resolves [`FieldSpec`]s against an ordered list of field names.
///
/// Name lookup honours the source's case sensitivity. When a name occurs more
/// than once the first column wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    field_names: &'a [String],
    case_sensitive: bool,
}

impl<'a> FieldResolver<'a> {
    /// Creates a resolver over `field_names`.
    pub fn new(field_names: &'a [String], case_sensitive: bool) -> Self {
        Self {
            field_names,
            case_sensitive,
        }
    }

    /// Resolves a single spec to a column index.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownField`] for a name that matches no column,
    /// [`ConfigError::IndexOutOfRange`] for an index past the last column.
    pub fn resolve(&self, spec: &FieldSpec) -> Result<usize, ConfigError> {
        match spec {
            FieldSpec::Index(index) => {
                if *index < self.field_names.len() {
                    Ok(*index)
                } else {
                    Err(ConfigError::IndexOutOfRange {
                        index: *index,
                        count: self.field_names.len(),
                    })
                }
            }
            FieldSpec::Name(name) => self
                .field_names
                .iter()
                .position(|candidate| self.names_match(candidate, name))
                .ok_or_else(|| ConfigError::UnknownField {
                    field: name.clone(),
                    available: self.field_names.to_vec(),
                }),
        }
    }

    /// Resolves every spec in order, failing on the first unresolvable one.
    ///
    /// # Errors
    ///
    /// See [`FieldResolver::resolve`].
    pub fn resolve_all(&self, specs: &[FieldSpec]) -> Result<Vec<usize>, ConfigError> {
        specs.iter().map(|spec| self.resolve(spec)).collect()
    }

    fn names_match(&self, candidate: &str, wanted: &str) -> bool {
        if self.case_sensitive {
            candidate == wanted
        } else {
            fold_case(candidate) == fold_case(wanted)
        }
    }
}
