//! Source configuration.
//!
//! [`SourceConfig`] is the typed configuration consumed by
//! [`crate::Source::build`]. [`SourceOptions`] is the loosely typed option bag
//! accepted from JSON or command-line flags; it converts into a
//! [`SourceConfig`] and rejects inconsistent key specifications.
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::fields::FieldSpec;
use crate::filter::FilterExpr;

/// Which fields make up a row's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    /// A flat key: no parent fields, every key field is a child field.
    Flat(Vec<FieldSpec>),
    /// A hierarchical key: parent fields followed by child fields.
    ParentChild {
        /// Fields identifying the sibling group.
        parent: Vec<FieldSpec>,
        /// Fields identifying the row within its group.
        child: Vec<FieldSpec>,
    },
}

impl KeySpec {
    /// A flat key over `fields`.
    pub fn flat<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self::Flat(fields.into_iter().map(Into::into).collect())
    }

    /// A single-parent, single-child key.
    pub fn parent_child(parent: impl Into<FieldSpec>, child: impl Into<FieldSpec>) -> Self {
        Self::ParentChild {
            parent: vec![parent.into()],
            child: vec![child.into()],
        }
    }

    /// Parent field specs (empty for a flat key).
    pub fn parent_fields(&self) -> &[FieldSpec] {
        match self {
            Self::Flat(_) => &[],
            Self::ParentChild { parent, .. } => parent,
        }
    }

    /// Child field specs.
    pub fn child_fields(&self) -> &[FieldSpec] {
        match self {
            Self::Flat(fields) => fields,
            Self::ParentChild { child, .. } => child,
        }
    }

    /// Ensures at least one child field is present.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingKeyFields`] for an empty flat key,
    /// [`ConfigError::EmptyChildFields`] for a hierarchical key with no child.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Flat(fields) if fields.is_empty() => Err(ConfigError::MissingKeyFields),
            Self::ParentChild { child, .. } if child.is_empty() => {
                Err(ConfigError::EmptyChildFields)
            }
            Self::Flat(_) | Self::ParentChild { .. } => Ok(()),
        }
    }
}

/// Typed configuration for building a [`crate::Source`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Key field layout.
    pub keys: KeySpec,
    /// Field names; when `None` the first row is consumed as the header.
    pub field_names: Option<Vec<String>>,
    /// Compare keys, field names and values case-sensitively.
    pub case_sensitive: bool,
    /// Trim leading/trailing whitespace from every cell.
    pub trim_whitespace: bool,
    /// Skip the first row when `field_names` is supplied.
    pub ignore_header: bool,
    /// Rows are kept only if these fields match.
    pub include: Vec<(FieldSpec, FilterExpr)>,
    /// Rows are dropped if any of these fields match.
    pub exclude: Vec<(FieldSpec, FilterExpr)>,
}

impl SourceConfig {
    /// Configuration with the given keys and default options.
    pub fn new(keys: KeySpec) -> Self {
        Self {
            keys,
            field_names: None,
            case_sensitive: true,
            trim_whitespace: false,
            ignore_header: false,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

/// One field or a list of fields, as accepted by the option bag.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single field.
    One(FieldSpec),
    /// Several fields.
    Many(Vec<FieldSpec>),
}

impl OneOrMany {
    fn into_specs(self) -> Vec<FieldSpec> {
        let specs = match self {
            Self::One(spec) => vec![spec],
            Self::Many(specs) => specs,
        };
        specs.into_iter().map(normalize_spec).collect()
    }
}

/// Digit-only names written as strings still address columns by position.
fn normalize_spec(spec: FieldSpec) -> FieldSpec {
    match spec {
        FieldSpec::Name(name) => FieldSpec::parse(&name),
        FieldSpec::Index(_) => spec,
    }
}

/// Option bag for a source, deserializable from JSON.
///
/// Unknown keys are ignored. Filter values are regular expressions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Single key field (flat key).
    pub key_field: Option<FieldSpec>,
    /// Key fields (flat key).
    pub key_fields: Option<OneOrMany>,
    /// Single parent field.
    pub parent_field: Option<FieldSpec>,
    /// Parent fields.
    pub parent_fields: Option<OneOrMany>,
    /// Single child field.
    pub child_field: Option<FieldSpec>,
    /// Child fields.
    pub child_fields: Option<OneOrMany>,
    /// Explicit field names.
    pub field_names: Option<Vec<String>>,
    /// Defaults to `true`.
    pub case_sensitive: Option<bool>,
    /// Defaults to `false`.
    pub trim_whitespace: Option<bool>,
    /// Defaults to `false`.
    pub ignore_header: Option<bool>,
    /// Field → regex; keep rows whose field matches.
    pub include: IndexMap<String, String>,
    /// Field → regex; drop rows whose field matches.
    pub exclude: IndexMap<String, String>,
}

impl SourceOptions {
    fn keys(&mut self) -> Result<KeySpec, ConfigError> {
        let keys = merge_specs(self.key_field.take(), self.key_fields.take());
        let parent = merge_specs(self.parent_field.take(), self.parent_fields.take());
        let child = merge_specs(self.child_field.take(), self.child_fields.take());

        let keys = match (keys, parent, child) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(ConfigError::ConflictingKeyFields);
            }
            (Some(keys), None, None) => KeySpec::Flat(keys),
            (None, parent, Some(child)) => KeySpec::ParentChild {
                parent: parent.unwrap_or_default(),
                child,
            },
            (None, Some(_), None) => return Err(ConfigError::EmptyChildFields),
            (None, None, None) => return Err(ConfigError::MissingKeyFields),
        };
        keys.validate()?;
        Ok(keys)
    }
}

fn merge_specs(single: Option<FieldSpec>, many: Option<OneOrMany>) -> Option<Vec<FieldSpec>> {
    match (single, many) {
        (None, None) => None,
        (Some(spec), None) => Some(vec![normalize_spec(spec)]),
        (single, Some(many)) => {
            let mut specs: Vec<FieldSpec> = single.map(normalize_spec).into_iter().collect();
            specs.extend(many.into_specs());
            Some(specs)
        }
    }
}

fn compile_filters(map: &IndexMap<String, String>) -> Result<Vec<(FieldSpec, FilterExpr)>, ConfigError> {
    map.iter()
        .map(|(field, pattern)| Ok((FieldSpec::parse(field), FilterExpr::pattern(field, pattern)?)))
        .collect()
}

impl TryFrom<SourceOptions> for SourceConfig {
    type Error = ConfigError;

    fn try_from(mut options: SourceOptions) -> Result<Self, Self::Error> {
        let keys = options.keys()?;
        Ok(Self {
            keys,
            field_names: options.field_names,
            case_sensitive: options.case_sensitive.unwrap_or(true),
            trim_whitespace: options.trim_whitespace.unwrap_or(false),
            ignore_header: options.ignore_header.unwrap_or(false),
            include: compile_filters(&options.include)?,
            exclude: compile_filters(&options.exclude)?,
        })
    }
}
