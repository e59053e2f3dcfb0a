//! Keyed, order-preserving index over one side of a diff.
//!
//! A [`Source`] is built once from raw rows and is read-only afterwards.
//!
//! # Indexing
//!
//! 1. Field names come from [`SourceConfig::field_names`] or, failing that,
//!    from the first row, which is then not treated as data.
//! 2. Key, parent and child fields are resolved to column indexes.
//! 3. Each remaining row is trimmed (optionally), filtered, keyed and
//!    appended to [`Source::lines`] and to its parent group in
//!    [`Source::index`]. Both preserve arrival order.
//! 4. A repeated key is kept under a disambiguated key (`key[n]`) and recorded
//!    as a warning, so no row is lost.
use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::config::SourceConfig;
use crate::error::ConfigError;
use crate::fields::FieldResolver;
use crate::filter::RowFilter;
use crate::key::{ParentKey, RowKey, fold_case};

/// The cells of one row, aligned with [`Source::field_names`].
pub type Cells = Vec<Option<String>>;

/// One indexed side of a diff.
#[derive(Debug, Clone)]
pub struct Source {
    field_names: Vec<String>,
    field_lookup: HashMap<String, usize>,
    key_fields: Vec<usize>,
    parent_fields: Vec<usize>,
    child_fields: Vec<usize>,
    case_sensitive: bool,
    trim_whitespace: bool,
    ignore_header: bool,
    lines: IndexMap<RowKey, Cells>,
    index: IndexMap<ParentKey, IndexSet<RowKey>>,
    warnings: Vec<String>,
    line_count: usize,
    skip_count: usize,
    dup_count: usize,
}

/// Builds a [`Source`] from `rows`. Shorthand for [`Source::build`].
///
/// # Errors
///
/// See [`Source::build`].
pub fn build_source<I>(rows: I, config: &SourceConfig) -> Result<Source, ConfigError>
where
    I: IntoIterator<Item = Cells>,
{
    Source::build(rows, config)
}

impl Source {
    /// Indexes `rows` according to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key specification is empty, a key or
    /// filter field cannot be resolved, or no field names are available.
    pub fn build<I>(rows: I, config: &SourceConfig) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Cells>,
    {
        config.keys.validate()?;

        let mut rows = rows.into_iter();
        let mut line_num = 0usize;

        let field_names = if let Some(names) = &config.field_names {
            if config.ignore_header && rows.next().is_some() {
                line_num += 1;
            }
            names.clone()
        } else {
            let Some(header) = rows.next() else {
                return Err(ConfigError::MissingHeader);
            };
            line_num += 1;
            header
                .into_iter()
                .enumerate()
                .map(|(i, cell)| cell.unwrap_or_else(|| i.to_string()))
                .collect()
        };

        let resolver = FieldResolver::new(&field_names, config.case_sensitive);
        let parent_fields = resolver.resolve_all(config.keys.parent_fields())?;
        let child_fields = resolver.resolve_all(config.keys.child_fields())?;
        let key_fields = parent_fields.iter().chain(&child_fields).copied().collect();
        let filter = RowFilter::resolve(
            &resolver,
            &config.include,
            &config.exclude,
            config.case_sensitive,
        )?;

        let mut field_lookup = HashMap::with_capacity(field_names.len());
        for (i, name) in field_names.iter().enumerate() {
            field_lookup.entry(name.clone()).or_insert(i);
        }

        let mut source = Self {
            field_names,
            field_lookup,
            key_fields,
            parent_fields,
            child_fields,
            case_sensitive: config.case_sensitive,
            trim_whitespace: config.trim_whitespace,
            ignore_header: config.ignore_header,
            lines: IndexMap::new(),
            index: IndexMap::new(),
            warnings: Vec::new(),
            line_count: 0,
            skip_count: 0,
            dup_count: 0,
        };

        for row in rows {
            line_num += 1;
            source.index_row(row, line_num, &filter);
        }

        tracing::debug!(
            lines = source.line_count,
            skipped = source.skip_count,
            duplicates = source.dup_count,
            groups = source.index.len(),
            "indexed source"
        );
        Ok(source)
    }

    fn index_row(&mut self, mut cells: Cells, line_num: usize, filter: &RowFilter) {
        cells.resize(self.field_names.len(), None);
        if self.trim_whitespace {
            for cell in cells.iter_mut().flatten() {
                let trimmed = cell.trim();
                if trimmed.len() != cell.len() {
                    *cell = trimmed.to_owned();
                }
            }
        }

        if !filter.accepts(&cells) {
            self.skip_count += 1;
            return;
        }

        let values = self
            .key_fields
            .iter()
            .map(|&col| {
                let value = cells.get(col).and_then(Option::as_deref).unwrap_or_default();
                if self.case_sensitive {
                    value.to_owned()
                } else {
                    fold_case(value)
                }
            })
            .collect();
        let mut key = RowKey::new(values, self.parent_fields.len());

        if self.lines.contains_key(&key) {
            tracing::warn!(%key, line = line_num, "duplicate key");
            self.warnings
                .push(format!("Duplicate key '{key}' encountered at line {line_num}"));
            self.dup_count += 1;
            key = key.with_occurrence(self.dup_count);
        }

        self.index.entry(key.parent()).or_default().insert(key.clone());
        self.lines.insert(key, cells);
        self.line_count += 1;
    }

    /// Field names in column order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Column index of the first field named exactly `name`.
    pub fn field_position(&self, name: &str) -> Option<usize> {
        self.field_lookup.get(name).copied()
    }

    /// Column indexes of the key fields (parent fields first).
    pub fn key_fields(&self) -> &[usize] {
        &self.key_fields
    }

    /// Column indexes of the parent fields.
    pub fn parent_fields(&self) -> &[usize] {
        &self.parent_fields
    }

    /// Column indexes of the child fields.
    pub fn child_fields(&self) -> &[usize] {
        &self.child_fields
    }

    /// Names of the key fields.
    pub fn key_field_names(&self) -> Vec<String> {
        self.names_of(&self.key_fields)
    }

    /// Names of the parent fields.
    pub fn parent_field_names(&self) -> Vec<String> {
        self.names_of(&self.parent_fields)
    }

    /// Names of the child fields.
    pub fn child_field_names(&self) -> Vec<String> {
        self.names_of(&self.child_fields)
    }

    fn names_of(&self, columns: &[usize]) -> Vec<String> {
        columns
            .iter()
            .filter_map(|&col| self.field_names.get(col).cloned())
            .collect()
    }

    /// Whether keys and values are compared case-sensitively.
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether cells were trimmed during indexing.
    pub fn trim_whitespace(&self) -> bool {
        self.trim_whitespace
    }

    /// Whether a header row was skipped in favour of supplied field names.
    pub fn ignore_header(&self) -> bool {
        self.ignore_header
    }

    /// Indexed rows by key, in row order.
    pub fn lines(&self) -> &IndexMap<RowKey, Cells> {
        &self.lines
    }

    /// Sibling groups: parent key to the keys under it, in row order.
    pub fn index(&self) -> &IndexMap<ParentKey, IndexSet<RowKey>> {
        &self.index
    }

    /// Keys under `parent`, in row order.
    pub fn siblings(&self, parent: &ParentKey) -> Option<&IndexSet<RowKey>> {
        self.index.get(parent)
    }

    /// The row stored under `key`.
    pub fn get(&self, key: &RowKey) -> Option<&[Option<String>]> {
        self.lines.get(key).map(Vec::as_slice)
    }

    /// Zero-based position of `key` in the source's overall row order.
    pub fn row_index(&self, key: &RowKey) -> Option<usize> {
        self.lines.get_index_of(key)
    }

    /// Zero-based position of `key` among its siblings.
    pub fn sibling_index(&self, key: &RowKey) -> Option<usize> {
        self.index.get(&key.parent())?.get_index_of(key)
    }

    /// Value of the field named `field` in `row`.
    pub fn value<'r>(&self, row: &'r [Option<String>], field: &str) -> Option<&'r str> {
        let col = self.field_position(field)?;
        row.get(col).and_then(Option::as_deref)
    }

    /// Warnings collected during indexing.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of rows indexed.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of rows rejected by filters.
    pub fn skip_count(&self) -> usize {
        self.skip_count
    }

    /// Number of rows whose key collided with an earlier row.
    pub fn dup_count(&self) -> usize {
        self.dup_count
    }

    /// Number of indexed rows.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no rows were indexed.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every indexed row as a field-name → value map, in row order.
    pub fn to_maps(&self) -> Vec<IndexMap<String, Option<String>>> {
        self.lines
            .values()
            .map(|cells| {
                self.field_names
                    .iter()
                    .cloned()
                    .zip(cells.iter().cloned())
                    .collect()
            })
            .collect()
    }
}
