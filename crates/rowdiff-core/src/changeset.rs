//! High-level comparison of two sources.
//!
//! [`Changeset`] owns both indexed sources, decides which fields to compare,
//! runs [`diff_sources`] and offers filtered views over the result.
use indexmap::IndexMap;

use crate::config::SourceConfig;
use crate::diff::{Diff, DiffOptions, DiffSummary, DiffType, diff_sources};
use crate::error::{DiffError, Error, Side};
use crate::key::{RowKey, fold_case};
use crate::source::{Cells, Source};

/// Options for [`Changeset`]: engine options plus field selection.
#[derive(Debug, Clone, Default)]
pub struct ChangesetOptions {
    /// Category switches and custom equality.
    pub diff: DiffOptions,
    /// Field names never compared, matched case-insensitively.
    pub ignore_fields: Vec<String>,
    /// Compare only fields present in both sources.
    pub common_fields_only: bool,
}

/// The differences between a left (from) and a right (to) source.
#[derive(Debug, Clone)]
pub struct Changeset {
    left: Source,
    right: Source,
    key_fields: Vec<String>,
    diff_fields: Vec<String>,
    options: DiffOptions,
    diffs: IndexMap<RowKey, Diff>,
    warnings: Vec<String>,
}

impl Changeset {
    /// Compares two indexed sources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Diff`] if either source has no field names or the
    /// sources cannot be compared (see [`diff_sources`]).
    pub fn new(left: Source, right: Source, options: &ChangesetOptions) -> Result<Self, Error> {
        if left.field_names().is_empty() {
            return Err(DiffError::NoFieldNames { side: Side::Left }.into());
        }
        if right.field_names().is_empty() {
            return Err(DiffError::NoFieldNames { side: Side::Right }.into());
        }

        let (diff_fields, warnings) = select_diff_fields(&left, &right, options);
        let key_fields = left.key_field_names();
        let diffs = diff_sources(&left, &right, &key_fields, &diff_fields, &options.diff)?;

        Ok(Self {
            left,
            right,
            key_fields,
            diff_fields,
            options: options.diff.clone(),
            diffs,
            warnings,
        })
    }

    /// Indexes both row sets with the same configuration and compares them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if either side cannot be indexed, otherwise
    /// as [`Changeset::new`].
    pub fn from_rows<L, R>(
        left: L,
        right: R,
        config: &SourceConfig,
        options: &ChangesetOptions,
    ) -> Result<Self, Error>
    where
        L: IntoIterator<Item = Cells>,
        R: IntoIterator<Item = Cells>,
    {
        let left = Source::build(left, config)?;
        let right = Source::build(right, config)?;
        Self::new(left, right, options)
    }

    /// Recomputes the diff over the same sources and fields with new options.
    ///
    /// # Errors
    ///
    /// See [`diff_sources`].
    pub fn rediff(&mut self, options: DiffOptions) -> Result<(), Error> {
        self.diffs = diff_sources(
            &self.left,
            &self.right,
            &self.key_fields,
            &self.diff_fields,
            &options,
        )?;
        self.options = options;
        Ok(())
    }

    /// The left (from) source.
    pub fn left(&self) -> &Source {
        &self.left
    }

    /// The right (to) source.
    pub fn right(&self) -> &Source {
        &self.right
    }

    /// Key field names, taken from the left source.
    pub fn key_fields(&self) -> &[String] {
        &self.key_fields
    }

    /// Field names compared for updates.
    pub fn diff_fields(&self) -> &[String] {
        &self.diff_fields
    }

    /// Options of the most recent diff.
    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Every diff, keyed by row key.
    pub fn diffs(&self) -> &IndexMap<RowKey, Diff> {
        &self.diffs
    }

    /// Diffs of one type.
    pub fn of_type(&self, diff_type: DiffType) -> impl Iterator<Item = (&RowKey, &Diff)> {
        self.diffs
            .iter()
            .filter(move |(_, diff)| diff.diff_type == diff_type)
    }

    pub fn adds(&self) -> impl Iterator<Item = (&RowKey, &Diff)> {
        self.of_type(DiffType::Add)
    }

    pub fn deletes(&self) -> impl Iterator<Item = (&RowKey, &Diff)> {
        self.of_type(DiffType::Delete)
    }

    pub fn updates(&self) -> impl Iterator<Item = (&RowKey, &Diff)> {
        self.of_type(DiffType::Update)
    }

    pub fn moves(&self) -> impl Iterator<Item = (&RowKey, &Diff)> {
        self.of_type(DiffType::Move)
    }

    /// Counts per diff type plus the number of warnings.
    pub fn summary(&self) -> DiffSummary {
        DiffSummary::tally(self.diffs.values(), self.warning_count())
    }

    fn warning_count(&self) -> usize {
        self.left.warnings().len() + self.right.warnings().len() + self.warnings.len()
    }

    /// Warnings from the left source, the right source and the diff, in
    /// that order.
    pub fn warnings(&self) -> Vec<&str> {
        self.left
            .warnings()
            .iter()
            .chain(self.right.warnings())
            .chain(&self.warnings)
            .map(String::as_str)
            .collect()
    }

    /// Warnings raised while selecting the fields to compare.
    pub fn diff_warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns `true` if no differences were found.
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }
}

/// Chooses the compared fields: the union of both sides (right order first)
/// or only the common fields, minus ignored names. Fields present on one side
/// only are reported as warnings when comparing the union.
fn select_diff_fields(
    left: &Source,
    right: &Source,
    options: &ChangesetOptions,
) -> (Vec<String>, Vec<String>) {
    let ignored: Vec<String> = options.ignore_fields.iter().map(|f| fold_case(f)).collect();
    let is_ignored = |field: &str| ignored.contains(&fold_case(field));
    let left_names = left.field_names();
    let right_names = right.field_names();

    let mut fields: Vec<String> = Vec::new();
    let mut warnings = Vec::new();

    if options.common_fields_only {
        for field in right_names {
            if left_names.contains(field) && !is_ignored(field) && !fields.contains(field) {
                fields.push(field.clone());
            }
        }
        return (fields, warnings);
    }

    for field in right_names.iter().chain(left_names) {
        if is_ignored(field) || fields.contains(field) {
            continue;
        }
        let side = match (left_names.contains(field), right_names.contains(field)) {
            (false, _) => Some(Side::Left),
            (true, false) => Some(Side::Right),
            (true, true) => None,
        };
        if let Some(side) = side {
            tracing::warn!(field = %field, %side, "field missing from one source");
            warnings.push(format!("Field '{field}' is missing from the {side} source"));
        }
        fields.push(field.clone());
    }
    (fields, warnings)
}
