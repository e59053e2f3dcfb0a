#![allow(clippy::expect_used)]
#![allow(clippy::panic)]


use indexmap::IndexMap;

use crate::config::SourceConfig;
use crate::key::RowKey;
use crate::source::{Cells, Source};
use crate::test_helpers::{parent_child_config, source};

use super::engine::diff_sources;
use super::options::DiffOptions;
use super::types::{Diff, DiffType, FieldValue};

pub(crate) fn key(values: &[&str], parent_len: usize) -> RowKey {
    RowKey::new(values.iter().map(|v| (*v).to_owned()).collect(), parent_len)
}

/// Parent/child key with one parent field.
pub(crate) fn pc(parent: &str, child: &str) -> RowKey {
    key(&[parent, child], 1)
}

/// Right field names followed by left-only field names.
pub(crate) fn all_fields(left: &Source, right: &Source) -> Vec<String> {
    let mut fields = right.field_names().to_vec();
    for name in left.field_names() {
        if !fields.contains(name) {
            fields.push(name.clone());
        }
    }
    fields
}

pub(crate) fn diff_with(
    left: Vec<Cells>,
    right: Vec<Cells>,
    config: &SourceConfig,
    options: &DiffOptions,
) -> IndexMap<RowKey, Diff> {
    let left = source(left, config);
    let right = source(right, config);
    let key_fields = left.key_field_names();
    let fields = all_fields(&left, &right);
    diff_sources(&left, &right, &key_fields, &fields, options).expect("diff")
}

/// Parent/child diff with default options.
pub(crate) fn diff_pc(left: Vec<Cells>, right: Vec<Cells>) -> IndexMap<RowKey, Diff> {
    diff_with(left, right, &parent_child_config(), &DiffOptions::default())
}

pub(crate) fn count(diffs: &IndexMap<RowKey, Diff>, diff_type: DiffType) -> usize {
    diffs.values().filter(|d| d.diff_type == diff_type).count()
}

pub(crate) fn get<'a>(diffs: &'a IndexMap<RowKey, Diff>, key: &RowKey) -> &'a Diff {
    diffs
        .get(key)
        .unwrap_or_else(|| panic!("expected a diff for {key}"))
}

pub(crate) fn value(diff: &Diff, field: &str) -> Option<String> {
    diff.field(field)
        .and_then(FieldValue::current)
        .map(str::to_owned)
}
