use std::collections::HashMap;

use indexmap::IndexMap;

use crate::key::fold_case;
use crate::source::Source;

use super::options::EqualityFn;
use super::types::FieldValue;

/// A row together with the source that knows its field layout.
#[derive(Clone, Copy)]
pub(super) struct SideRow<'a> {
    pub source: &'a Source,
    pub cells: &'a [Option<String>],
}

impl<'a> SideRow<'a> {
    pub fn value(&self, field: &str) -> Option<&'a str> {
        self.source.value(self.cells, field)
    }
}

/// Compares `fields` between two rows and returns a change per differing field.
///
/// A registered equality predicate wins over the default comparison, which
/// is string equality honouring `case_sensitive`. A missing value only equals
/// another missing value.
pub(super) fn diff_row(
    fields: &[String],
    left: SideRow<'_>,
    right: SideRow<'_>,
    case_sensitive: bool,
    equality: &HashMap<String, EqualityFn>,
) -> IndexMap<String, FieldValue> {
    let mut changes = IndexMap::new();
    for field in fields {
        let left_value = left.value(field);
        let right_value = right.value(field);
        let equal = match equality.get(field) {
            Some(eq) => eq(left_value, right_value),
            None => values_equal(left_value, right_value, case_sensitive),
        };
        if !equal {
            changes.insert(
                field.clone(),
                FieldValue::Change(left_value.map(str::to_owned), right_value.map(str::to_owned)),
            );
        }
    }
    changes
}

fn values_equal(left: Option<&str>, right: Option<&str>, case_sensitive: bool) -> bool {
    match (left, right) {
        (Some(l), Some(r)) if case_sensitive => l == r,
        (Some(l), Some(r)) => l == r || fold_case(l) == fold_case(r),
        (None, None) => true,
        (Some(_), None) | (None, Some(_)) => false,
    }
}

/// The named fields of `row` that exist in its source, as plain values.
pub(super) fn id_fields(names: &[String], row: SideRow<'_>) -> IndexMap<String, FieldValue> {
    names
        .iter()
        .filter(|name| row.source.field_position(name).is_some())
        .map(|name| (name.clone(), FieldValue::Value(row.value(name).map(str::to_owned))))
        .collect()
}

/// Every field of `row`, as plain values.
pub(super) fn full_row(row: SideRow<'_>) -> IndexMap<String, FieldValue> {
    row.source
        .field_names()
        .iter()
        .zip(row.cells)
        .map(|(name, cell)| (name.clone(), FieldValue::Value(cell.clone())))
        .collect()
}
