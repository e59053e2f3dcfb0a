use indexmap::IndexMap;

use super::types::{Diff, DiffType, FieldValue, SiblingPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Add or delete: reported as-is.
    Structural(DiffType),
    /// Present on both sides; the type depends on what was recorded.
    Stable,
}

/// Per-key findings accumulated across passes, materialized once at the end.
#[derive(Debug, Clone)]
pub(super) struct DiffBuilder {
    kind: Kind,
    fields: IndexMap<String, FieldValue>,
    row: usize,
    position: usize,
    moved_from: Option<usize>,
    changed: bool,
}

impl DiffBuilder {
    /// `row` and `position` are zero-based.
    pub fn added(fields: IndexMap<String, FieldValue>, row: usize, position: usize) -> Self {
        Self::structural(DiffType::Add, fields, row, position)
    }

    pub fn deleted(fields: IndexMap<String, FieldValue>, row: usize, position: usize) -> Self {
        Self::structural(DiffType::Delete, fields, row, position)
    }

    fn structural(
        diff_type: DiffType,
        fields: IndexMap<String, FieldValue>,
        row: usize,
        position: usize,
    ) -> Self {
        Self {
            kind: Kind::Structural(diff_type),
            fields,
            row,
            position,
            moved_from: None,
            changed: false,
        }
    }

    /// A key present on both sides, identified by `fields`.
    pub fn stable(fields: IndexMap<String, FieldValue>, row: usize, position: usize) -> Self {
        Self {
            kind: Kind::Stable,
            fields,
            row,
            position,
            moved_from: None,
            changed: false,
        }
    }

    pub fn record_changes(&mut self, changes: IndexMap<String, FieldValue>) {
        if changes.is_empty() {
            return;
        }
        self.changed = true;
        self.fields.extend(changes);
    }

    /// Marks the row as moved from the zero-based sibling index `old_position`.
    pub fn record_move(&mut self, old_position: usize) {
        self.moved_from = Some(old_position);
    }

    /// Returns `true` if building would produce a diff.
    pub fn is_material(&self) -> bool {
        match self.kind {
            Kind::Structural(_) => true,
            Kind::Stable => self.changed || self.moved_from.is_some(),
        }
    }

    pub fn build(self) -> Option<Diff> {
        let diff_type = match self.kind {
            Kind::Structural(diff_type) => diff_type,
            Kind::Stable if self.changed => DiffType::Update,
            Kind::Stable if self.moved_from.is_some() => DiffType::Move,
            Kind::Stable => return None,
        };
        let sibling_position = match self.moved_from {
            Some(old) => SiblingPosition::from_indexes(&[old, self.position]),
            None => SiblingPosition::from_indexes(&[self.position]),
        };
        Some(Diff {
            diff_type,
            fields: self.fields,
            row: self.row + 1,
            sibling_position,
        })
    }
}
