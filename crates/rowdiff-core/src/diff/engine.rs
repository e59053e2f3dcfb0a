use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};

use crate::error::DiffError;
use crate::key::{ChildId, ParentKey, RowKey};
use crate::source::Source;

use super::builder::DiffBuilder;
use super::options::DiffOptions;
use super::row::{SideRow, diff_row, full_row, id_fields};
use super::types::Diff;

/// A left-only row awaiting a same-child match under another parent.
struct PendingDelete<'a> {
    key: &'a RowKey,
    cells: &'a [Option<String>],
    position: usize,
}

/// Positions of the keys two sibling groups have in common, in each side's
/// own order.
struct CommonSiblings<'a> {
    left: HashMap<&'a RowKey, usize>,
    right: HashMap<&'a RowKey, usize>,
}

impl<'a> CommonSiblings<'a> {
    fn new(left: Option<&'a IndexSet<RowKey>>, right: Option<&'a IndexSet<RowKey>>) -> Self {
        match (left, right) {
            (Some(left), Some(right)) => Self {
                left: common_positions(left, right),
                right: common_positions(right, left),
            },
            (Some(_), None) | (None, Some(_)) | (None, None) => Self {
                left: HashMap::new(),
                right: HashMap::new(),
            },
        }
    }

    fn moved(&self, key: &RowKey) -> bool {
        self.left.get(key) != self.right.get(key)
    }
}

fn common_positions<'a>(
    ordered: &'a IndexSet<RowKey>,
    other: &IndexSet<RowKey>,
) -> HashMap<&'a RowKey, usize> {
    ordered
        .iter()
        .filter(|key| other.contains(*key))
        .enumerate()
        .map(|(i, key)| (key, i))
        .collect()
}

/// Compares two indexed sources and returns one [`Diff`] per changed key.
///
/// `key_fields` name the fields that identify a row in update and move
/// diffs; `diff_fields` name the fields compared for updates (key fields
/// among them are ignored). The result is ordered by deletions in left row
/// order followed by the remaining diffs in right row order.
///
/// # Algorithm
///
/// 1. Every left key missing on the right is recorded as a delete (when
///    enabled) and pushed onto a per-child-identity stack of potential moves.
/// 2. Every right key is then visited in right row order:
///    - present on the left: compared over the diff fields, and checked for a
///      change of position among the siblings both sides share;
///    - right only: matched against the most recent potential move with the
///      same child identity, which turns the pending delete into an update
///      or move of the re-parented row; failing that, recorded as an add.
///
/// # Errors
///
/// Returns [`DiffError`] if the sources disagree on case sensitivity or on
/// the number of parent fields.
pub fn diff_sources(
    left: &Source,
    right: &Source,
    key_fields: &[String],
    diff_fields: &[String],
    options: &DiffOptions,
) -> Result<IndexMap<RowKey, Diff>, DiffError> {
    if left.case_sensitive() != right.case_sensitive() {
        return Err(DiffError::CaseSensitivityMismatch);
    }
    if left.parent_fields().len() != right.parent_fields().len() {
        return Err(DiffError::ParentFieldCountMismatch {
            left: left.parent_fields().len(),
            right: right.parent_fields().len(),
        });
    }

    let case_sensitive = left.case_sensitive();
    let compare_fields: Vec<String> = diff_fields
        .iter()
        .filter(|field| !key_fields.contains(*field))
        .cloned()
        .collect();
    let mut reparent_fields = left.parent_field_names();
    reparent_fields.extend(compare_fields.iter().cloned());
    let child_fields = right.child_field_names();

    let mut builders: IndexMap<RowKey, DiffBuilder> = IndexMap::new();
    let mut potential_moves: HashMap<ChildId, Vec<PendingDelete<'_>>> = HashMap::new();

    for (row, (key, cells)) in left.lines().iter().enumerate() {
        if right.lines().contains_key(key) {
            continue;
        }
        let position = left.sibling_index(key).unwrap_or_default();
        if options.include_deletes {
            let side = SideRow {
                source: left,
                cells,
            };
            builders.insert(key.clone(), DiffBuilder::deleted(full_row(side), row, position));
        }
        potential_moves
            .entry(key.child())
            .or_default()
            .push(PendingDelete {
                key,
                cells,
                position,
            });
    }

    let mut common: HashMap<ParentKey, CommonSiblings<'_>> = HashMap::new();
    // Pending deletes claimed by a re-parented row; dropped when building.
    let mut matched: HashSet<&RowKey> = HashSet::new();

    for (row, (key, cells)) in right.lines().iter().enumerate() {
        let position = right.sibling_index(key).unwrap_or_default();
        let right_row = SideRow {
            source: right,
            cells,
        };

        if let Some(left_cells) = left.get(key) {
            let left_row = SideRow {
                source: left,
                cells: left_cells,
            };
            let mut builder = DiffBuilder::stable(id_fields(key_fields, right_row), row, position);
            if options.include_updates && !compare_fields.is_empty() {
                builder.record_changes(diff_row(
                    &compare_fields,
                    left_row,
                    right_row,
                    case_sensitive,
                    &options.equality,
                ));
            }
            if options.include_moves {
                let parent = key.parent();
                let siblings = common.entry(parent).or_insert_with_key(|parent| {
                    CommonSiblings::new(left.siblings(parent), right.siblings(parent))
                });
                if siblings.moved(key) {
                    builder.record_move(left.sibling_index(key).unwrap_or_default());
                }
            }
            if builder.is_material() {
                builders.insert(key.clone(), builder);
            }
            continue;
        }

        let pending = potential_moves.get_mut(&key.child()).and_then(Vec::pop);
        if let Some(pending) = pending {
            matched.insert(pending.key);
            tracing::trace!(from = %pending.key, to = %key, "re-parented row");

            let left_row = SideRow {
                source: left,
                cells: pending.cells,
            };
            let changes = if options.include_updates && !compare_fields.is_empty() {
                diff_row(
                    &reparent_fields,
                    left_row,
                    right_row,
                    case_sensitive,
                    &options.equality,
                )
            } else {
                IndexMap::new()
            };
            if !changes.is_empty() {
                let mut builder =
                    DiffBuilder::stable(id_fields(&child_fields, right_row), row, position);
                builder.record_changes(changes);
                builders.insert(key.clone(), builder);
            } else if options.include_moves {
                let mut builder =
                    DiffBuilder::stable(id_fields(key_fields, right_row), row, position);
                builder.record_move(pending.position);
                builders.insert(key.clone(), builder);
            }
            continue;
        }

        if options.include_adds {
            builders.insert(
                key.clone(),
                DiffBuilder::added(full_row(right_row), row, position),
            );
        }
    }

    let diffs: IndexMap<RowKey, Diff> = builders
        .into_iter()
        .filter(|(key, _)| !matched.contains(key))
        .filter_map(|(key, builder)| builder.build().map(|diff| (key, diff)))
        .collect();

    tracing::debug!(
        left = left.len(),
        right = right.len(),
        diffs = diffs.len(),
        reparented = matched.len(),
        "diffed sources"
    );
    Ok(diffs)
}
