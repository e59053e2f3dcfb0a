//! Property-based tests for the diff engine.
//!
//! Generates small parent/child tables from narrow value pools so that
//! shared keys, re-parented children and duplicates all occur frequently.
#![allow(clippy::expect_used)]

use std::collections::HashSet;

use proptest::prelude::*;
use rowdiff_core::{
    Cells, ChildId, DiffOptions, DiffType, KeySpec, RowKey, SiblingPosition, Source, SourceConfig,
    diff_sources,
};

const PARENTS: [&str; 4] = ["P0", "P1", "P2", "P3"];
const CHILDREN: [&str; 6] = ["C0", "C1", "C2", "C3", "C4", "C5"];
const DESCRIPTIONS: [&str; 3] = ["alpha", "beta", "gamma"];

fn arb_rows() -> impl Strategy<Value = Vec<Cells>> {
    prop::collection::vec((0..PARENTS.len(), 0..CHILDREN.len(), 0..DESCRIPTIONS.len()), 0..12)
        .prop_map(|picks| {
            let header = vec![
                Some("Parent".to_owned()),
                Some("Child".to_owned()),
                Some("Description".to_owned()),
            ];
            std::iter::once(header)
                .chain(picks.into_iter().map(|(p, c, d)| {
                    vec![
                        Some(PARENTS[p].to_owned()),
                        Some(CHILDREN[c].to_owned()),
                        Some(DESCRIPTIONS[d].to_owned()),
                    ]
                }))
                .collect()
        })
}

fn build(rows: Vec<Cells>) -> Source {
    Source::build(rows, &SourceConfig::new(KeySpec::parent_child(0, 1))).expect("valid source")
}

fn run(left: &Source, right: &Source, options: &DiffOptions) -> Vec<(RowKey, DiffType)> {
    let keys = left.key_field_names();
    let fields = right.field_names().to_vec();
    diff_sources(left, right, &keys, &fields, options)
        .expect("diff")
        .into_iter()
        .map(|(key, diff)| (key, diff.diff_type))
        .collect()
}

fn left_only_children(left: &Source, right: &Source) -> HashSet<ChildId> {
    left.lines()
        .keys()
        .filter(|key| !right.lines().contains_key(*key))
        .map(RowKey::child)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A source compared with itself has no differences.
    #[test]
    fn diff_with_self_is_empty(rows in arb_rows()) {
        let left = build(rows.clone());
        let right = build(rows);
        prop_assert!(run(&left, &right, &DiffOptions::default()).is_empty());
    }

    /// Every reported key exists on the side its type implies.
    #[test]
    fn diffs_partition_known_keys(a in arb_rows(), b in arb_rows()) {
        let left = build(a);
        let right = build(b);
        for (key, diff_type) in run(&left, &right, &DiffOptions::default()) {
            let in_left = left.lines().contains_key(&key);
            let in_right = right.lines().contains_key(&key);
            match diff_type {
                DiffType::Delete => prop_assert!(in_left && !in_right, "delete {key}"),
                DiffType::Add => prop_assert!(in_right && !in_left, "add {key}"),
                DiffType::Update | DiffType::Move => prop_assert!(in_right, "{diff_type} {key}"),
            }
        }
    }

    /// A right-only key with no matching pending delete is an add, and only
    /// when adds are enabled.
    #[test]
    fn unmatched_right_keys_are_adds(
        a in arb_rows(),
        b in arb_rows(),
        include_adds in any::<bool>(),
    ) {
        let left = build(a);
        let right = build(b);
        let options = DiffOptions { include_adds, ..DiffOptions::default() };
        let diffs = run(&left, &right, &options);
        let pending = left_only_children(&left, &right);

        for key in right.lines().keys() {
            if left.lines().contains_key(key) || pending.contains(&key.child()) {
                continue;
            }
            let found = diffs.iter().find(|(k, _)| k == key).map(|(_, t)| *t);
            if include_adds {
                prop_assert_eq!(found, Some(DiffType::Add));
            } else {
                prop_assert_eq!(found, None);
            }
        }
    }

    /// Each left-only row ends up either deleted or paired with exactly one
    /// re-parented right row.
    #[test]
    fn left_only_rows_are_accounted_for_once(a in arb_rows(), b in arb_rows()) {
        let left = build(a);
        let right = build(b);
        let diffs = run(&left, &right, &DiffOptions::default());

        let left_only = left
            .lines()
            .keys()
            .filter(|key| !right.lines().contains_key(*key))
            .count();
        let deletes = diffs.iter().filter(|(_, t)| *t == DiffType::Delete).count();
        let reparented = diffs
            .iter()
            .filter(|(key, t)| {
                matches!(t, DiffType::Update | DiffType::Move) && !left.lines().contains_key(key)
            })
            .count();
        prop_assert_eq!(deletes + reparented, left_only);
    }

    /// Every diff from the engine carries a real sibling position.
    #[test]
    fn diffs_always_have_a_sibling_position(a in arb_rows(), b in arb_rows()) {
        let left = build(a);
        let right = build(b);
        let keys = left.key_field_names();
        let fields = right.field_names().to_vec();
        let diffs = diff_sources(&left, &right, &keys, &fields, &DiffOptions::default())
            .expect("diff");
        for (key, diff) in &diffs {
            prop_assert_ne!(diff.sibling_position, SiblingPosition::None, "{}", key);
        }
    }
}
