//! Checks generated tables index cleanly and that diffs of mutated pairs
//! report exactly the applied mutations.
#![allow(clippy::expect_used)]

use rowdiff_bench::{MutationConfig, SizeTier, generate_pair, generate_table};
use rowdiff_core::{Changeset, ChangesetOptions, KeySpec, Source, SourceConfig};

fn config() -> SourceConfig {
    SourceConfig::new(KeySpec::parent_child("Parent", "Child"))
}

#[test]
fn generated_tables_have_unique_keys() {
    for seed in [42, 123, 999] {
        let rows = generate_table(&SizeTier::Small.config(seed));
        let expected = rows.len() - 1;
        let source = Source::build(rows, &config()).expect("source");
        assert_eq!(source.len(), expected, "seed={seed}");
        assert!(source.warnings().is_empty(), "seed={seed}");
    }
}

#[test]
fn diff_of_pair_matches_mutations() {
    for seed in [42, 123, 999, 7777] {
        let pair = generate_pair(&SizeTier::Small.config(seed), &MutationConfig::default());
        let counts = pair.counts;
        let changeset =
            Changeset::from_rows(pair.left, pair.right, &config(), &ChangesetOptions::default())
                .expect("changeset");
        let summary = changeset.summary();

        assert_eq!(summary.adds, counts.adds, "seed={seed}");
        assert_eq!(summary.deletes, counts.deletes, "seed={seed}");
        // A re-parented row differs in its parent field.
        assert_eq!(summary.updates, counts.updates + counts.reparents, "seed={seed}");
        assert_eq!(summary.moves, 2 * counts.swaps, "seed={seed}");
        assert_eq!(summary.warnings, 0, "seed={seed}");
    }
}

#[test]
fn heavy_mutation_still_matches() {
    let mutations = MutationConfig {
        delete_rate: 0.2,
        update_rate: 0.2,
        reparent_rate: 0.1,
        swap_rate: 0.3,
        add_rate: 0.2,
    };
    let pair = generate_pair(&SizeTier::Small.config(5), &mutations);
    let counts = pair.counts;
    let changeset =
        Changeset::from_rows(pair.left, pair.right, &config(), &ChangesetOptions::default())
            .expect("changeset");
    let summary = changeset.summary();
    assert_eq!(summary.adds, counts.adds);
    assert_eq!(summary.deletes, counts.deletes);
    assert_eq!(summary.updates, counts.updates + counts.reparents);
    assert_eq!(summary.moves, 2 * counts.swaps);
}

#[test]
fn medium_self_diff_is_empty() {
    let rows = generate_table(&SizeTier::Medium.config(42));
    let changeset = Changeset::from_rows(
        rows.clone(),
        rows,
        &config(),
        &ChangesetOptions::default(),
    )
    .expect("changeset");
    assert!(changeset.is_empty());
}
