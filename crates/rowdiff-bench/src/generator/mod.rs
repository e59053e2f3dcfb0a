//! Parent/child table generator.
//!
//! Produces header-first row sets keyed by a `Parent` column and a globally
//! unique `Child` column, followed by descriptive value columns.

mod mutate;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rowdiff_core::Cells;

pub use mutate::{MutationConfig, MutationCounts, TablePair, generate_pair};

/// Configuration for the table generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of distinct parent keys.
    pub num_parents: usize,
    /// Average children per parent; each group gets between half and
    /// one and a half times this many rows.
    pub children_per_parent: usize,
    /// Number of value columns after `Parent` and `Child` (at least one).
    pub num_fields: usize,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~500 rows, 4 value columns
    Small,
    /// ~10 000 rows, 6 value columns
    Medium,
    /// ~50 000 rows, 8 value columns
    Large,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                seed,
                num_parents: 50,
                children_per_parent: 10,
                num_fields: 4,
            },
            SizeTier::Medium => GeneratorConfig {
                seed,
                num_parents: 500,
                children_per_parent: 20,
                num_fields: 6,
            },
            SizeTier::Large => GeneratorConfig {
                seed,
                num_parents: 2000,
                children_per_parent: 25,
                num_fields: 8,
            },
        }
    }
}

const WORDS: &[&str] = &[
    "alpha", "bravo", "cedar", "delta", "ember", "fjord", "garnet", "harbor", "indigo", "juniper",
    "kestrel", "lumen", "meadow", "nickel", "onyx", "pewter",
];

/// Generates a table from the given configuration, header row first.
///
/// Rows are grouped by parent in parent order. All randomness is
/// deterministic, seeded from `config.seed`.
pub fn generate_table(config: &GeneratorConfig) -> Vec<Cells> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let num_fields = config.num_fields.max(1);

    let mut rows = vec![header(num_fields)];
    let mut child_id = 0usize;
    for parent in 0..config.num_parents {
        let half = config.children_per_parent / 2;
        let count = rng.gen_range(half..=config.children_per_parent + half);
        for _ in 0..count {
            rows.push(row(
                &parent_name(parent),
                &format!("C{child_id:07}"),
                num_fields,
                &mut rng,
            ));
            child_id += 1;
        }
    }
    rows
}

/// `Parent`, `Child`, `Field1` … `FieldN`.
fn header(num_fields: usize) -> Cells {
    ["Parent".to_owned(), "Child".to_owned()]
        .into_iter()
        .chain((1..=num_fields).map(|i| format!("Field{i}")))
        .map(Some)
        .collect()
}

fn parent_name(index: usize) -> String {
    format!("P{index:05}")
}

fn row(parent: &str, child: &str, num_fields: usize, rng: &mut StdRng) -> Cells {
    let mut cells = Vec::with_capacity(num_fields + 2);
    cells.push(Some(parent.to_owned()));
    cells.push(Some(child.to_owned()));
    for _ in 0..num_fields {
        let word = WORDS[rng.gen_range(0..WORDS.len())];
        cells.push(Some(format!("{word}-{}", rng.gen_range(0..1000))));
    }
    cells
}
