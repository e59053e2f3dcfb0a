//! Mutated copies of generated tables.
//!
//! Each left row is deleted, updated, re-parented or kept. Kept rows may be
//! swapped with a kept neighbour, and new rows are appended per parent. The
//! applied mutations are counted so callers can check a diff against them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rowdiff_core::Cells;

use super::{GeneratorConfig, generate_table, parent_name, row};

/// Per-row mutation probabilities.
#[derive(Debug, Clone, Copy)]
pub struct MutationConfig {
    /// Probability that a left row is absent on the right.
    pub delete_rate: f64,
    /// Probability that a left row has one value changed on the right.
    pub update_rate: f64,
    /// Probability that a left row moves under another parent on the right.
    pub reparent_rate: f64,
    /// Probability that an unmodified row swaps places with the next one.
    pub swap_rate: f64,
    /// New rows appended per parent, as a fraction of the group size.
    pub add_rate: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            delete_rate: 0.02,
            update_rate: 0.05,
            reparent_rate: 0.01,
            swap_rate: 0.02,
            add_rate: 0.03,
        }
    }
}

/// Mutations applied while deriving the right table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationCounts {
    /// Rows appended.
    pub adds: usize,
    /// Rows dropped.
    pub deletes: usize,
    /// Rows with one changed value.
    pub updates: usize,
    /// Rows moved under a different parent.
    pub reparents: usize,
    /// Adjacent unmodified rows swapped.
    pub swaps: usize,
}

/// A generated table and its mutated copy.
#[derive(Debug, Clone)]
pub struct TablePair {
    /// Original rows, header first.
    pub left: Vec<Cells>,
    /// Mutated rows, header first.
    pub right: Vec<Cells>,
    /// What was applied to produce `right`.
    pub counts: MutationCounts,
}

enum Fate {
    Delete,
    Update,
    Reparent(usize),
    Keep,
}

/// Generates a table and a mutated copy of it.
///
/// The right table keeps the left's parent grouping: per parent, surviving
/// rows in (mostly) original order, then rows re-parented into it, then new
/// rows.
pub fn generate_pair(config: &GeneratorConfig, mutations: &MutationConfig) -> TablePair {
    let left = generate_table(config);
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));
    let num_fields = config.num_fields.max(1);
    let mut counts = MutationCounts::default();

    // (row, unmodified) per parent.
    let mut kept: Vec<Vec<(Cells, bool)>> = vec![Vec::new(); config.num_parents];
    let mut incoming: Vec<Vec<Cells>> = vec![Vec::new(); config.num_parents];

    for cells in left.iter().skip(1) {
        let parent = parent_index(cells);
        match fate(&mut rng, mutations, config.num_parents, parent) {
            Fate::Delete => counts.deletes += 1,
            Fate::Update => {
                counts.updates += 1;
                let mut cells = cells.clone();
                let column = 2 + rng.gen_range(0..num_fields);
                if let Some(Some(value)) = cells.get_mut(column) {
                    value.push('*');
                }
                kept[parent].push((cells, false));
            }
            Fate::Reparent(target) => {
                counts.reparents += 1;
                let mut cells = cells.clone();
                cells[0] = Some(parent_name(target));
                incoming[target].push(cells);
            }
            Fate::Keep => kept[parent].push((cells.clone(), true)),
        }
    }

    let mut right = Vec::with_capacity(left.len());
    right.extend(left.first().cloned());
    for (index, (mut group, moved_in)) in kept.into_iter().zip(incoming).enumerate() {
        counts.swaps += swap_neighbours(&mut group, mutations.swap_rate, &mut rng);
        let size = group.len();
        right.extend(group.into_iter().map(|(cells, _)| cells));
        right.extend(moved_in);

        let name = parent_name(index);
        for n in 0..additions(size, mutations.add_rate, &mut rng) {
            right.push(row(&name, &format!("N{index:05}-{n:03}"), num_fields, &mut rng));
            counts.adds += 1;
        }
    }

    TablePair {
        left,
        right,
        counts,
    }
}

/// Inverse of `parent_name`.
fn parent_index(cells: &Cells) -> usize {
    cells
        .first()
        .and_then(Option::as_deref)
        .and_then(|name| name.strip_prefix('P'))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or_default()
}

fn fate(rng: &mut StdRng, mutations: &MutationConfig, num_parents: usize, parent: usize) -> Fate {
    let roll: f64 = rng.gen_range(0.0..1.0);
    let mut threshold = mutations.delete_rate;
    if roll < threshold {
        return Fate::Delete;
    }
    threshold += mutations.update_rate;
    if roll < threshold {
        return Fate::Update;
    }
    threshold += mutations.reparent_rate;
    if roll < threshold && num_parents > 1 {
        let offset = rng.gen_range(1..num_parents);
        return Fate::Reparent((parent + offset) % num_parents);
    }
    Fate::Keep
}

/// Swaps non-overlapping pairs of adjacent unmodified rows.
fn swap_neighbours(group: &mut [(Cells, bool)], rate: f64, rng: &mut StdRng) -> usize {
    let mut swaps = 0;
    let mut i = 0;
    while i + 1 < group.len() {
        if group[i].1 && group[i + 1].1 && rng.gen_bool(rate) {
            group.swap(i, i + 1);
            swaps += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    swaps
}

fn additions(group_size: usize, rate: f64, rng: &mut StdRng) -> usize {
    let expected = group_size as f64 * rate;
    let whole = expected.floor();
    let extra = usize::from(rng.gen_bool(expected - whole));
    whole as usize + extra
}
