//! Diff engine benchmarks over generated table pairs.
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rowdiff_bench::{MutationConfig, SizeTier, generate_pair};
use rowdiff_core::{Cells, DiffOptions, KeySpec, Source, SourceConfig, diff_sources};

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_sources");
    let config = SourceConfig::new(KeySpec::parent_child("Parent", "Child"));

    for (name, tier) in [
        ("S", SizeTier::Small),
        ("M", SizeTier::Medium),
        ("L", SizeTier::Large),
    ] {
        let pair = generate_pair(&tier.config(42), &MutationConfig::default());
        let left = Source::build(pair.left, &config).expect("left");
        let right = Source::build(pair.right, &config).expect("right");
        let key_fields = left.key_field_names();
        let diff_fields = right.field_names().to_vec();
        let sources = (left, right);

        group.throughput(Throughput::Elements((sources.0.len() + sources.1.len()) as u64));

        group.bench_with_input(BenchmarkId::new("all", name), &sources, |b, (l, r)| {
            b.iter(|| {
                diff_sources(l, r, &key_fields, &diff_fields, &DiffOptions::default())
                    .expect("diff")
            });
        });

        let no_moves = DiffOptions {
            include_moves: false,
            ..DiffOptions::default()
        };
        group.bench_with_input(BenchmarkId::new("no_moves", name), &sources, |b, (l, r)| {
            b.iter(|| diff_sources(l, r, &key_fields, &diff_fields, &no_moves).expect("diff"));
        });

        let lenient =
            DiffOptions::default().with_equality("Field1", |l, r| l.map(str::len) == r.map(str::len));
        group.bench_with_input(BenchmarkId::new("equality_fn", name), &sources, |b, (l, r)| {
            b.iter(|| diff_sources(l, r, &key_fields, &diff_fields, &lenient).expect("diff"));
        });
    }
    group.finish();
}

fn bench_reparent_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("reparent_heavy");
    let config = SourceConfig::new(KeySpec::parent_child("Parent", "Child"));
    let mutations = MutationConfig {
        reparent_rate: 0.25,
        ..MutationConfig::default()
    };

    let pair = generate_pair(&SizeTier::Medium.config(7), &mutations);
    let left = Source::build(pair.left, &config).expect("left");
    let right = Source::build(pair.right, &config).expect("right");
    let key_fields = left.key_field_names();
    let diff_fields = right.field_names().to_vec();

    group.bench_function("M", |b| {
        b.iter(|| {
            diff_sources(&left, &right, &key_fields, &diff_fields, &DiffOptions::default())
                .expect("diff")
        });
    });
    group.finish();
}

/// Every child of one parent moves to another; cost should stay linear.
fn bench_bulk_reparent(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_reparent");
    group.sample_size(10);
    let config = SourceConfig::new(KeySpec::parent_child("Parent", "Child"));

    for rows in [20_000usize, 80_000] {
        let table = |parent: &str| -> Vec<Cells> {
            let header = ["Parent", "Child", "D"].map(|s| Some(s.to_owned())).to_vec();
            std::iter::once(header)
                .chain((0..rows).map(|i| {
                    vec![
                        Some(parent.to_owned()),
                        Some(format!("C{i:07}")),
                        Some("same".to_owned()),
                    ]
                }))
                .collect()
        };
        let left = Source::build(table("A"), &config).expect("left");
        let right = Source::build(table("B"), &config).expect("right");
        let key_fields = left.key_field_names();
        let diff_fields = right.field_names().to_vec();

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_function(BenchmarkId::from_parameter(rows), |b| {
            b.iter(|| {
                diff_sources(&left, &right, &key_fields, &diff_fields, &DiffOptions::default())
                    .expect("diff")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diff, bench_reparent_heavy, bench_bulk_reparent);
criterion_main!(benches);
