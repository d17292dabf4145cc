use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};

use rbheight::{GenericTree, RedBlackTree, SimpleBST};
use rbheight::harness::{self, Config};

pub fn bench_harness_run(c: &mut Criterion) {
    const NODES: &[usize] = &[100, 500, 1000];

    let mut group = c.benchmark_group("harness run");
    for &nodes in NODES {
        let config = Config {
            nodes,
            samples: 4,
            // Use seed to make this deterministic
            seed: Some(45930923092),
        };

        group.bench_with_input(BenchmarkId::from_parameter(nodes), &config, |b, config| {
            b.iter(|| harness::run(config).expect("bug: config should be valid"))
        });
    }
    group.finish();
}

pub fn bench_height(c: &mut Criterion) {
    const NODES: &[usize] = &[100, 1000, 10_000];

    let mut group = c.benchmark_group("height");
    for &nodes in NODES {
        let mut keys = harness::sequential_keys(nodes);
        let mut rng = rand::thread_rng();
        harness::shuffle(&mut keys, &mut rng);

        let tree: SimpleBST = keys.iter().copied().collect();
        group.bench_with_input(BenchmarkId::new("SimpleBST", nodes), &tree, |b, tree| {
            b.iter(|| black_box(tree.height()))
        });

        let tree: RedBlackTree = keys.iter().copied().collect();
        group.bench_with_input(BenchmarkId::new("RedBlackTree", nodes), &tree, |b, tree| {
            b.iter(|| black_box(tree.height()))
        });

        let mut tree = GenericTree::natural().expect("bug: i32 is not zero-sized");
        tree.extend(keys.iter().copied());
        group.bench_with_input(BenchmarkId::new("GenericTree", nodes), &tree, |b, tree| {
            b.iter(|| black_box(tree.max_depth()))
        });
    }
    group.finish();
}

pub fn bench_rebuild_balanced(c: &mut Criterion) {
    const NODES: &[usize] = &[100, 1000, 10_000];

    let mut group = c.benchmark_group("rebuild balanced");
    for &nodes in NODES {
        let mut tree = GenericTree::natural().expect("bug: i32 is not zero-sized");
        tree.extend(harness::sequential_keys(nodes).into_iter().rev().step_by(2));

        group.bench_with_input(BenchmarkId::from_parameter(nodes), &tree, |b, tree| {
            b.iter(|| tree.rebuild_balanced())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_harness_run, bench_height, bench_rebuild_balanced);
criterion_main!(benches);
