use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dgraph_core::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct Tier {
    name: &'static str,
    nodes: usize,
}

const TIERS: [Tier; 3] = [
    Tier {
        name: "small",
        nodes: 1_000,
    },
    Tier {
        name: "medium",
        nodes: 50_000,
    },
    Tier {
        name: "large",
        nodes: 500_000,
    },
];

fn chain(nodes: usize) -> Graph {
    (0..nodes.saturating_sub(1)).map(|n| (n, n + 1)).collect()
}

fn ring(nodes: usize) -> Graph {
    let mut g = chain(nodes);
    g.link(nodes - 1, 0);
    g
}

/// Sparse random graph with about three out-edges per node.
fn random(nodes: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::with_size(nodes);
    for _ in 0..nodes * 3 {
        let src = rng.gen_range(0..nodes);
        let dst = rng.gen_range(0..nodes);
        g.link(src, dst);
    }
    g
}

fn bench_strong_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("scc.tiered");

    for tier in TIERS {
        group.throughput(Throughput::Elements(tier.nodes as u64));

        let shapes = [
            ("chain", chain(tier.nodes)),
            ("ring", ring(tier.nodes)),
            ("random", random(tier.nodes, 0x5CC0_u64 + tier.nodes as u64)),
        ];
        for (shape, graph) in &shapes {
            group.bench_with_input(
                BenchmarkId::new(*shape, tier.name),
                graph,
                |b, graph| b.iter(|| black_box(graph.strong_components())),
            );
        }
    }

    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("store.mutation");
    let base = random(10_000, 0xD6A9);

    group.bench_function("remove_every_tenth", |b| {
        b.iter_batched(
            || base.clone(),
            |mut g| {
                for node in (0..10_000).step_by(10) {
                    g.remove(node);
                }
                black_box(g)
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_strong_components, bench_mutation);
criterion_main!(benches);
