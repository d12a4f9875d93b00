use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rutero_core::prelude::*;

const RING: &str = include_str!("../../data/ring_undirected.json");

/// Complete undirected graph with deterministic, uneven weights
fn complete_graph(n: usize) -> RouteGraph {
    let mut graph = RouteGraph::undirected();
    let labels: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
    for label in &labels {
        graph.add_node(label);
    }
    for i in 0..n {
        for j in i + 1..n {
            let weight = ((i * 37 + j * 101) % 89 + 1) as Cost;
            graph.add_edge(&labels[i], &labels[j], weight);
        }
    }
    graph
}

fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("tsp_exact");
    group.sample_size(10);

    for size in [6, 7, 8, 9] {
        let graph = complete_graph(size);
        let start = NodeIndex::new(0);
        group.bench_with_input(BenchmarkId::new("complete", size), &graph, |b, graph| {
            b.iter(|| solve_tsp_exact(black_box(graph), start).unwrap());
        });
    }

    let networks = load_route_networks_from_str(RING, false).unwrap();
    group.bench_function("ring_time", |b| {
        b.iter(|| solve_tsp_exact(black_box(&networks.time), NodeIndex::new(0)).unwrap());
    });

    group.finish();
}

fn bench_approx(c: &mut Criterion) {
    let mut group = c.benchmark_group("tsp_approx");

    for size in [10, 25, 50] {
        let graph = complete_graph(size);
        let start = NodeIndex::new(0);
        for (name, method) in [
            ("nearest_neighbor", ApproxMethod::NearestNeighbor),
            ("double_tree", ApproxMethod::DoubleTree),
        ] {
            let options = ApproxOptions {
                method,
                ..ApproxOptions::default()
            };
            group.bench_with_input(BenchmarkId::new(name, size), &graph, |b, graph| {
                b.iter(|| solve_tsp_approx_with(black_box(graph), start, &options).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_shortest_paths(c: &mut Criterion) {
    let networks = load_route_networks_from_str(RING, false).unwrap();
    let graph = &networks.distance;
    let source = NodeIndex::new(0);
    let target = NodeIndex::new(graph.node_count() / 2);

    c.bench_function("dijkstra_ring", |b| {
        b.iter(|| shortest_path(black_box(graph), source, target).unwrap());
    });
    c.bench_function("bellman_ford_ring", |b| {
        b.iter(|| shortest_paths_from(black_box(graph), source).unwrap());
    });

    let dense = complete_graph(50);
    c.bench_function("bellman_ford_complete_50", |b| {
        b.iter(|| shortest_paths_from(black_box(&dense), source).unwrap());
    });
}

criterion_group!(benches, bench_exact, bench_approx, bench_shortest_paths);
criterion_main!(benches);
