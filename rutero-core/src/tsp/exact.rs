use itertools::Itertools;
use log::{debug, info, warn};
use petgraph::graph::NodeIndex;

use super::TspSolution;
use crate::{Cost, EXACT_TSP_SOFT_LIMIT, Error, Result, RouteGraph};

/// Brute-force travelling salesman circuit from `start`.
///
/// Every permutation of the other nodes (in insertion order, lexicographic
/// over positions) is closed into `[start, ..perm, start]`. A candidate with
/// a missing edge is discarded outright, not penalised. The cheapest valid
/// circuit wins; ties keep the one generated first.
///
/// Runs in O((n-1)!) edge lookups with no pruning. Graphs past
/// [`EXACT_TSP_SOFT_LIMIT`] nodes still run to completion.
///
/// # Errors
///
/// - `UnknownNode` if `start` is not in the graph
/// - `NoHamiltonianCircuit` if no candidate closes
pub fn solve_tsp_exact(graph: &RouteGraph, start: NodeIndex) -> Result<TspSolution> {
    graph.validate_node(start)?;

    let node_count = graph.node_count();
    if node_count > EXACT_TSP_SOFT_LIMIT {
        warn!(
            "Exhaustive search over {node_count} nodes enumerates {} circuits",
            factorial_label(node_count - 1)
        );
    }

    let others: Vec<NodeIndex> = graph.nodes().filter(|&node| node != start).collect();
    let mut candidate = Vec::with_capacity(node_count + 1);
    let mut best: Option<(Vec<NodeIndex>, Cost)> = None;
    let mut evaluated = 0;
    let mut skipped = 0;

    for perm in others.iter().copied().permutations(others.len()) {
        evaluated += 1;

        candidate.clear();
        candidate.push(start);
        candidate.extend(perm);
        candidate.push(start);

        let Some(cost) = circuit_cost(graph, &candidate) else {
            skipped += 1;
            continue;
        };

        if best.as_ref().is_none_or(|&(_, best_cost)| cost < best_cost) {
            best = Some((candidate.clone(), cost));
        }
    }

    debug!("Exhaustive search: {evaluated} candidates, {skipped} broken by missing edges");

    let (route, cost) = best.ok_or_else(|| Error::NoHamiltonianCircuit {
        start: graph.label(start).to_string(),
    })?;

    info!(
        "Best circuit from '{}': cost {cost} over {} legs",
        graph.label(start),
        route.len() - 1
    );

    Ok(TspSolution {
        route,
        cost,
        evaluated,
        skipped,
    })
}

/// `None` as soon as a consecutive pair has no edge
fn circuit_cost(graph: &RouteGraph, circuit: &[NodeIndex]) -> Option<Cost> {
    circuit
        .windows(2)
        .map(|pair| graph.edge_cost(pair[0], pair[1]))
        .sum()
}

fn factorial_label(n: usize) -> String {
    (1..=n)
        .try_fold(1u64, |acc, k| acc.checked_mul(k as u64))
        .map_or_else(|| format!("more than {}", u64::MAX), |f| f.to_string())
}
