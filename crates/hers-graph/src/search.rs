//! Search trait and the Dijkstra / A* implementations.
//!
//! # Pluggability
//!
//! Callers route through the [`PathSearch`] trait, so the ranker and the
//! demo can be handed either [`Dijkstra`], [`AStar`] or an [`Algorithm`]
//! value picked at runtime.
//!
//! # Queue discipline
//!
//! Both strategies share one loop over a `BinaryHeap` with lazy deletion:
//! improved nodes are pushed again and stale entries are dropped when popped
//! if the node is already visited.  No decrease-key is needed.
//!
//! Blocked edges are skipped outright instead of being given an infinite
//! weight, which keeps every relaxed weight finite and non-negative.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use hers_core::{Algorithm, EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::PathResult;

// ── PathSearch trait ──────────────────────────────────────────────────────────

/// A shortest-path strategy over a [`RoadNetwork`].
///
/// Implementations must be `Send + Sync` so a ranking fan-out can share them
/// across Rayon worker threads.
pub trait PathSearch: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    /// Least-time path from `source` to `destination`.
    ///
    /// Never fails: unknown ids and unreachable destinations both produce a
    /// result with `found == false`.
    fn find_path(&self, network: &RoadNetwork, source: NodeId, destination: NodeId) -> PathResult;
}

/// Uniform-cost search.
#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra;

/// Heuristic-guided search.
///
/// `h(n) = haversine(n, destination) / base_speed`.  Every edge weight is
/// `distance / base_speed * multiplier` with `multiplier ≥ 1` (enforced by
/// [`check_multiplier`](crate::check_multiplier)), so `h` never
/// overestimates as long as edge lengths are at least the straight-line
/// distance between their endpoints.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStar;

impl PathSearch for Dijkstra {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn find_path(&self, network: &RoadNetwork, source: NodeId, destination: NodeId) -> PathResult {
        search(network, source, destination, Algorithm::Dijkstra)
    }
}

impl PathSearch for AStar {
    fn algorithm(&self) -> Algorithm {
        Algorithm::AStar
    }

    fn find_path(&self, network: &RoadNetwork, source: NodeId, destination: NodeId) -> PathResult {
        search(network, source, destination, Algorithm::AStar)
    }
}

impl PathSearch for Algorithm {
    fn algorithm(&self) -> Algorithm {
        *self
    }

    fn find_path(&self, network: &RoadNetwork, source: NodeId, destination: NodeId) -> PathResult {
        search(network, source, destination, *self)
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Heap entry.  `Ord` is reversed so `BinaryHeap` pops the smallest
/// priority; ties go to the lower `NodeId` for deterministic expansion order.
#[derive(Copy, Clone, Debug)]
struct QueueEntry {
    priority: f64,
    node:     NodeId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

fn search(network: &RoadNetwork, source: NodeId, destination: NodeId, algorithm: Algorithm) -> PathResult {
    let started = Instant::now();

    if !network.contains(source) || !network.contains(destination) {
        tracing::debug!(%algorithm, %source, %destination, "search on unknown node");
        return PathResult::not_found(algorithm, 0, started.elapsed());
    }
    if source == destination {
        return PathResult::trivial(source, algorithm);
    }

    let target = network.node_pos[destination.index()];
    let speed  = network.base_speed_mps;
    let heuristic = |node: NodeId| -> f64 {
        match algorithm {
            Algorithm::Dijkstra => 0.0,
            Algorithm::AStar    => network.node_pos[node.index()].distance_m(target) / speed,
        }
    };

    let n = network.node_count();
    // cost[v] = best known travel time (s) to v.
    let mut cost      = vec![f64::INFINITY; n];
    // prev_edge[v] = edge that reached v; INVALID until relaxed.
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut visited   = vec![false; n];
    let mut expanded  = 0usize;
    let mut reached   = false;

    cost[source.index()] = 0.0;
    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry { priority: heuristic(source), node: source });

    while let Some(QueueEntry { node, .. }) = heap.pop() {
        if visited[node.index()] {
            continue; // stale entry
        }
        visited[node.index()] = true;
        expanded += 1;

        if node == destination {
            reached = true;
            break;
        }

        let g = cost[node.index()];
        for e in network.out_range(node) {
            if network.edge_blocked[e] {
                continue;
            }
            let next = network.edge_to[e];
            if visited[next.index()] {
                continue;
            }
            let tentative = g + network.edge_weight_secs[e];
            if tentative < cost[next.index()] {
                cost[next.index()]      = tentative;
                prev_edge[next.index()] = EdgeId(e as u32);
                heap.push(QueueEntry { priority: tentative + heuristic(next), node: next });
            }
        }
    }

    let result = match reached.then(|| reconstruct(network, &prev_edge, source, destination)).flatten() {
        Some((nodes, distance_m)) => PathResult {
            nodes,
            total_time_secs: cost[destination.index()],
            total_distance_m: distance_m,
            nodes_expanded: expanded,
            compute_time: started.elapsed(),
            algorithm,
            found: true,
        },
        None => PathResult::not_found(algorithm, expanded, started.elapsed()),
    };

    tracing::debug!(
        %algorithm,
        %source,
        %destination,
        found = result.found,
        expanded,
        elapsed_us = result.compute_time.as_micros() as u64,
        "path search finished"
    );
    result
}

/// Walk `prev_edge` back from `destination`, summing physical lengths.
///
/// Returns `None` if the predecessor chain is broken (or longer than the
/// graph, which would mean a cycle).
fn reconstruct(
    network:     &RoadNetwork,
    prev_edge:   &[EdgeId],
    source:      NodeId,
    destination: NodeId,
) -> Option<(Vec<NodeId>, f64)> {
    let mut nodes    = vec![destination];
    let mut distance = 0.0;
    let mut cur      = destination;
    while cur != source {
        let e = prev_edge[cur.index()];
        if !e.is_valid() || nodes.len() > network.node_count() {
            return None;
        }
        distance += network.edge_length_m[e.index()];
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    Some((nodes, distance))
}
