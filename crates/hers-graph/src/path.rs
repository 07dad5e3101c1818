//! The result of a single shortest-path query.

use std::fmt;
use std::time::Duration;

use hers_core::{Algorithm, NodeId};

/// Nodes rendered by [`PathResult::route_summary`] before eliding.
const SUMMARY_NODES: usize = 10;

/// An ordered node path plus cost totals and search diagnostics.
///
/// `found == false` always comes with an empty `nodes` vector.  A found path
/// from a node to itself has exactly one node and zero cost, so callers must
/// test `found` rather than `nodes.is_empty()` or `total_time_secs == 0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Source..destination inclusive.
    pub nodes: Vec<NodeId>,
    /// Sum of traversed edge weights, seconds.  `INFINITY` when not found.
    pub total_time_secs: f64,
    /// Sum of traversed edge lengths, metres (unaffected by congestion).
    pub total_distance_m: f64,
    /// Queue pops that marked a node visited.
    pub nodes_expanded: usize,
    /// Wall-clock search time.
    pub compute_time: Duration,
    pub algorithm: Algorithm,
    pub found: bool,
}

impl PathResult {
    /// Result for a destination that could not be reached.
    pub fn not_found(algorithm: Algorithm, nodes_expanded: usize, compute_time: Duration) -> Self {
        Self {
            nodes: Vec::new(),
            total_time_secs: f64::INFINITY,
            total_distance_m: 0.0,
            nodes_expanded,
            compute_time,
            algorithm,
            found: false,
        }
    }

    /// Result for `source == destination`.
    pub fn trivial(node: NodeId, algorithm: Algorithm) -> Self {
        Self {
            nodes: vec![node],
            total_time_secs: 0.0,
            total_distance_m: 0.0,
            nodes_expanded: 0,
            compute_time: Duration::ZERO,
            algorithm,
            found: true,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Directed `(from, to)` pairs along the path.
    pub fn hops(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn eta_minutes(&self) -> f64 {
        self.total_time_secs / 60.0
    }

    pub fn distance_km(&self) -> f64 {
        self.total_distance_m / 1000.0
    }

    /// `[a → b → … → z]`, eliding the middle of long paths.
    pub fn route_summary(&self) -> String {
        let head: Vec<String> = self
            .nodes
            .iter()
            .take(SUMMARY_NODES)
            .map(|n| n.to_string())
            .collect();
        let mut s = format!("[{}", head.join(" → "));
        if self.nodes.len() > SUMMARY_NODES {
            if let Some(last) = self.nodes.last() {
                s.push_str(&format!(" ... → {last}"));
            }
        }
        s.push(']');
        s
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.found {
            return write!(f, "{}: no path found", self.algorithm);
        }
        write!(
            f,
            "{}: {} nodes, {:.2} km, {:.2} min ({} expanded in {:.3} ms)",
            self.algorithm,
            self.nodes.len(),
            self.distance_km(),
            self.eta_minutes(),
            self.nodes_expanded,
            self.compute_time.as_secs_f64() * 1000.0,
        )
    }
}
