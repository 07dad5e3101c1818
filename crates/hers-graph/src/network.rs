//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the index range:
//!
//! ```text
//! node_out_start[n] .. node_out_start[n+1]
//! ```
//!
//! All edge arrays are sorted by source node and indexed by `EdgeId`.  The
//! sort is stable, so edges leaving the same node keep their insertion order
//! and "the first matching edge" is well defined for parallel roads.
//!
//! # Mutable state
//!
//! Only two per-edge columns ever change after [`RoadNetworkBuilder::build`]:
//! `edge_weight_secs` (congestion) and `edge_blocked` (closures).  Both are
//! written exclusively through [`RoadNetwork::set_congestion`],
//! [`RoadNetwork::block`] and [`RoadNetwork::unblock`], which keep
//! `weight = distance / base_speed * multiplier` intact.

use std::ops::Range;

use hers_core::{CoreError, EdgeId, GeoPoint, NodeId, RoutingConfig};

use crate::{GraphError, GraphResult};

// ── EdgeRef ───────────────────────────────────────────────────────────────────

/// Read-only snapshot of one directed edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeRef {
    pub id:          EdgeId,
    pub from:        NodeId,
    pub to:          NodeId,
    /// Physical length in metres.  Never changes.
    pub distance_m:  f64,
    /// Current travel time in seconds, including congestion.
    pub weight_secs: f64,
    pub blocked:     bool,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format.
///
/// Do not construct directly; use [`RoadNetworkBuilder`].  A built network
/// always has at least one node and every edge endpoint exists.
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub(crate) node_pos: Vec<GeoPoint>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub(crate) node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    /// Source node of each edge; used to walk predecessor edges backwards.
    pub(crate) edge_from: Vec<NodeId>,

    pub(crate) edge_to: Vec<NodeId>,

    /// Physical length in metres.
    pub(crate) edge_length_m: Vec<f64>,

    /// Travel time in seconds.  Search cost.
    pub(crate) edge_weight_secs: Vec<f64>,

    /// Closed roads stay in the graph but are skipped by search.
    pub(crate) edge_blocked: Vec<bool>,

    pub(crate) base_speed_mps: f64,
}

impl RoadNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    /// `true` if `node` was issued by the builder of this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    /// Free-flow speed used for weights and the A* heuristic (m/s).
    #[inline]
    pub fn base_speed_mps(&self) -> f64 {
        self.base_speed_mps
    }

    /// Free-flow travel time in seconds for a segment of `distance_m`.
    #[inline]
    pub fn free_flow_secs(&self, distance_m: f64) -> f64 {
        distance_m / self.base_speed_mps
    }

    pub fn node_pos(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// CSR index range of `node`'s outgoing edges; empty for unknown ids.
    #[inline]
    pub(crate) fn out_range(&self, node: NodeId) -> Range<usize> {
        if !self.contains(node) {
            return 0..0;
        }
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        start..end
    }

    /// Snapshot of a single edge, or `None` for an out-of-range id.
    pub fn edge(&self, edge: EdgeId) -> Option<EdgeRef> {
        let i = edge.index();
        (i < self.edge_count()).then(|| EdgeRef {
            id:          edge,
            from:        self.edge_from[i],
            to:          self.edge_to[i],
            distance_m:  self.edge_length_m[i],
            weight_secs: self.edge_weight_secs[i],
            blocked:     self.edge_blocked[i],
        })
    }

    /// Outgoing edges of `node`, blocked ones included.
    ///
    /// Unknown ids yield an empty iterator rather than an error.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = EdgeRef> + '_ {
        self.out_range(node).filter_map(|i| self.edge(EdgeId(i as u32)))
    }

    /// Number of outgoing edges of `node` (0 for unknown ids).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_range(node).len()
    }

    /// The first edge `from → to` in insertion order.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.out_range(from)
            .find(|&i| self.edge_to[i] == to)
            .map(|i| EdgeId(i as u32))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node closest to `pos` by Haversine distance.
    ///
    /// Linear scan; on equal distances the lowest `NodeId` wins.
    pub fn nearest_node(&self, pos: GeoPoint) -> NodeId {
        let mut best      = NodeId(0);
        let mut best_dist = f64::INFINITY;
        for (i, &p) in self.node_pos.iter().enumerate() {
            let d = pos.distance_m(p);
            if d < best_dist {
                best_dist = d;
                best = NodeId(i as u32);
            }
        }
        best
    }

    // ── Edge mutation ─────────────────────────────────────────────────────

    /// Close the road `from → to`.  Returns `false` if no such edge exists.
    ///
    /// Parallel edges between the same pair are all closed, so a closure
    /// keyed by `(from, to)` cannot leak through a second lane.
    pub fn block(&mut self, from: NodeId, to: NodeId) -> bool {
        self.set_blocked(from, to, true)
    }

    /// Reopen the road `from → to`.  Returns `false` if no such edge exists.
    pub fn unblock(&mut self, from: NodeId, to: NodeId) -> bool {
        self.set_blocked(from, to, false)
    }

    fn set_blocked(&mut self, from: NodeId, to: NodeId, blocked: bool) -> bool {
        let mut found = false;
        for i in self.matching(from, to) {
            self.edge_blocked[i] = blocked;
            found = true;
        }
        found
    }

    /// Rescale every `from → to` edge to `free_flow * multiplier`.
    ///
    /// `multiplier = 1.0` restores free-flow.  Returns `Ok(false)` if the
    /// edge does not exist.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidMultiplier`] if `multiplier` is not a finite
    /// number ≥ 1; the graph is left untouched.
    pub fn set_congestion(&mut self, from: NodeId, to: NodeId, multiplier: f64) -> GraphResult<bool> {
        check_multiplier(multiplier)?;
        let mut found = false;
        for i in self.matching(from, to) {
            self.edge_weight_secs[i] = self.free_flow_secs(self.edge_length_m[i]) * multiplier;
            found = true;
        }
        Ok(found)
    }

    /// Reopen every `from → to` edge and put it back to free-flow weight.
    /// Returns `false` if the edge does not exist.
    pub fn reset_free_flow(&mut self, from: NodeId, to: NodeId) -> bool {
        let mut found = false;
        for i in self.matching(from, to) {
            self.edge_blocked[i]     = false;
            self.edge_weight_secs[i] = self.free_flow_secs(self.edge_length_m[i]);
            found = true;
        }
        found
    }

    /// CSR indices of all `from → to` edges.
    fn matching(&self, from: NodeId, to: NodeId) -> Vec<usize> {
        self.out_range(from).filter(|&i| self.edge_to[i] == to).collect()
    }

    /// Current congestion multiplier of an edge (1.0 when free-flow).
    pub fn congestion(&self, edge: EdgeId) -> Option<f64> {
        let e = self.edge(edge)?;
        let free = self.free_flow_secs(e.distance_m);
        Some(if free > 0.0 { e.weight_secs / free } else { 1.0 })
    }
}

/// Validate a congestion multiplier.
///
/// Accepts finite values ≥ 1: congestion never makes a road faster than
/// free-flow, which is what keeps [`AStar`](crate::AStar) optimal.
pub fn check_multiplier(multiplier: f64) -> GraphResult<()> {
    if multiplier.is_finite() && multiplier >= 1.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidMultiplier(multiplier))
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use hers_core::GeoPoint;
/// use hers_graph::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(24.86, 67.00));
/// let c = b.add_node(GeoPoint::new(24.87, 67.01));
/// b.add_road(a, c, 1_500.0);
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:          Vec<GeoPoint>,
    raw_edges:      Vec<RawEdge>,
    base_speed_mps: f64,
}

struct RawEdge {
    from:       NodeId,
    to:         NodeId,
    distance_m: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:          Vec::with_capacity(nodes),
            raw_edges:      Vec::with_capacity(edges),
            base_speed_mps: hers_core::BASE_SPEED_MPS,
        }
    }

    /// Take the free-flow speed from `config`.
    pub fn config(mut self, config: &RoutingConfig) -> Self {
        self.base_speed_mps = config.base_speed_mps;
        self
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge of physical length `distance_m`.
    ///
    /// The travel-time weight is derived at build time from the base speed.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, distance_m: f64) {
        self.raw_edges.push(RawEdge { from, to, distance_m });
    }

    /// Add edges in both directions for a two-way road segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, distance_m: f64) {
        self.add_directed_edge(a, b, distance_m);
        self.add_directed_edge(b, a, distance_m);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Validate and produce a [`RoadNetwork`].
    ///
    /// # Errors
    ///
    /// - [`GraphError::EmptyGraph`] when no node was added.
    /// - [`GraphError::UnknownNode`] when an edge endpoint was never added.
    /// - [`GraphError::InvalidDistance`] for negative or non-finite lengths.
    /// - [`GraphError::Core`] for a non-positive base speed.
    pub fn build(self) -> GraphResult<RoadNetwork> {
        let node_count = self.nodes.len();
        if node_count == 0 {
            return Err(GraphError::EmptyGraph);
        }
        if !(self.base_speed_mps.is_finite() && self.base_speed_mps > 0.0) {
            return Err(CoreError::Config(format!(
                "base speed must be positive, got {}",
                self.base_speed_mps
            ))
            .into());
        }
        for e in &self.raw_edges {
            for node in [e.from, e.to] {
                if node.index() >= node_count {
                    return Err(GraphError::UnknownNode(node));
                }
            }
            if !(e.distance_m.is_finite() && e.distance_m >= 0.0) {
                return Err(GraphError::InvalidDistance {
                    from:       e.from,
                    to:         e.to,
                    distance_m: e.distance_m,
                });
            }
        }

        // Stable: parallel edges keep insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let speed = self.base_speed_mps;
        let edge_from:        Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:          Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m:    Vec<f64>    = raw.iter().map(|e| e.distance_m).collect();
        let edge_weight_secs: Vec<f64>    = raw.iter().map(|e| e.distance_m / speed).collect();
        let edge_blocked                  = vec![false; raw.len()];

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        tracing::debug!(nodes = node_count, edges = raw.len(), "road network built");

        Ok(RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_weight_secs,
            edge_blocked,
            base_speed_mps: speed,
        })
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
