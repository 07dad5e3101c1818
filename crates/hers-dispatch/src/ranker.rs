//! `Ranker` — orders candidates by road travel time to (or from) a query
//! point.

use hers_core::{Algorithm, GeoPoint};
use hers_graph::{PathResult, PathSearch, RoadNetwork, SharedNetwork};
use hers_registry::Located;

/// Which way the road search runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Candidate → query: a unit driving to an incident.
    #[default]
    ToQuery,
    /// Query → candidate: a patient transported to a facility.
    FromQuery,
}

/// One reachable candidate with its route.
#[derive(Clone, Debug)]
pub struct Ranked<'a, C> {
    pub candidate:       &'a C,
    pub path:            PathResult,
    /// Great-circle distance between the candidate and the query point.
    pub straight_line_m: f64,
}

impl<C> Ranked<'_, C> {
    #[inline]
    pub fn total_time_secs(&self) -> f64 {
        self.path.total_time_secs
    }

    #[inline]
    pub fn road_distance_m(&self) -> f64 {
        self.path.total_distance_m
    }

    #[inline]
    pub fn eta_minutes(&self) -> f64 {
        self.path.eta_minutes()
    }
}

// ── Ranker ────────────────────────────────────────────────────────────────────

/// Fans path searches out over a candidate set.
///
/// A ranking pass holds one read guard on the network for its whole
/// duration, so every candidate is measured against the same weights even
/// if a condition mutation is waiting for the write lock.
#[derive(Clone, Debug)]
pub struct Ranker {
    network: SharedNetwork,
}

impl Ranker {
    pub fn new(network: SharedNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &SharedNetwork {
        &self.network
    }

    /// Rank `candidates` by total travel time.
    ///
    /// Candidates without a known position, or with no path under current
    /// conditions, are left out.  Equal times keep input order.  `limit`
    /// truncates to the best `k`.  An invalid `query` (NaN or out of range)
    /// ranks nothing.
    pub fn rank<'a, C: Located + Sync>(
        &self,
        query:      GeoPoint,
        candidates: &'a [C],
        algorithm:  Algorithm,
        direction:  Direction,
        limit:      Option<usize>,
    ) -> Vec<Ranked<'a, C>> {
        if !query.is_valid() {
            tracing::debug!(%query, "ranking skipped: invalid query point");
            return Vec::new();
        }

        let guard = self.network.read();
        let net: &RoadNetwork = &guard;
        let query_node = net.nearest_node(query);

        let route = |candidate: &'a C| -> Option<Ranked<'a, C>> {
            let pos  = candidate.position()?;
            let node = net.nearest_node(pos);
            let (source, destination) = match direction {
                Direction::ToQuery   => (node, query_node),
                Direction::FromQuery => (query_node, node),
            };
            let path = algorithm.find_path(net, source, destination);
            path.is_found().then(|| Ranked { candidate, path, straight_line_m: pos.distance_m(query) })
        };

        #[cfg(not(feature = "parallel"))]
        let mut ranked: Vec<Ranked<'a, C>> = candidates.iter().filter_map(route).collect();

        // Rayon's collect keeps input order, so the stable sort below still
        // breaks ties by candidate position.
        #[cfg(feature = "parallel")]
        let mut ranked: Vec<Ranked<'a, C>> = {
            use rayon::prelude::*;
            candidates.par_iter().filter_map(route).collect()
        };

        ranked.sort_by(|a, b| a.path.total_time_secs.total_cmp(&b.path.total_time_secs));
        if let Some(k) = limit {
            ranked.truncate(k);
        }

        tracing::debug!(
            candidates = candidates.len(),
            reachable  = ranked.len(),
            %algorithm,
            ?direction,
            "ranking complete"
        );
        ranked
    }
}
