//! `Dispatcher` — rank available resources, then commit the best one.

use hers_core::{Algorithm, GeoPoint};
use hers_graph::{PathResult, SharedNetwork};
use hers_registry::{Fleet, RegistryError, Resource, ResourceKind};

use crate::{DispatchError, DispatchResult, Direction, Ranker};

/// A committed resource and the route it was ranked on.
#[derive(Clone, Debug)]
pub struct Assignment<'a> {
    pub resource:        &'a Resource,
    pub path:            PathResult,
    pub straight_line_m: f64,
    /// Position of `resource` in the ranking (0 = fastest).  Non-zero when
    /// faster units were claimed by someone else first.
    pub rank:            usize,
}

impl Assignment<'_> {
    #[inline]
    pub fn eta_minutes(&self) -> f64 {
        self.path.eta_minutes()
    }
}

/// Rank-and-commit over a [`Fleet`].
///
/// The ranking sees a snapshot of availability; the commit re-checks it
/// atomically per resource.  A unit claimed between the two is skipped in
/// favour of the next-ranked one.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    ranker: Ranker,
}

impl Dispatcher {
    pub fn new(network: SharedNetwork) -> Self {
        Self { ranker: Ranker::new(network) }
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Commit the fastest available resource to `assignment` at `query`.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::NoReachableCandidate`] if no available resource can
    ///   reach `query`, or every reachable one was claimed concurrently.
    /// - [`DispatchError::Registry`] for any registry failure other than a
    ///   lost race.
    pub fn dispatch<'a>(
        &self,
        query:      GeoPoint,
        fleet:      &'a Fleet,
        algorithm:  Algorithm,
        assignment: &str,
    ) -> DispatchResult<Assignment<'a>> {
        self.dispatch_filtered(query, fleet, None, algorithm, assignment)
    }

    /// Like [`Self::dispatch`], considering only resources of at least
    /// `min_kind` capability.
    pub fn dispatch_at_least<'a>(
        &self,
        query:      GeoPoint,
        fleet:      &'a Fleet,
        min_kind:   ResourceKind,
        algorithm:  Algorithm,
        assignment: &str,
    ) -> DispatchResult<Assignment<'a>> {
        self.dispatch_filtered(query, fleet, Some(min_kind), algorithm, assignment)
    }

    fn dispatch_filtered<'a>(
        &self,
        query:      GeoPoint,
        fleet:      &'a Fleet,
        min_kind:   Option<ResourceKind>,
        algorithm:  Algorithm,
        assignment: &str,
    ) -> DispatchResult<Assignment<'a>> {
        let candidates: Vec<&'a Resource> = fleet
            .available()
            .into_iter()
            .filter(|r| min_kind.is_none_or(|k| r.kind() >= k))
            .collect();

        let ranked = self.ranker.rank(query, &candidates, algorithm, Direction::ToQuery, None);

        for (rank, entry) in ranked.into_iter().enumerate() {
            let resource: &'a Resource = *entry.candidate;
            match resource.try_dispatch(assignment) {
                Ok(()) => {
                    tracing::info!(
                        resource = resource.id(),
                        assignment,
                        rank,
                        eta_min = entry.path.eta_minutes(),
                        "resource dispatched"
                    );
                    return Ok(Assignment {
                        resource,
                        path: entry.path,
                        straight_line_m: entry.straight_line_m,
                        rank,
                    });
                }
                Err(RegistryError::StateConflict { status, .. }) => {
                    tracing::warn!(
                        resource = resource.id(),
                        %status,
                        "resource claimed concurrently, trying next candidate"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(considered = candidates.len(), assignment, "no reachable resource");
        Err(DispatchError::NoReachableCandidate { considered: candidates.len() })
    }
}
