//! The `Fleet` — ordered registry of dispatchable resources.

use std::collections::HashMap;
use std::fmt;

use hers_core::GeoPoint;

use crate::{RegistryError, RegistryResult, Resource, ResourceStatus};

/// Resources in insertion order plus an id index.
///
/// The fleet itself is never locked: every resource guards its own state,
/// so commits on different resources proceed independently.  Share a fleet
/// across threads with `&Fleet` or `Arc<Fleet>`.
#[derive(Debug, Default)]
pub struct Fleet {
    resources: Vec<Resource>,
    index:     HashMap<String, usize>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fleet from `resources`, rejecting duplicate ids.
    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> RegistryResult<Self> {
        let mut fleet = Self::new();
        for resource in resources {
            fleet.add(resource)?;
        }
        Ok(fleet)
    }

    pub fn add(&mut self, resource: Resource) -> RegistryResult<()> {
        if self.index.contains_key(resource.id()) {
            return Err(RegistryError::DuplicateId(resource.id().to_owned()));
        }
        self.index.insert(resource.id().to_owned(), self.resources.len());
        self.resources.push(resource);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.index.get(id).map(|&i| &self.resources[i])
    }

    /// Resources currently `Available`, in fleet order.
    pub fn available(&self) -> Vec<&Resource> {
        self.resources.iter().filter(|r| r.is_available()).collect()
    }

    /// Up to `k` available resources by straight-line distance to `pos`.
    ///
    /// Equal distances keep fleet order.
    pub fn nearest_available(&self, pos: GeoPoint, k: usize) -> Vec<&Resource> {
        let mut by_distance: Vec<(&Resource, f64)> = self
            .available()
            .into_iter()
            .map(|r| (r, r.distance_to(pos)))
            .collect();
        by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));
        by_distance.into_iter().take(k).map(|(r, _)| r).collect()
    }

    pub fn stats(&self) -> FleetStats {
        let mut stats = FleetStats { total: self.len(), ..Default::default() };
        for resource in &self.resources {
            match resource.status() {
                ResourceStatus::Available                            => stats.available += 1,
                ResourceStatus::Dispatched | ResourceStatus::OnScene => stats.dispatched += 1,
                ResourceStatus::Transporting                         => stats.transporting += 1,
                ResourceStatus::Unavailable                          => stats.unavailable += 1,
            }
        }
        stats
    }

    // ── Commit ────────────────────────────────────────────────────────────

    /// Claim resource `id` for `assignment`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] for an unknown id.
    /// - [`RegistryError::StateConflict`] if the resource is not available.
    pub fn commit(&self, id: &str, assignment: &str) -> RegistryResult<&Resource> {
        let resource = self.get(id).ok_or_else(|| RegistryError::NotFound(id.to_owned()))?;
        resource.try_dispatch(assignment)?;
        tracing::debug!(resource = id, assignment, "resource committed");
        Ok(resource)
    }

    /// Return resource `id` to service.
    pub fn release(&self, id: &str) -> RegistryResult<&Resource> {
        let resource = self.get(id).ok_or_else(|| RegistryError::NotFound(id.to_owned()))?;
        resource.release();
        tracing::debug!(resource = id, "resource released");
        Ok(resource)
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item     = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}

// ── FleetStats ────────────────────────────────────────────────────────────────

/// Status counts.  `dispatched` includes resources on scene.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FleetStats {
    pub total:        usize,
    pub available:    usize,
    pub dispatched:   usize,
    pub transporting: usize,
    pub unavailable:  usize,
}

impl fmt::Display for FleetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Available: {} | Dispatched: {} | Transporting: {}",
            self.total, self.available, self.dispatched, self.transporting
        )
    }
}
