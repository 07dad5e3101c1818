//! Single-writer / multi-reader handle around a [`RoadNetwork`].
//!
//! Condition mutations take the write guard; searches and ranking fan-outs
//! take read guards.  A search holding a read guard therefore sees one
//! consistent set of weights for its whole duration, and a batch mutation
//! done under one write guard is never observed half-applied.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hers_core::{Algorithm, GeoPoint, NodeId};

use crate::{PathResult, PathSearch, RoadNetwork};

/// Cheaply cloneable shared handle.  Clones refer to the same graph.
#[derive(Clone, Debug)]
pub struct SharedNetwork {
    inner: Arc<RwLock<RoadNetwork>>,
}

impl SharedNetwork {
    pub fn new(network: RoadNetwork) -> Self {
        Self { inner: Arc::new(RwLock::new(network)) }
    }

    /// Shared access for searches.
    ///
    /// A writer that panicked mid-mutation poisons the lock; the graph data
    /// is still structurally valid (every mutation is a single store), so the
    /// guard is recovered instead of propagating the panic.
    pub fn read(&self) -> RwLockReadGuard<'_, RoadNetwork> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access for condition mutations.
    pub fn write(&self) -> RwLockWriteGuard<'_, RoadNetwork> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one search under a read guard.
    pub fn find_path(&self, source: NodeId, destination: NodeId, algorithm: Algorithm) -> PathResult {
        algorithm.find_path(&self.read(), source, destination)
    }

    pub fn nearest_node(&self, pos: GeoPoint) -> NodeId {
        self.read().nearest_node(pos)
    }
}

impl From<RoadNetwork> for SharedNetwork {
    fn from(network: RoadNetwork) -> Self {
        Self::new(network)
    }
}
