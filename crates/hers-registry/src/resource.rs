//! Mobile resources (ambulances) and their dispatch lifecycle.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use hers_core::GeoPoint;

use crate::{Located, RegistryError, RegistryResult};

// ── ResourceKind ──────────────────────────────────────────────────────────────

/// Care level a resource can provide, ordered by capability.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Basic life support.
    Basic,
    /// Advanced life support.
    Advanced,
    /// Critical care transport.
    Critical,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Basic    => "BASIC",
            Self::Advanced => "ADVANCED",
            Self::Critical => "CRITICAL",
        })
    }
}

// ── ResourceStatus ────────────────────────────────────────────────────────────

/// Lifecycle: `Available → Dispatched → OnScene → Transporting → Available`,
/// with `Unavailable` for resources out of service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceStatus {
    #[default]
    Available,
    Dispatched,
    OnScene,
    Transporting,
    Unavailable,
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Available    => "AVAILABLE",
            Self::Dispatched   => "DISPATCHED",
            Self::OnScene      => "ON_SCENE",
            Self::Transporting => "TRANSPORTING",
            Self::Unavailable  => "UNAVAILABLE",
        })
    }
}

// ── ResourceState ─────────────────────────────────────────────────────────────

/// The mutable part of a resource, guarded by its own mutex.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState {
    pub status:     ResourceStatus,
    /// Incident the resource is committed to; `None` while available.
    pub assignment: Option<String>,
    pub position:   GeoPoint,
}

// ── Resource ──────────────────────────────────────────────────────────────────

/// A dispatchable unit.
///
/// Identity fields are immutable; status, assignment and position sit behind
/// a per-resource mutex so that two dispatchers racing for the same unit
/// serialize on that unit only.
#[derive(Debug)]
pub struct Resource {
    id:      String,
    station: String,
    kind:    ResourceKind,
    state:   Mutex<ResourceState>,
}

impl Resource {
    /// A new resource, `Available` at `position`.
    pub fn new(
        id:       impl Into<String>,
        station:  impl Into<String>,
        kind:     ResourceKind,
        position: GeoPoint,
    ) -> Self {
        Self {
            id:      id.into(),
            station: station.into(),
            kind,
            state:   Mutex::new(ResourceState {
                status:     ResourceStatus::Available,
                assignment: None,
                position,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn lock(&self) -> MutexGuard<'_, ResourceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the mutable state.
    pub fn state(&self) -> ResourceState {
        self.lock().clone()
    }

    pub fn status(&self) -> ResourceStatus {
        self.lock().status
    }

    pub fn is_available(&self) -> bool {
        self.status() == ResourceStatus::Available
    }

    pub fn assignment(&self) -> Option<String> {
        self.lock().assignment.clone()
    }

    pub fn current_position(&self) -> GeoPoint {
        self.lock().position
    }

    /// Straight-line distance from the resource's current position.
    pub fn distance_to(&self, pos: GeoPoint) -> f64 {
        self.current_position().distance_m(pos)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Atomically move `Available → Dispatched` and record `assignment`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::StateConflict`] if the resource is in any other
    /// status; its state is left unchanged.
    pub fn try_dispatch(&self, assignment: &str) -> RegistryResult<()> {
        let mut state = self.lock();
        if state.status != ResourceStatus::Available {
            return Err(RegistryError::StateConflict { id: self.id.clone(), status: state.status });
        }
        state.status     = ResourceStatus::Dispatched;
        state.assignment = Some(assignment.to_owned());
        Ok(())
    }

    /// Return to `Available` and drop the assignment.
    pub fn release(&self) {
        let mut state = self.lock();
        state.status     = ResourceStatus::Available;
        state.assignment = None;
    }

    /// Move along the lifecycle without the availability check.
    ///
    /// Setting `Available` or `Unavailable` clears the assignment.
    pub fn set_status(&self, status: ResourceStatus) {
        let mut state = self.lock();
        state.status = status;
        if matches!(status, ResourceStatus::Available | ResourceStatus::Unavailable) {
            state.assignment = None;
        }
    }

    pub fn relocate(&self, position: GeoPoint) {
        self.lock().position = position;
    }
}

impl Located for Resource {
    fn position(&self) -> Option<GeoPoint> {
        let pos = self.current_position();
        pos.is_valid().then_some(pos)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        write!(f, "{} ({}) - {} - {}", self.id, self.kind, self.station, state.status)?;
        if let Some(assignment) = &state.assignment {
            write!(f, " - assignment {assignment}")?;
        }
        Ok(())
    }
}
