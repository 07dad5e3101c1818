//! Routing configuration.
//!
//! All speed assumptions live here so that edge weights, the A* heuristic,
//! and straight-line ETA estimates are derived from one place.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Free-flow road speed in metres per second (≈ 50 km/h).
pub const BASE_SPEED_MPS: f64 = 13.89;

/// Average transport speed in city traffic, used for straight-line ETAs.
pub const TRANSPORT_SPEED_KMH: f64 = 40.0;

// ── Algorithm ─────────────────────────────────────────────────────────────────

/// Shortest-path strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Uniform-cost search.
    Dijkstra,
    /// Heuristic-guided search with a Haversine lower bound.
    #[default]
    AStar,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dijkstra => f.write_str("Dijkstra"),
            Algorithm::AStar    => f.write_str("A*"),
        }
    }
}

// ── RoutingConfig ─────────────────────────────────────────────────────────────

/// Global routing parameters.
///
/// Construct with `RoutingConfig::default()` and override fields as needed,
/// then call [`validate`](Self::validate) before handing it to a builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingConfig {
    /// Speed used to turn edge distances into free-flow travel times, and by
    /// the A* heuristic.  Metres per second.
    pub base_speed_mps: f64,

    /// Speed used for straight-line ETA estimates.  Kilometres per hour.
    pub transport_speed_kmh: f64,

    /// Strategy used when a caller does not pick one explicitly.
    pub default_algorithm: Algorithm,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_speed_mps:      BASE_SPEED_MPS,
            transport_speed_kmh: TRANSPORT_SPEED_KMH,
            default_algorithm:   Algorithm::AStar,
        }
    }
}

impl RoutingConfig {
    /// Reject non-positive or non-finite speeds.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.base_speed_mps.is_finite() && self.base_speed_mps > 0.0) {
            return Err(CoreError::Config(format!(
                "base_speed_mps must be positive, got {}",
                self.base_speed_mps
            )));
        }
        if !(self.transport_speed_kmh.is_finite() && self.transport_speed_kmh > 0.0) {
            return Err(CoreError::Config(format!(
                "transport_speed_kmh must be positive, got {}",
                self.transport_speed_kmh
            )));
        }
        Ok(())
    }

    /// Straight-line travel estimate in minutes for `distance_m`.
    #[inline]
    pub fn straight_line_eta_min(&self, distance_m: f64) -> f64 {
        distance_m / 1000.0 / self.transport_speed_kmh * 60.0
    }
}
