//! `hers-core` — foundational types for the `hers` emergency routing workspace.
//!
//! This crate is a dependency of every other `hers-*` crate.  It has no
//! `hers-*` dependencies and only `thiserror` (plus optional `serde`) from
//! the outside world.
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `EdgeId`                                     |
//! | [`geo`]    | `GeoPoint`, Haversine distance                         |
//! | [`config`] | `RoutingConfig`, `Algorithm`, speed constants          |
//! | [`error`]  | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Algorithm, BASE_SPEED_MPS, RoutingConfig, TRANSPORT_SPEED_KMH};
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_M, GeoPoint};
pub use ids::{EdgeId, NodeId};
