//! `hers-registry` — the candidates that get ranked: mobile resources and
//! fixed facilities.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`located`]  | `Located` trait (optional position)                        |
//! | [`resource`] | `Resource`, `ResourceKind`, `ResourceStatus`, `ResourceState` |
//! | [`fleet`]    | `Fleet`, `FleetStats`                                      |
//! | [`facility`] | `Facility`, `FacilityRegistry`                             |
//! | [`error`]    | `RegistryError`, `RegistryResult<T>`                       |
//!
//! # Commit model
//!
//! Each `Resource` holds its mutable state behind its own `Mutex`.
//! `Resource::try_dispatch` checks `Available` and moves to `Dispatched`
//! under that lock, so of two concurrent commits on one resource exactly one
//! succeeds and the other gets `RegistryError::StateConflict`.  Commits on
//! different resources never contend.

pub mod error;
pub mod facility;
pub mod fleet;
pub mod located;
pub mod resource;


pub use error::{RegistryError, RegistryResult};
pub use facility::{Facility, FacilityRegistry};
pub use fleet::{Fleet, FleetStats};
pub use located::Located;
pub use resource::{Resource, ResourceKind, ResourceState, ResourceStatus};
