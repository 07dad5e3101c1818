//! `hers-graph` — road network store and shortest-path search.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR + mutable weights), `RoadNetworkBuilder` |
//! | [`search`]  | `PathSearch` trait, `Dijkstra`, `AStar`                     |
//! | [`path`]    | `PathResult`                                                |
//! | [`shared`]  | `SharedNetwork` — single-writer / multi-reader handle       |
//! | [`loader`]  | `load_network_csv`, `load_network_reader`                   |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `hers-core` types.      |

pub mod error;
pub mod loader;
pub mod network;
pub mod path;
pub mod search;
pub mod shared;


pub use error::{GraphError, GraphResult};
pub use loader::{LoadedNetwork, load_network_csv, load_network_reader};
pub use network::{EdgeRef, RoadNetwork, RoadNetworkBuilder, check_multiplier};
pub use path::PathResult;
pub use search::{AStar, Dijkstra, PathSearch};
pub use shared::SharedNetwork;
