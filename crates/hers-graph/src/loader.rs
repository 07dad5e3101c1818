//! CSV loader for extracted node and edge lists.
//!
//! The map-processing collaborator hands over two tables.  Node ids are the
//! extractor's own (any `u64`); they are remapped to dense [`NodeId`]s in
//! file order.
//!
//! ```csv
//! id,lat,lon
//! 1001,24.8615,67.0099
//! 1002,24.8606,67.0084
//! ```
//!
//! ```csv
//! source,destination,distance_m
//! 1001,1002,180.5
//! 1002,1001,180.5
//! ```
//!
//! Edges are directed; two-way roads appear once per direction.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use hers_core::{GeoPoint, NodeId, RoutingConfig};

use crate::{GraphError, GraphResult, RoadNetwork, RoadNetworkBuilder};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:  u64,
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    source:      u64,
    destination: u64,
    distance_m:  f64,
}

/// A built network plus the external → dense id mapping.
pub struct LoadedNetwork {
    pub network:  RoadNetwork,
    pub node_ids: HashMap<u64, NodeId>,
}

impl LoadedNetwork {
    /// Dense id for an extractor id.
    pub fn node(&self, external: u64) -> Option<NodeId> {
        self.node_ids.get(&external).copied()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a network from node and edge CSV files.
pub fn load_network_csv(nodes: &Path, edges: &Path, config: &RoutingConfig) -> GraphResult<LoadedNetwork> {
    let nodes = std::fs::File::open(nodes)?;
    let edges = std::fs::File::open(edges)?;
    load_network_reader(nodes, edges, config)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
pub fn load_network_reader<N: Read, E: Read>(
    nodes:  N,
    edges:  E,
    config: &RoutingConfig,
) -> GraphResult<LoadedNetwork> {
    config.validate()?;

    let mut builder  = RoadNetworkBuilder::new().config(config);
    let mut node_ids = HashMap::new();

    for row in csv::Reader::from_reader(nodes).deserialize::<NodeRecord>() {
        let row = row.map_err(|e| GraphError::Parse(e.to_string()))?;
        let pos = GeoPoint::new(row.lat, row.lon);
        if !pos.is_valid() {
            return Err(GraphError::Parse(format!("node {} has invalid position {pos}", row.id)));
        }
        if node_ids.contains_key(&row.id) {
            return Err(GraphError::Parse(format!("duplicate node id {}", row.id)));
        }
        node_ids.insert(row.id, builder.add_node(pos));
    }

    let lookup = |id: u64| {
        node_ids
            .get(&id)
            .copied()
            .ok_or_else(|| GraphError::Parse(format!("edge references unknown node {id}")))
    };

    for row in csv::Reader::from_reader(edges).deserialize::<EdgeRecord>() {
        let row = row.map_err(|e| GraphError::Parse(e.to_string()))?;
        builder.add_directed_edge(lookup(row.source)?, lookup(row.destination)?, row.distance_m);
    }

    let network = builder.build()?;
    tracing::info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "road network loaded"
    );
    Ok(LoadedNetwork { network, node_ids })
}
