//! Graph-subsystem error type.

use thiserror::Error;

use hers_core::{CoreError, NodeId};

/// Errors produced by `hers-graph`.
///
/// Searches never fail: an unreachable or unknown destination is reported
/// through `PathResult::found`.  These variants cover construction, loading,
/// and rejected mutations only.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("road network has no nodes")]
    EmptyGraph,

    #[error("node {0} not found in network")]
    UnknownNode(NodeId),

    #[error("edge {from} -> {to} has invalid distance {distance_m}")]
    InvalidDistance {
        from:       NodeId,
        to:         NodeId,
        distance_m: f64,
    },

    #[error("congestion multiplier must be finite and at least 1, got {0}")]
    InvalidMultiplier(f64),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("edge list parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
