//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]` where they need to surface it.

use thiserror::Error;

use crate::NodeId;

/// Errors produced by `hers-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `hers-core`.
pub type CoreResult<T> = Result<T, CoreError>;
