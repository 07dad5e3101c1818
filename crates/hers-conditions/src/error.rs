use hers_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConditionError {
    /// Rejected before touching the graph; nothing was applied.
    #[error("invalid mutation: {0}")]
    InvalidMutation(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type ConditionResult<T> = Result<T, ConditionError>;
