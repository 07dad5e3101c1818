use thiserror::Error;

use crate::ResourceStatus;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("resource {0} not found")]
    NotFound(String),

    /// The resource left `Available` before the commit could claim it.
    #[error("resource {id} is {status}, not available")]
    StateConflict { id: String, status: ResourceStatus },

    #[error("duplicate resource id {0}")]
    DuplicateId(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
