use hers_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Every candidate was unreachable or claimed before it could be committed.
    #[error("no reachable candidate ({considered} considered)")]
    NoReachableCandidate { considered: usize },

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
