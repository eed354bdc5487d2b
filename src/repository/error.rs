use thiserror::Error;

use crate::model::InvalidTier;

/// Domain failures a repository can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{collection} record not found: {id}")]
    NotFound { collection: &'static str, id: String },
    #[error("invalid tier: {0:?}")]
    InvalidTier(String),
}

impl From<InvalidTier> for RepositoryError {
    fn from(err: InvalidTier) -> Self {
        RepositoryError::InvalidTier(err.0)
    }
}
