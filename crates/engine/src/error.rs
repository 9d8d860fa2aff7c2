//! Errors returned by the recommender facade.

use data_loader::{DataLoadError, StoreError};
use similarity::VectorizeError;
use thiserror::Error;

/// Recommender-level errors
#[derive(Error, Debug)]
pub enum RecommendError {
    /// Unknown movie title or username
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No term survived vectorization
    #[error("No usable terms in a corpus of {documents} documents")]
    EmptyCorpus { documents: usize },

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid credentials for user {0}")]
    InvalidCredentials(String),

    /// Reading or writing a data or config file failed
    #[error("Load error: {0}")]
    Load(#[from] DataLoadError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for RecommendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, key } => RecommendError::NotFound { entity, key },
            StoreError::InvalidInput(msg) => RecommendError::InvalidInput(msg),
            StoreError::AlreadyExists(name) => RecommendError::AlreadyExists(name),
            StoreError::InvalidCredentials(name) => RecommendError::InvalidCredentials(name),
            StoreError::Poisoned => RecommendError::Internal(err.to_string()),
        }
    }
}

impl From<VectorizeError> for RecommendError {
    fn from(err: VectorizeError) -> Self {
        match err {
            VectorizeError::EmptyCorpus { documents } => RecommendError::EmptyCorpus { documents },
            VectorizeError::InvalidConfig(msg) => RecommendError::InvalidInput(msg),
        }
    }
}

pub type RecommendResult<T> = Result<T, RecommendError>;
