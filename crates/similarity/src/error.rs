//! Error types for vectorization.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorizeError {
    /// No term survived tokenization and document-frequency filtering
    #[error("No usable terms in a corpus of {documents} documents")]
    EmptyCorpus { documents: usize },

    /// Vectorizer thresholds are inconsistent
    #[error("Invalid vectorizer configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, VectorizeError>;
