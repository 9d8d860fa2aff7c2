//! Error types for the data-loader crate.
//!
//! Two families live here:
//! - [`DataLoadError`] for reading and validating catalog/user files
//! - [`StoreError`] for operations on the in-memory stores (lookups, votes,
//!   registration)

use thiserror::Error;

/// Errors that can occur while loading or saving data files
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File contents were not valid JSON for the expected shape
    #[error("Malformed JSON in {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two catalog entries share a title, which is the catalog key
    #[error("Duplicate title in catalog: {0}")]
    DuplicateTitle(String),

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Errors raised by the catalog and user stores
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced entity doesn't exist (unknown title, unknown username)
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Caller supplied a value outside the accepted domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A username is already registered
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// Username exists but the password does not match
    #[error("Invalid credentials for user {0}")]
    InvalidCredentials(String),

    /// A writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn movie_not_found(title: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: "Movie",
            key: title.into(),
        }
    }

    pub fn user_not_found(username: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: "User",
            key: username.into(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
