//! Error types for the hitmark library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`HitmarkError`] enum. Collaborator implementations (index, record store,
//! section resolver) are expected to map their infrastructure failures into
//! these variants so the search facade can surface them unchanged.

use std::io;

use thiserror::Error;

/// The main error type for hitmark operations.
#[derive(Error, Debug)]
pub enum HitmarkError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors raised by the external full-text index.
    #[error("Index error: {0}")]
    Index(String),

    /// Errors raised by the external record store.
    #[error("Store error: {0}")]
    Store(String),

    /// Field metadata errors.
    #[error("Field error: {0}")]
    Field(String),

    /// Invalid argument passed to an operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`HitmarkError`].
pub type Result<T> = std::result::Result<T, HitmarkError>;

impl HitmarkError {
    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        HitmarkError::Index(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        HitmarkError::Store(msg.into())
    }

    /// Create a new field error.
    pub fn field<S: Into<String>>(msg: S) -> Self {
        HitmarkError::Field(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        HitmarkError::InvalidArgument(msg.into())
    }
}
