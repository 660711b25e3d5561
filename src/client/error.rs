//! Error types for client building operations.

use thiserror::Error;

/// Errors that can occur when building a fletch client.
#[derive(Debug, Error)]
pub enum BuildClientError {
    /// No transport backend has been registered.
    #[error("No backend registered")]
    NoBackend,
    /// An error occurred in the backend implementation.
    #[error("Error creating client: {0}")]
    BackendError(#[from] crate::Error),
}

/// Result type for client building operations.
pub type BuildClientResult<T> = Result<T, BuildClientError>;
