//! Partitioner construction errors.

use thiserror::Error;

/// Errors raised while building a partitioner from configuration.
#[derive(Debug, Error)]
pub enum PartitionerConfigError {
    /// The remote partitioner needs a base URL.
    #[error("partitioner.url is required for the unstructured partitioner")]
    MissingUrl,

    /// The API key is not a valid header value.
    #[error("partitioner.api_key contains invalid characters")]
    InvalidApiKey,

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}
