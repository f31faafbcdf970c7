//! Partitioning error types.

use thiserror::Error;

use super::types::DocumentKind;

/// Errors raised while splitting a document into elements.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// No partitioner is available for this format.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(DocumentKind),

    /// The document could not be read.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The partition service answered with an error status.
    #[error("partition service returned {status}: {message}")]
    Upstream {
        /// HTTP status returned by the service.
        status: u16,
        /// Error body or reason.
        message: String,
    },

    /// The partition service could not be reached.
    #[error("partition service unreachable: {0}")]
    Transport(String),
}

impl PartitionError {
    /// Create a malformed document error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create an upstream error.
    #[must_use]
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
