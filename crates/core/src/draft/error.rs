//! Draft error types.

use sentinel_shared::AppError;
use thiserror::Error;

use crate::document::PartitionError;

/// Budget drafting errors.
#[derive(Debug, Error)]
pub enum DraftError {
    /// Project name is blank.
    #[error("project_name is required")]
    MissingProjectName,

    /// Uploaded file has no content.
    #[error("uploaded file is empty")]
    EmptyDocument,

    /// Uploaded file exceeds the size limit.
    #[error("File size exceeds {}MB limit.", max / (1024 * 1024))]
    FileTooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Limit in bytes.
        max: u64,
    },

    /// Partitioning failed.
    #[error(transparent)]
    Partition(#[from] PartitionError),

    /// Nothing usable was found in the document.
    #[error("No valid WBS budget line items could be extracted. Check document formatting.")]
    NoLineItems,

    /// Line item totals overflow.
    #[error("draft total is out of range")]
    TotalOverflow,
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::MissingProjectName | DraftError::EmptyDocument => {
                Self::Validation(err.to_string())
            }
            DraftError::FileTooLarge { .. } => Self::PayloadTooLarge(err.to_string()),
            DraftError::NoLineItems => Self::Unprocessable(err.to_string()),
            DraftError::Partition(PartitionError::UnsupportedFormat(_)) => {
                Self::UnsupportedMediaType(err.to_string())
            }
            DraftError::Partition(PartitionError::Malformed(_)) => {
                Self::Unprocessable(err.to_string())
            }
            DraftError::Partition(
                PartitionError::Upstream { .. } | PartitionError::Transport(_),
            ) => Self::ExternalService(format!("Document processing failed: {err}")),
            DraftError::TotalOverflow => Self::Internal(err.to_string()),
        }
    }
}
