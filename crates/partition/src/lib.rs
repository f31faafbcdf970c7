//! Document partitioners for the SentinelFi document agent.
//!
//! - [`LocalPartitioner`] reads CSV, TSV and HTML in-process.
//! - [`UnstructuredClient`] sends everything else (PDF, DOCX, scans) to the
//!   Unstructured partition API.
//! - [`Partitioner`] picks one of the two based on configuration and format.

pub mod error;
pub mod html;
pub mod local;
pub mod unstructured;

use std::time::Duration;

use sentinel_core::document::{DocumentPartitioner, Element, PartitionError, SourceDocument};
use sentinel_shared::{PartitionerConfig, PartitionerKind};

pub use error::PartitionerConfigError;
pub use local::LocalPartitioner;
pub use unstructured::UnstructuredClient;

/// Configured document partitioner.
#[derive(Debug, Clone)]
pub enum Partitioner {
    /// Local parsing only.
    Local(LocalPartitioner),
    /// Remote partitioning, with local parsing for formats that need no OCR.
    Unstructured(UnstructuredClient),
}

impl Partitioner {
    /// Builds the partitioner selected by configuration.
    pub fn from_config(config: &PartitionerConfig) -> Result<Self, PartitionerConfigError> {
        match config.kind {
            PartitionerKind::Local => Ok(Self::Local(LocalPartitioner)),
            PartitionerKind::Unstructured => {
                let url = config
                    .url
                    .as_deref()
                    .ok_or(PartitionerConfigError::MissingUrl)?;
                let client = UnstructuredClient::new(
                    url,
                    config.api_key.as_deref(),
                    config.strategy.clone(),
                    Duration::from_secs(config.timeout_secs),
                )?;
                Ok(Self::Unstructured(client))
            }
        }
    }

    /// Short backend name for logs and health output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Unstructured(_) => "unstructured",
        }
    }
}

impl DocumentPartitioner for Partitioner {
    async fn partition(&self, document: &SourceDocument) -> Result<Vec<Element>, PartitionError> {
        match self {
            Self::Local(local) => local.partition(document).await,
            Self::Unstructured(_) if LocalPartitioner::supports(document.kind()) => {
                LocalPartitioner.partition(document).await
            }
            Self::Unstructured(remote) => remote.partition(document).await,
        }
    }
}
