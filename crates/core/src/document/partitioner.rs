//! Partitioner seam.

use super::error::PartitionError;
use super::types::{Element, SourceDocument};

/// Splits a source document into typed elements.
///
/// This trait is implemented by the partition crate, which owns OCR, layout
/// analysis and table detection (directly or through a remote service).
pub trait DocumentPartitioner: Send + Sync {
    /// Partition a document into elements in reading order.
    fn partition(
        &self,
        document: &SourceDocument,
    ) -> impl std::future::Future<Output = Result<Vec<Element>, PartitionError>> + Send;
}
