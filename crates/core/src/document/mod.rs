//! Partitioned document model.
//!
//! A source document is handed to a [`DocumentPartitioner`], which returns a
//! flat list of [`Element`]s. Only table elements carry structure that the
//! extraction step can use.

mod error;
mod partitioner;
mod types;

pub use error::PartitionError;
pub use partitioner::DocumentPartitioner;
pub use types::{DocumentKind, Element, ElementKind, SourceDocument, Table};
