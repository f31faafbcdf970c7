//! WBS line item extraction and confidence scoring.

pub mod columns;
pub mod extractor;
pub mod scoring;
pub mod types;
pub mod values;
pub mod wbs_code;

#[cfg(test)]
mod tests;

pub use columns::{ColumnMap, WbsField};
pub use extractor::LineItemExtractor;
pub use scoring::confidence_score;
pub use types::{ExtractionMetrics, ExtractionOutcome, SkipReason, SkippedRow, WbsLineItem};
pub use wbs_code::{WbsCode, WbsCodeError};
