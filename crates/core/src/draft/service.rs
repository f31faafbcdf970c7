//! Budget draft service.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::error::DraftError;
use super::types::BudgetDraft;
use crate::document::{DocumentPartitioner, SourceDocument};
use crate::extraction::{LineItemExtractor, WbsLineItem, confidence_score};

/// Turns uploaded documents into validated budget drafts.
pub struct DraftService<P: DocumentPartitioner> {
    partitioner: Arc<P>,
    max_file_size: u64,
}

impl<P: DocumentPartitioner> DraftService<P> {
    /// Create a new draft service.
    #[must_use]
    pub fn new(partitioner: Arc<P>, max_file_size: u64) -> Self {
        Self {
            partitioner,
            max_file_size,
        }
    }

    /// Maximum accepted document size in bytes.
    #[must_use]
    pub const fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Reject documents that can never produce a draft.
    ///
    /// # Errors
    ///
    /// Returns `DraftError::FileTooLarge` or `DraftError::EmptyDocument`.
    pub fn validate_upload(&self, size: u64) -> Result<(), DraftError> {
        if size > self.max_file_size {
            return Err(DraftError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        if size == 0 {
            return Err(DraftError::EmptyDocument);
        }
        Ok(())
    }

    /// Partition a document, extract WBS line items and score the result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The project name is blank
    /// - The document is empty or too large
    /// - Partitioning fails
    /// - No line items could be extracted
    pub async fn draft_budget(
        &self,
        project_name: &str,
        document: &SourceDocument,
    ) -> Result<BudgetDraft, DraftError> {
        let project_name = project_name.trim();
        if project_name.is_empty() {
            return Err(DraftError::MissingProjectName);
        }
        self.validate_upload(document.size())?;

        let kind = document.kind();
        let elements = self.partitioner.partition(document).await?;
        let outcome = LineItemExtractor::extract(&elements);

        if outcome.items.is_empty() {
            warn!(
                project = %project_name,
                filename = %document.filename,
                kind = %kind,
                elements = elements.len(),
                tables = outcome.metrics.total_tables,
                skipped_rows = outcome.skipped.len(),
                "No WBS line items extracted"
            );
            return Err(DraftError::NoLineItems);
        }

        let confidence_score = confidence_score(&outcome.metrics);
        let total_budgeted = total_budgeted(&outcome.items)?;

        info!(
            project = %project_name,
            filename = %document.filename,
            kind = %kind,
            line_items = outcome.items.len(),
            skipped_rows = outcome.skipped.len(),
            conversion_errors = outcome.metrics.data_conversion_errors,
            confidence = %confidence_score,
            "Budget draft extracted"
        );

        Ok(BudgetDraft {
            project_name: project_name.to_string(),
            wbs_line_items: outcome.items,
            confidence_score,
            total_budgeted,
            extraction_metrics: outcome.metrics,
        })
    }
}

fn total_budgeted(items: &[WbsLineItem]) -> Result<Decimal, DraftError> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.total_cost_budgeted)
            .ok_or(DraftError::TotalOverflow)
    })
}
