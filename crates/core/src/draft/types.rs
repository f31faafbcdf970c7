//! Budget draft data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extraction::{ExtractionMetrics, WbsLineItem};

/// A validated budget draft produced from a source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDraft {
    /// Name of the project the draft belongs to.
    pub project_name: String,
    /// Structured, validated budget line items.
    pub wbs_line_items: Vec<WbsLineItem>,
    /// Extraction confidence between 0.0 and 1.0.
    #[serde(with = "rust_decimal::serde::float")]
    pub confidence_score: Decimal,
    /// Sum of `total_cost_budgeted` over all line items.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_budgeted: Decimal,
    /// Counters behind the confidence score.
    pub extraction_metrics: ExtractionMetrics,
}
