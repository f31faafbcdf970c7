//! Extraction data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wbs_code::WbsCode;

/// A single budget line proposed from a source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WbsLineItem {
    /// Hierarchical WBS code (e.g. `1.6.1`).
    pub wbs_code: WbsCode,
    /// Human-readable description of the cost item.
    pub description: String,
    /// Budgeted cost per unit (NGN).
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_cost_budgeted: Decimal,
    /// Budgeted quantity.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity_budgeted: Decimal,
    /// `unit_cost_budgeted * quantity_budgeted`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost_budgeted: Decimal,
    /// Estimated duration in days.
    pub duration_days_budgeted: Option<u32>,
    /// Database id of the parent WBS item. Linking is done by the budget
    /// service on import, so drafts always carry `None`.
    pub parent_wbs_id: Option<Uuid>,
    /// Code of the parent line when that line is part of the same draft.
    pub parent_wbs_code: Option<WbsCode>,
}

/// Counters collected while extracting line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionMetrics {
    /// Table elements seen.
    pub total_tables: usize,
    /// Tables that produced at least one line item.
    pub successful_tables: usize,
    /// Data rows examined in tables with every essential column.
    pub total_rows_attempted: usize,
    /// Rows accepted as line items.
    pub successful_rows: usize,
    /// Rows rejected because a value could not be converted or validated.
    pub data_conversion_errors: usize,
}

/// Why a row was not turned into a line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// WBS code cell is blank.
    MissingWbsCode,
    /// WBS code cell is not a dotted digit sequence (totals, subtotals, notes).
    InvalidWbsCode(String),
    /// A value could not be converted or failed validation.
    ConversionError(String),
    /// Unit cost is zero or quantity is below the minimum.
    NonPositiveAmount,
}

impl SkipReason {
    /// Conversion failures lower the confidence score.
    #[must_use]
    pub const fn is_conversion_error(&self) -> bool {
        matches!(self, Self::ConversionError(_))
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingWbsCode => f.write_str("WBS code is missing"),
            Self::InvalidWbsCode(code) => write!(f, "invalid WBS code format '{code}'"),
            Self::ConversionError(msg) => write!(f, "data conversion error: {msg}"),
            Self::NonPositiveAmount => f.write_str("zero or negative quantity/unit cost"),
        }
    }
}

/// A row that was skipped, with its position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Index of the element in the partitioned document.
    pub element_index: usize,
    /// Index of the data row within its table.
    pub row_index: usize,
    /// Why the row was skipped.
    pub reason: SkipReason,
}

/// Result of running extraction over a partitioned document.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutcome {
    /// Accepted line items in document order.
    pub items: Vec<WbsLineItem>,
    /// Counters for confidence scoring.
    pub metrics: ExtractionMetrics,
    /// Rows that were skipped.
    pub skipped: Vec<SkippedRow>,
}
