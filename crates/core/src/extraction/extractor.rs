//! Table-to-WBS line item extraction.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::columns::ColumnMap;
use super::types::{ExtractionOutcome, SkipReason, SkippedRow, WbsLineItem};
use super::values::{ValueError, parse_duration_days, parse_quantity, parse_unit_cost};
use super::wbs_code::{WbsCode, WbsCodeError};
use crate::document::{Element, Table};

/// Smallest accepted quantity (0.01).
pub const MIN_QUANTITY: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Description used when the description cell is blank.
pub const MISSING_DESCRIPTION: &str = "N/A";

/// Maps partitioned table elements onto WBS line items.
pub struct LineItemExtractor;

impl LineItemExtractor {
    /// Extracts line items and metrics from partitioned elements.
    ///
    /// Non-table elements are ignored. Every table counts towards
    /// `total_tables`; only tables with all essential columns contribute
    /// rows.
    #[must_use]
    pub fn extract(elements: &[Element]) -> ExtractionOutcome {
        let mut outcome = ExtractionOutcome::default();

        for (element_index, element) in elements.iter().enumerate() {
            if !element.is_table() {
                continue;
            }
            outcome.metrics.total_tables += 1;

            let Some(table) = element.table.as_ref() else {
                warn!(
                    element_index,
                    page = ?element.page_number,
                    "Error processing table: markup could not be parsed"
                );
                continue;
            };

            let columns = match ColumnMap::resolve(&table.headers) {
                Ok(columns) => columns,
                Err(missing) => {
                    warn!(
                        element_index,
                        headers = ?table.headers,
                        missing = ?missing,
                        "Skipping table due to missing essential columns"
                    );
                    continue;
                }
            };

            let mut table_had_items = false;
            for row_index in 0..table.row_count() {
                outcome.metrics.total_rows_attempted += 1;

                match Self::parse_row(table, row_index, &columns) {
                    Ok(item) => {
                        outcome.items.push(item);
                        outcome.metrics.successful_rows += 1;
                        table_had_items = true;
                    }
                    Err(reason) => {
                        if reason.is_conversion_error() {
                            outcome.metrics.data_conversion_errors += 1;
                        }
                        debug!(
                            element_index,
                            row_index,
                            row = ?table.rows.get(row_index),
                            reason = %reason,
                            "Skipping row"
                        );
                        outcome.skipped.push(SkippedRow {
                            element_index,
                            row_index,
                            reason,
                        });
                    }
                }
            }

            if table_had_items {
                outcome.metrics.successful_tables += 1;
            }
        }

        link_parents(&mut outcome.items);
        outcome
    }

    fn parse_row(table: &Table, row: usize, columns: &ColumnMap) -> Result<WbsLineItem, SkipReason> {
        let wbs_code = match WbsCode::parse(table.cell(row, columns.wbs_code).unwrap_or_default()) {
            Ok(code) => code,
            Err(WbsCodeError::Missing) => return Err(SkipReason::MissingWbsCode),
            Err(WbsCodeError::InvalidFormat(code)) => return Err(SkipReason::InvalidWbsCode(code)),
            Err(err @ WbsCodeError::TooLong(_)) => {
                return Err(SkipReason::ConversionError(err.to_string()));
            }
        };

        let description = table
            .cell(row, columns.description)
            .unwrap_or(MISSING_DESCRIPTION)
            .to_string();

        let unit_cost = parse_unit_cost(table.cell(row, columns.unit_cost)).map_err(conversion)?;
        let quantity = parse_quantity(table.cell(row, columns.quantity)).map_err(conversion)?;
        let duration_days = parse_duration_days(columns.duration.and_then(|col| table.cell(row, col)));

        if unit_cost < Decimal::ZERO {
            return Err(SkipReason::ConversionError(format!(
                "unit cost {unit_cost} is negative"
            )));
        }
        if quantity < MIN_QUANTITY {
            return Err(SkipReason::ConversionError(format!(
                "quantity {quantity} is below the minimum of {MIN_QUANTITY}"
            )));
        }
        if unit_cost.is_zero() {
            return Err(SkipReason::NonPositiveAmount);
        }

        let total_cost = unit_cost.checked_mul(quantity).ok_or_else(|| {
            SkipReason::ConversionError(format!(
                "total cost of {unit_cost} x {quantity} is out of range"
            ))
        })?;

        Ok(WbsLineItem {
            wbs_code,
            description,
            unit_cost_budgeted: unit_cost,
            quantity_budgeted: quantity,
            total_cost_budgeted: total_cost,
            duration_days_budgeted: duration_days,
            parent_wbs_id: None,
            parent_wbs_code: None,
        })
    }
}

fn conversion(err: ValueError) -> SkipReason {
    SkipReason::ConversionError(err.to_string())
}

/// Points each item at its parent code when the parent is in the same draft.
fn link_parents(items: &mut [WbsLineItem]) {
    let codes: HashSet<WbsCode> = items.iter().map(|item| item.wbs_code.clone()).collect();

    for item in items.iter_mut() {
        item.parent_wbs_code = item
            .wbs_code
            .parent()
            .filter(|parent| codes.contains(parent));
    }
}
