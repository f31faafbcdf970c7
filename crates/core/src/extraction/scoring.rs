//! Extraction confidence scoring.
//!
//! ```text
//! score = 0.4 * successful_tables / total_tables
//!       + 0.4 * successful_rows / total_rows_attempted
//!       - 0.2 * data_conversion_errors / total_rows_attempted
//! ```
//!
//! Each ratio is zero when its denominator is zero. The result is clamped to
//! `[0, 1]`.

use rust_decimal::Decimal;

use super::types::ExtractionMetrics;

/// Weight of the table success rate (0.4).
pub const TABLE_WEIGHT: Decimal = Decimal::from_parts(4, 0, 0, false, 1);

/// Weight of the row success rate (0.4).
pub const ROW_WEIGHT: Decimal = Decimal::from_parts(4, 0, 0, false, 1);

/// Weight of the conversion error penalty (0.2).
pub const ERROR_PENALTY_WEIGHT: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Decimal places kept in the reported score.
pub const SCORE_DECIMAL_PLACES: u32 = 4;

fn ratio(numerator: usize, denominator: usize) -> Decimal {
    if denominator == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(numerator) / Decimal::from(denominator)
    }
}

/// Calculates the confidence score for a set of extraction metrics.
#[must_use]
pub fn confidence_score(metrics: &ExtractionMetrics) -> Decimal {
    let table_rate = ratio(metrics.successful_tables, metrics.total_tables);
    let row_rate = ratio(metrics.successful_rows, metrics.total_rows_attempted);
    let error_rate = ratio(metrics.data_conversion_errors, metrics.total_rows_attempted);

    let score = TABLE_WEIGHT * table_rate + ROW_WEIGHT * row_rate - ERROR_PENALTY_WEIGHT * error_rate;

    score
        .clamp(Decimal::ZERO, Decimal::ONE)
        .round_dp(SCORE_DECIMAL_PLACES)
}
