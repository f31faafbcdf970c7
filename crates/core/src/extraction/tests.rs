//! Extraction tests over partitioned documents.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::extractor::LineItemExtractor;
use super::scoring::confidence_score;
use super::types::{ExtractionMetrics, SkipReason};
use crate::document::{Element, ElementKind, Table};

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        headers.iter().map(|h| (*h).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| (*c).to_string()).collect())
            .collect(),
    )
}

fn budget_template(rows: &[&[&str]]) -> Element {
    Element::table(
        "",
        Some(table(
            &[
                "S/N",
                "Item Description",
                "Unit Cost (NGN)",
                "Quantity",
                "Man-day (from source document)",
            ],
            rows,
        )),
        Some(1),
    )
}

#[test]
fn test_extracts_ngn_budget_template() {
    let elements = vec![
        Element::text(ElementKind::Title, "Alpha Project Budget", Some(1)),
        budget_template(&[
            &["1", "Site Mobilisation", "₦1,500,000.00", "1", "5 days"],
            &["1.1", "Surveyor", "45,000", "12", "12 Man-Day"],
            &["1.2", "", "2,500", "4", ""],
            &["TOTAL", "", "1,587,500", "", ""],
        ]),
    ];

    let outcome = LineItemExtractor::extract(&elements);

    assert_eq!(outcome.items.len(), 3);
    assert_eq!(
        outcome.metrics,
        ExtractionMetrics {
            total_tables: 1,
            successful_tables: 1,
            total_rows_attempted: 4,
            successful_rows: 3,
            data_conversion_errors: 0,
        }
    );

    let first = &outcome.items[0];
    assert_eq!(first.wbs_code.as_str(), "1");
    assert_eq!(first.unit_cost_budgeted, dec!(1500000.00));
    assert_eq!(first.duration_days_budgeted, Some(5));
    assert_eq!(first.parent_wbs_code, None);
    assert_eq!(first.parent_wbs_id, None);

    let surveyor = &outcome.items[1];
    assert_eq!(surveyor.total_cost_budgeted, dec!(540000));
    assert_eq!(surveyor.duration_days_budgeted, Some(12));
    assert_eq!(surveyor.parent_wbs_code.as_ref().unwrap().as_str(), "1");

    let blank = &outcome.items[2];
    assert_eq!(blank.description, "N/A");
    assert_eq!(blank.duration_days_budgeted, None);

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(
        outcome.skipped[0].reason,
        SkipReason::InvalidWbsCode("TOTAL".into())
    );
    assert_eq!(outcome.skipped[0].element_index, 1);
    assert_eq!(outcome.skipped[0].row_index, 3);
}

#[test]
fn test_conversion_errors_are_counted() {
    let elements = vec![budget_template(&[
        &["2.1", "Generator", "TBD", "1", ""],
        &["2.2", "Diesel", "800", "0", ""],
        &["2.3", "Cabling", "-5", "3", ""],
        &["2.4", "Labour", "12,000", "10", ""],
    ])];

    let outcome = LineItemExtractor::extract(&elements);

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.metrics.data_conversion_errors, 3);
    assert_eq!(outcome.metrics.total_rows_attempted, 4);
    assert!(outcome.skipped.iter().all(|row| row.reason.is_conversion_error()));
}

#[test]
fn test_overlong_wbs_code_counts_as_conversion_error() {
    let code = format!("1{}", ".1".repeat(25));
    assert_eq!(code.len(), 51);

    let elements = vec![budget_template(&[
        &[code.as_str(), "Deeply nested item", "100", "1", ""],
        &["7", "Supervision", "100", "1", ""],
    ])];

    let outcome = LineItemExtractor::extract(&elements);

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.metrics.data_conversion_errors, 1);
    assert!(matches!(outcome.skipped[0].reason, SkipReason::ConversionError(_)));
}

#[test]
fn test_out_of_range_amounts_count_as_conversion_errors() {
    let elements = vec![budget_template(&[
        // Decimal::MAX x 2 overflows the line total
        &["8.1", "Sovereign bond", "79228162514264337593543950335", "2", ""],
        &["8.2", "Astronomical", "1e100", "1", ""],
        &["8.3", "Undefined", "inf", "1", ""],
        &["8.4", "Ceiling", "1e28", "1", ""],
    ])];

    let outcome = LineItemExtractor::extract(&elements);

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.items[0].wbs_code.as_str(), "8.4");
    assert_eq!(outcome.metrics.data_conversion_errors, 3);
    match &outcome.skipped[0].reason {
        SkipReason::ConversionError(msg) => assert!(msg.contains("out of range")),
        other => panic!("unexpected skip reason: {other:?}"),
    }
}

#[test]
fn test_zero_unit_cost_is_skipped_without_error() {
    let elements = vec![budget_template(&[
        &["3.1", "Donated equipment", "0", "2", ""],
        &["", "continuation line", "", "", ""],
    ])];

    let outcome = LineItemExtractor::extract(&elements);

    assert!(outcome.items.is_empty());
    assert_eq!(outcome.metrics.data_conversion_errors, 0);
    assert_eq!(outcome.metrics.successful_tables, 0);
    assert_eq!(
        outcome
            .skipped
            .iter()
            .map(|row| row.reason.clone())
            .collect::<Vec<_>>(),
        vec![SkipReason::NonPositiveAmount, SkipReason::MissingWbsCode]
    );
}

#[test]
fn test_tables_without_essential_columns_count_but_contribute_no_rows() {
    let elements = vec![
        Element::table(
            "",
            Some(table(&["Name", "Amount"], &[&["Fuel", "100"]])),
            Some(1),
        ),
        Element::table("<table><tr>", None, Some(2)),
        budget_template(&[&["4", "Logistics", "9,000", "2", ""]]),
    ];

    let outcome = LineItemExtractor::extract(&elements);

    assert_eq!(outcome.metrics.total_tables, 3);
    assert_eq!(outcome.metrics.successful_tables, 1);
    assert_eq!(outcome.metrics.total_rows_attempted, 1);
    assert_eq!(outcome.items.len(), 1);
    assert_eq!(confidence_score(&outcome.metrics), dec!(0.5333));
}

#[test]
fn test_items_across_tables_keep_document_order_and_link_parents() {
    let elements = vec![
        budget_template(&[&["5", "Training", "1000", "1", ""]]),
        Element::text(ElementKind::NarrativeText, "continued on next page", Some(2)),
        Element::table(
            "",
            Some(table(
                &["WBS Code", "Item Description", "Unit Cost", "Quantity (Nos.)"],
                &[&["5.1", "Venue", "200", "3"], &["6.1", "Orphan", "10", "1"]],
            )),
            Some(2),
        ),
    ];

    let outcome = LineItemExtractor::extract(&elements);
    let codes: Vec<&str> = outcome.items.iter().map(|i| i.wbs_code.as_str()).collect();

    assert_eq!(codes, vec!["5", "5.1", "6.1"]);
    assert_eq!(outcome.items[1].parent_wbs_code.as_ref().unwrap().as_str(), "5");
    assert_eq!(outcome.items[2].parent_wbs_code, None);
}

#[test]
fn test_no_tables_yields_empty_outcome() {
    let elements = vec![Element::text(ElementKind::NarrativeText, "no tables here", None)];

    let outcome = LineItemExtractor::extract(&elements);

    assert!(outcome.items.is_empty());
    assert_eq!(outcome.metrics, ExtractionMetrics::default());
}

/// Strategy generating internally consistent metrics.
fn consistent_metrics() -> impl Strategy<Value = ExtractionMetrics> {
    (0usize..20, 0usize..500).prop_flat_map(|(tables, rows)| {
        (0..=tables, 0..=rows).prop_flat_map(move |(ok_tables, ok_rows)| {
            (0..=rows - ok_rows).prop_map(move |errors| ExtractionMetrics {
                total_tables: tables,
                successful_tables: ok_tables,
                total_rows_attempted: rows,
                successful_rows: ok_rows,
                data_conversion_errors: errors,
            })
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The score always lies within [0, 1].
    #[test]
    fn prop_score_is_bounded(metrics in consistent_metrics()) {
        let score = confidence_score(&metrics);
        prop_assert!(score >= Decimal::ZERO);
        prop_assert!(score <= Decimal::ONE);
    }

    /// The score never exceeds the combined success weights (0.8).
    #[test]
    fn prop_score_never_exceeds_combined_weights(metrics in consistent_metrics()) {
        prop_assert!(confidence_score(&metrics) <= dec!(0.8));
    }

    /// More conversion errors never raise the score.
    #[test]
    fn prop_errors_never_increase_score(metrics in consistent_metrics()) {
        prop_assume!(metrics.successful_rows + metrics.data_conversion_errors < metrics.total_rows_attempted);
        let worse = ExtractionMetrics {
            data_conversion_errors: metrics.data_conversion_errors + 1,
            ..metrics
        };
        prop_assert!(confidence_score(&worse) <= confidence_score(&metrics));
    }
}
