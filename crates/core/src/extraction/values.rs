//! Cell value parsing.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// A cell that could not be converted to a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Blank cell.
    #[error("{0} is missing")]
    Missing(&'static str),

    /// Not a number.
    #[error("could not convert {field} '{raw}' to a number")]
    NotANumber {
        /// Field being parsed.
        field: &'static str,
        /// Raw cell text.
        raw: String,
    },
}

const CURRENCY_MARKERS: [&str; 2] = ["₦", "NGN"];

fn parse_decimal(field: &'static str, raw: Option<&str>, cleaned: &str) -> Result<Decimal, ValueError> {
    let raw = raw.ok_or(ValueError::Missing(field))?;
    if cleaned.is_empty() {
        return Err(ValueError::Missing(field));
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| ValueError::NotANumber {
            field,
            raw: raw.to_string(),
        })
}

/// Parses a unit cost: thousands separators and the naira sign or code are
/// ignored.
///
/// # Errors
///
/// Returns `ValueError` if the cell is blank or not numeric.
pub fn parse_unit_cost(raw: Option<&str>) -> Result<Decimal, ValueError> {
    let mut cleaned = raw.unwrap_or_default().replace(',', "");
    for marker in CURRENCY_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    parse_decimal("unit cost", raw, cleaned.trim())
}

/// Parses a quantity: thousands separators are ignored.
///
/// # Errors
///
/// Returns `ValueError` if the cell is blank or not numeric.
pub fn parse_quantity(raw: Option<&str>) -> Result<Decimal, ValueError> {
    let cleaned = raw.unwrap_or_default().replace(',', "");
    parse_decimal("quantity", raw, cleaned.trim())
}

/// Parses a duration such as `"12 Man-Day"`.
///
/// Only the first whitespace-separated token is considered; it must be all
/// digits. Anything else, including zero, yields `None`.
#[must_use]
pub fn parse_duration_days(raw: Option<&str>) -> Option<u32> {
    let token = raw?.split_whitespace().next()?;
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<u32>().ok().filter(|days| *days > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("1,500,000.00", dec!(1500000.00))]
    #[case("₦ 25,000", dec!(25000))]
    #[case("NGN 120.50", dec!(120.50))]
    #[case("  42 ", dec!(42))]
    #[case("1.5e3", dec!(1500))]
    #[case("-10", dec!(-10))]
    fn test_parse_unit_cost(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_unit_cost(Some(raw)).unwrap(), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("₦"))]
    fn test_parse_unit_cost_missing(#[case] raw: Option<&str>) {
        assert_eq!(
            parse_unit_cost(raw),
            Err(ValueError::Missing("unit cost"))
        );
    }

    #[test]
    fn test_parse_unit_cost_not_a_number() {
        let err = parse_unit_cost(Some("TBD")).unwrap_err();
        assert_eq!(err.to_string(), "could not convert unit cost 'TBD' to a number");
    }

    #[rstest]
    #[case("1e100")]
    #[case("79228162514264337593543950336")]
    #[case("inf")]
    fn test_parse_unit_cost_out_of_range(#[case] raw: &str) {
        assert!(matches!(
            parse_unit_cost(Some(raw)),
            Err(ValueError::NotANumber { field: "unit cost", .. })
        ));
    }

    #[test]
    fn test_parse_unit_cost_at_decimal_limits() {
        assert_eq!(parse_unit_cost(Some("1e28")).unwrap(), dec!(10000000000000000000000000000));
        assert_eq!(
            parse_unit_cost(Some("79,228,162,514,264,337,593,543,950,335")).unwrap(),
            Decimal::MAX
        );
    }

    #[test]
    fn test_parse_quantity_keeps_currency_text() {
        assert_eq!(parse_quantity(Some("1,200")).unwrap(), dec!(1200));
        assert!(parse_quantity(Some("₦5")).is_err());
    }

    #[rstest]
    #[case(Some("12 Man-Day"), Some(12))]
    #[case(Some("30"), Some(30))]
    #[case(Some("0"), None)]
    #[case(Some("1.5 days"), None)]
    #[case(Some("approx. 4"), None)]
    #[case(Some("   "), None)]
    #[case(None, None)]
    fn test_parse_duration_days(#[case] raw: Option<&str>, #[case] expected: Option<u32>) {
        assert_eq!(parse_duration_days(raw), expected);
    }
}
