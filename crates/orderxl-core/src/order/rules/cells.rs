//! Cell-level predicates and conversions used by the table classifier.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::{BARE_NUMBER, COMPACT_DATE, ITEM_CODE, LINE_NUMBER, NUMERIC_CELL};

/// Flatten line breaks inside a cell and trim it. Missing cells become empty.
pub fn normalize_cell(cell: Option<&str>) -> String {
    match cell {
        Some(text) => text.replace("\r\n", " ").replace('\n', " ").trim().to_string(),
        None => String::new(),
    }
}

/// Check whether a cell starts with a structured item code.
pub fn match_item_code(cell: &str) -> bool {
    ITEM_CODE.is_match(cell)
}

/// Check whether a cell is a quantity-like number (`1,234.50`).
pub fn is_numeric_cell(cell: &str) -> bool {
    NUMERIC_CELL.is_match(cell) && cell.bytes().any(|b| b.is_ascii_digit())
}

/// Check whether a cell is a plain number without separators (`12`, `2.5`).
pub fn is_bare_number(cell: &str) -> bool {
    BARE_NUMBER.is_match(cell)
}

/// Check whether a cell is an all-digit line number.
pub fn is_line_number(cell: &str) -> bool {
    LINE_NUMBER.is_match(cell)
}

/// Reformat a `YYYYMMDD` cell as `YYYY-MM-DD`.
///
/// The digits are not checked against the calendar.
pub fn format_compact_date(cell: &str) -> Option<String> {
    let caps = COMPACT_DATE.captures(cell)?;
    Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}

/// Remove thousands separators.
pub fn strip_thousands(value: &str) -> String {
    value.replace(',', "")
}

/// Parse a document number (`1,234.5`, `12.`) as a decimal.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned = strip_thousands(value.trim());
    let cleaned = cleaned.strip_suffix('.').unwrap_or(&cleaned);
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cell() {
        assert_eq!(normalize_cell(Some(" Bracket\nKit ")), "Bracket Kit");
        assert_eq!(normalize_cell(Some("a\r\nb")), "a b");
        assert_eq!(normalize_cell(None), "");
    }

    #[test]
    fn test_match_item_code() {
        assert!(match_item_code("12.345.ABCDE"));
        assert!(match_item_code("12.345.67890"));
        assert!(match_item_code("12.345.A1 (rev)"));
        assert!(!match_item_code("1.345.ABCDE"));
        assert!(!match_item_code("12.34.ABCDE"));
        assert!(!match_item_code("x12.345.ABCDE"));
        assert!(!match_item_code("12.345."));
    }

    #[test]
    fn test_numeric_cells() {
        assert!(is_numeric_cell("10"));
        assert!(is_numeric_cell("2.50"));
        assert!(is_numeric_cell("1,234.56"));
        assert!(is_numeric_cell("12."));
        assert!(!is_numeric_cell(","));
        assert!(!is_numeric_cell("1.2.3"));
        assert!(!is_numeric_cell("pcs"));
        assert!(!is_numeric_cell(""));
    }

    #[test]
    fn test_bare_numbers() {
        assert!(is_bare_number("2"));
        assert!(is_bare_number("2.5"));
        assert!(!is_bare_number("1,000"));
        assert!(!is_bare_number("Rev"));
    }

    #[test]
    fn test_format_compact_date() {
        assert_eq!(format_compact_date("20240315"), Some("2024-03-15".to_string()));
        assert_eq!(format_compact_date("2024031"), None);
        assert_eq!(format_compact_date("202403150"), None);
        assert_eq!(format_compact_date("2024-03-15"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.50"), Some(Decimal::from_str("1234.50").unwrap()));
        assert_eq!(parse_amount("12."), Some(Decimal::from(12)));
        assert_eq!(parse_amount(" 7 "), Some(Decimal::from(7)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }
}
