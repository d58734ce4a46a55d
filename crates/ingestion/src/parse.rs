//! Locale-aware parsing of raw listing cells.
//!
//! The source formats numbers Brazilian-style: `.` as the thousands
//! separator, `,` as the decimal separator, percentages with a trailing `%`.
//! All parsers here are total: a cell that cannot be parsed yields `None`,
//! it never fails the caller.

use fii_core::RawCell;

/// Parse a percentage-bearing cell.
///
/// `Number` passes through unchanged and `Missing` is `None`. `Text` is
/// cleaned (thousands dots stripped, decimal comma converted, percent sign
/// removed) and parsed; text that is empty or unparseable after cleaning is
/// `None`.
///
/// `"1.234,56%"` parses to `1234.56`, `"12,3%"` to `12.3`.
pub fn parse_percent(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(n) => Some(*n),
        RawCell::Missing => None,
        RawCell::Text(s) => {
            let cleaned = s.replace('.', "").replace(',', ".").replace('%', "");
            parse_cleaned(&cleaned)
        }
    }
}

/// Parse a plain numeric cell with the same locale rules, minus the percent
/// sign. A stray `%` in a plain numeric cell makes it unparseable, matching
/// the coerce-to-missing behavior of the source pipeline.
pub fn parse_number(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(n) => Some(*n),
        RawCell::Missing => None,
        RawCell::Text(s) => {
            let cleaned = s.replace('.', "").replace(',', ".");
            parse_cleaned(&cleaned)
        }
    }
}

/// Parse an integer-count cell. Negative values do not occur in the source
/// and are treated as unparseable.
pub fn parse_count(cell: &RawCell) -> Option<u32> {
    parse_number(cell)
        .filter(|v| *v >= 0.0)
        .map(|v| v as u32)
}

fn parse_cleaned(cleaned: &str) -> Option<f64> {
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        cleaned.parse().ok()
    }
}
