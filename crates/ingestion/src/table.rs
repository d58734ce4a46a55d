//! HTML listing table extraction.

use fii_core::{Error, RawCell, RawTable, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// Selector strings are compile-time constants; Selector::parse only fails on
// malformed CSS syntax, which cannot occur here.
static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());

/// Extract the first table in the document as a [`RawTable`].
///
/// The first row is treated as the header. The header and every data row
/// must match the expected column schema; any mismatch is a parse error.
/// Empty cells become [`RawCell::Missing`].
pub fn extract_table(html: &str) -> Result<RawTable> {
    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or_else(|| Error::parse("no table found in response body"))?;

    let mut rows = table.select(&ROW_SELECTOR);
    let header = rows
        .next()
        .ok_or_else(|| Error::parse("listing table has no rows"))?;
    let headers: Vec<String> = header.select(&CELL_SELECTOR).map(cell_text).collect();

    let data: Vec<Vec<RawCell>> = rows
        .map(|row| {
            row.select(&CELL_SELECTOR)
                .map(|cell| RawCell::from_text(cell_text(cell)))
                .collect()
        })
        .collect();

    RawTable::new(headers, data)
}

fn cell_text(cell: ElementRef) -> String {
    let joined: String = cell.text().collect::<Vec<_>>().join(" ");
    normalize_whitespace(&joined)
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
