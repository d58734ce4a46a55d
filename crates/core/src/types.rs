//! Core data types for the FII screening pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of columns in the source listing table, in the fixed source order:
/// ticker, segment, quote, ffo_yield, dividend_yield, price_to_book,
/// market_value, liquidity, property_count, price_per_area, rent_per_area,
/// cap_rate, vacancy_rate.
pub const COLUMN_COUNT: usize = 13;

/// A raw table cell before any field-level parsing.
///
/// The HTML extractor emits `Text` or `Missing`; `Number` carries values from
/// sources that are already numeric and passes through parsing unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawCell {
    /// Textual cell content, whitespace-normalized.
    Text(String),
    /// Already-numeric cell content.
    Number(f64),
    /// Empty cell.
    Missing,
}

impl RawCell {
    /// Build a cell from extracted text, mapping empty text to `Missing`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            RawCell::Missing
        } else {
            RawCell::Text(text)
        }
    }
}

/// The raw listing as extracted from the source document: header names plus
/// rows of exactly [`COLUMN_COUNT`] cells. Constructed only through
/// [`RawTable::new`] so the shape invariant always holds.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Create a raw table, validating that the header and every row have
    /// exactly [`COLUMN_COUNT`] cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> Result<Self> {
        if headers.len() != COLUMN_COUNT {
            return Err(Error::parse(format!(
                "expected {} columns, found {} in header",
                COLUMN_COUNT,
                headers.len()
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != COLUMN_COUNT {
                return Err(Error::parse(format!(
                    "expected {} columns, found {} in row {}",
                    COLUMN_COUNT,
                    row.len(),
                    i
                )));
            }
        }
        Ok(Self { headers, rows })
    }

    /// Header names as found in the source (informational; field assignment
    /// is positional).
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, each exactly [`COLUMN_COUNT`] cells wide.
    pub fn rows(&self) -> &[Vec<RawCell>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One listing row after positional field assignment and numeric parsing,
/// before validity rules are applied. All metrics are still optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub ticker: Option<String>,
    pub segment: Option<String>,
    pub quote: Option<f64>,
    pub ffo_yield: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub price_to_book: Option<f64>,
    pub market_value: Option<f64>,
    pub liquidity: Option<f64>,
    pub property_count: Option<u32>,
    pub price_per_area: Option<f64>,
    pub rent_per_area: Option<f64>,
    pub cap_rate: Option<f64>,
    pub vacancy_rate: Option<f64>,
}

/// One listed fund after normalization.
///
/// The critical screening metrics (dividend yield, price-to-book, vacancy,
/// liquidity) are present by construction; `liquidity` is strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    /// Exchange ticker, unique within a dataset.
    pub ticker: String,
    /// Segment the fund operates in (e.g. "Shoppings", "Logística").
    pub segment: String,
    /// Last quoted price, BRL.
    pub quote: Option<f64>,
    /// FFO yield, percent.
    pub ffo_yield: Option<f64>,
    /// Trailing dividend yield, percent.
    pub dividend_yield: f64,
    /// Market price over book value per share.
    pub price_to_book: f64,
    /// Market capitalization, BRL.
    pub market_value: Option<f64>,
    /// Average daily traded value, BRL. Strictly positive.
    pub liquidity: f64,
    /// Number of properties in the portfolio.
    pub property_count: Option<u32>,
    /// Average price per square meter, BRL.
    pub price_per_area: Option<f64>,
    /// Average rent per square meter, BRL.
    pub rent_per_area: Option<f64>,
    /// Cap rate, percent.
    pub cap_rate: Option<f64>,
    /// Average vacancy rate, percent.
    pub vacancy_rate: f64,
}

/// An ordered, immutable collection of fund records produced by one
/// fetch-and-normalize run. Superseded wholesale on the next refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<FundRecord>,
}

impl Dataset {
    /// Create a dataset from normalized records, preserving their order.
    pub fn new(records: Vec<FundRecord>) -> Self {
        Self { records }
    }

    /// Create an empty dataset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &FundRecord> {
        self.records.iter()
    }

    /// Records as a slice, in dataset order.
    pub fn records(&self) -> &[FundRecord] {
        &self.records
    }

    /// Look up a record by ticker.
    pub fn find(&self, ticker: &str) -> Option<&FundRecord> {
        self.records.iter().find(|r| r.ticker == ticker)
    }
}

/// Threshold filters applied to a dataset. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Minimum trailing dividend yield, percent.
    pub min_dividend_yield: f64,
    /// Maximum price-to-book ratio.
    pub max_price_to_book: f64,
    /// Maximum vacancy rate, percent.
    pub max_vacancy_rate: f64,
    /// Minimum average daily liquidity, BRL.
    pub min_liquidity: f64,
}

impl FilterCriteria {
    /// Whether a record satisfies all four thresholds.
    pub fn matches(&self, record: &FundRecord) -> bool {
        record.dividend_yield >= self.min_dividend_yield
            && record.price_to_book <= self.max_price_to_book
            && record.vacancy_rate <= self.max_vacancy_rate
            && record.liquidity >= self.min_liquidity
    }
}

/// Per-segment aggregate over a dataset. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Segment value shared by the member records.
    pub segment: String,
    /// Number of member records, at least 1 by construction.
    pub count: u32,
    /// Unweighted mean dividend yield, percent.
    pub mean_dividend_yield: f64,
    /// Unweighted mean price-to-book ratio.
    pub mean_price_to_book: f64,
    /// Unweighted mean vacancy rate, percent.
    pub mean_vacancy_rate: f64,
    /// Unweighted mean liquidity, BRL.
    pub mean_liquidity: f64,
}

/// Headline metrics for a filtered selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStats {
    /// Records passing the filter.
    pub selected: u32,
    /// Records in the full dataset the filter ran against.
    pub total: u32,
    /// Mean dividend yield of the selection, `None` when empty.
    pub mean_dividend_yield: Option<f64>,
    /// Mean price-to-book of the selection, `None` when empty.
    pub mean_price_to_book: Option<f64>,
}
