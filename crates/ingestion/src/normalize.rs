//! Normalization of the raw listing into a clean dataset.
//!
//! Positional column assignment, locale-aware parsing, and the row validity
//! rules: the four critical metrics must parse, liquidity must be positive,
//! tickers must be unique. Invalid rows are excluded, never fatal, and every
//! exclusion is recorded and logged.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use fii_core::{Dataset, FundRecord, RawCell, RawRecord, RawTable};

use crate::parse::{parse_count, parse_number, parse_percent};

/// Column positions in the source listing.
mod col {
    pub const TICKER: usize = 0;
    pub const SEGMENT: usize = 1;
    pub const QUOTE: usize = 2;
    pub const FFO_YIELD: usize = 3;
    pub const DIVIDEND_YIELD: usize = 4;
    pub const PRICE_TO_BOOK: usize = 5;
    pub const MARKET_VALUE: usize = 6;
    pub const LIQUIDITY: usize = 7;
    pub const PROPERTY_COUNT: usize = 8;
    pub const PRICE_PER_AREA: usize = 9;
    pub const RENT_PER_AREA: usize = 10;
    pub const CAP_RATE: usize = 11;
    pub const VACANCY_RATE: usize = 12;
}

/// Why a row was excluded from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropReason {
    /// Ticker cell was empty.
    MissingTicker,
    /// Dividend yield missing or unparseable.
    MissingDividendYield,
    /// Price-to-book missing or unparseable.
    MissingPriceToBook,
    /// Vacancy rate missing or unparseable.
    MissingVacancyRate,
    /// Liquidity missing or unparseable.
    MissingLiquidity,
    /// Liquidity parsed but is zero or negative.
    NonPositiveLiquidity,
    /// An earlier row already claimed this ticker.
    DuplicateTicker,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DropReason::MissingTicker => "missing ticker",
            DropReason::MissingDividendYield => "missing or unparseable dividend yield",
            DropReason::MissingPriceToBook => "missing or unparseable price-to-book",
            DropReason::MissingVacancyRate => "missing or unparseable vacancy rate",
            DropReason::MissingLiquidity => "missing or unparseable liquidity",
            DropReason::NonPositiveLiquidity => "liquidity is zero or negative",
            DropReason::DuplicateTicker => "duplicate ticker",
        };
        f.write_str(msg)
    }
}

/// Outcome of validating a single parsed row.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    /// Row satisfies all validity rules.
    Valid(FundRecord),
    /// Row is excluded for the given reason.
    Invalid {
        /// Ticker of the excluded row, empty when the ticker itself was
        /// missing.
        ticker: String,
        /// Why the row was excluded.
        reason: DropReason,
    },
}

/// A row excluded during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedRow {
    /// Ticker of the excluded row, empty when missing.
    pub ticker: String,
    /// Why the row was excluded.
    pub reason: DropReason,
}

/// Result of normalizing a raw table: the clean dataset plus the audit trail
/// of excluded rows.
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    /// Records that passed all validity rules, in source order.
    pub dataset: Dataset,
    /// Rows excluded, in source order.
    pub dropped: Vec<DroppedRow>,
}

impl NormalizedBatch {
    /// Discard the audit trail and keep the dataset.
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

/// Normalize a shape-valid raw table into a clean dataset.
///
/// Row-level failures shrink the output and are returned in the batch's
/// `dropped` list; this operation itself cannot fail.
pub fn normalize(table: &RawTable) -> NormalizedBatch {
    let mut records = Vec::with_capacity(table.len());
    let mut dropped = Vec::new();
    let mut seen_tickers: HashSet<String> = HashSet::new();

    for row in table.rows() {
        let raw = assign_fields(row);
        match validate(raw) {
            ValidationOutcome::Valid(record) => {
                if seen_tickers.insert(record.ticker.clone()) {
                    records.push(record);
                } else {
                    dropped.push(DroppedRow {
                        ticker: record.ticker,
                        reason: DropReason::DuplicateTicker,
                    });
                }
            }
            ValidationOutcome::Invalid { ticker, reason } => {
                dropped.push(DroppedRow { ticker, reason });
            }
        }
    }

    if !dropped.is_empty() {
        warn!(
            "normalization excluded {} of {} rows",
            dropped.len(),
            table.len()
        );
        for drop in &dropped {
            debug!("excluded row '{}': {}", drop.ticker, drop.reason);
        }
    }

    NormalizedBatch {
        dataset: Dataset::new(records),
        dropped,
    }
}

/// Assign the fixed-order columns to canonical fields, parsing numerics.
fn assign_fields(row: &[RawCell]) -> RawRecord {
    RawRecord {
        ticker: cell_string(&row[col::TICKER]),
        segment: cell_string(&row[col::SEGMENT]),
        quote: parse_number(&row[col::QUOTE]),
        ffo_yield: parse_percent(&row[col::FFO_YIELD]),
        dividend_yield: parse_percent(&row[col::DIVIDEND_YIELD]),
        price_to_book: parse_number(&row[col::PRICE_TO_BOOK]),
        market_value: parse_number(&row[col::MARKET_VALUE]),
        liquidity: parse_number(&row[col::LIQUIDITY]),
        property_count: parse_count(&row[col::PROPERTY_COUNT]),
        price_per_area: parse_number(&row[col::PRICE_PER_AREA]),
        rent_per_area: parse_number(&row[col::RENT_PER_AREA]),
        cap_rate: parse_percent(&row[col::CAP_RATE]),
        vacancy_rate: parse_percent(&row[col::VACANCY_RATE]),
    }
}

fn cell_string(cell: &RawCell) -> Option<String> {
    match cell {
        RawCell::Text(s) => Some(s.clone()),
        RawCell::Number(n) => Some(n.to_string()),
        RawCell::Missing => None,
    }
}

/// Validate a parsed row against the critical-metric rules.
pub fn validate(raw: RawRecord) -> ValidationOutcome {
    let ticker = match raw.ticker {
        Some(t) => t,
        None => {
            return ValidationOutcome::Invalid {
                ticker: String::new(),
                reason: DropReason::MissingTicker,
            }
        }
    };

    let dividend_yield = match raw.dividend_yield {
        Some(v) => v,
        None => return invalid(ticker, DropReason::MissingDividendYield),
    };
    let price_to_book = match raw.price_to_book {
        Some(v) => v,
        None => return invalid(ticker, DropReason::MissingPriceToBook),
    };
    let vacancy_rate = match raw.vacancy_rate {
        Some(v) => v,
        None => return invalid(ticker, DropReason::MissingVacancyRate),
    };
    let liquidity = match raw.liquidity {
        Some(v) => v,
        None => return invalid(ticker, DropReason::MissingLiquidity),
    };
    if liquidity <= 0.0 {
        return invalid(ticker, DropReason::NonPositiveLiquidity);
    }

    ValidationOutcome::Valid(FundRecord {
        ticker,
        segment: raw.segment.unwrap_or_default(),
        quote: raw.quote,
        ffo_yield: raw.ffo_yield,
        dividend_yield,
        price_to_book,
        market_value: raw.market_value,
        liquidity,
        property_count: raw.property_count,
        price_per_area: raw.price_per_area,
        rent_per_area: raw.rent_per_area,
        cap_rate: raw.cap_rate,
        vacancy_rate,
    })
}

fn invalid(ticker: String, reason: DropReason) -> ValidationOutcome {
    ValidationOutcome::Invalid { ticker, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fii_core::COLUMN_COUNT;

    fn make_row(ticker: &str, dy: &str, pvp: &str, vacancy: &str, liquidity: &str) -> Vec<RawCell> {
        let cells = [
            ticker,
            "Shoppings",
            "74,50",
            "9,5%",
            dy,
            pvp,
            "900.000.000",
            liquidity,
            "12",
            "5.000",
            "45",
            "10,0%",
            vacancy,
        ];
        cells.iter().map(|s| RawCell::from_text(*s)).collect()
    }

    fn make_table(rows: Vec<Vec<RawCell>>) -> RawTable {
        let headers: Vec<String> = (0..COLUMN_COUNT).map(|i| format!("col{}", i)).collect();
        RawTable::new(headers, rows).unwrap()
    }

    #[test]
    fn test_valid_row_normalizes() {
        let table = make_table(vec![make_row("ABCP11", "8,0%", "0,90", "5,0%", "50.000")]);
        let batch = normalize(&table);

        assert_eq!(batch.dataset.len(), 1);
        assert!(batch.dropped.is_empty());

        let record = &batch.dataset.records()[0];
        assert_eq!(record.ticker, "ABCP11");
        assert_eq!(record.segment, "Shoppings");
        assert_eq!(record.dividend_yield, 8.0);
        assert_eq!(record.price_to_book, 0.9);
        assert_eq!(record.vacancy_rate, 5.0);
        assert_eq!(record.liquidity, 50_000.0);
        assert_eq!(record.quote, Some(74.5));
        assert_eq!(record.property_count, Some(12));
        assert_eq!(record.cap_rate, Some(10.0));
    }

    #[test]
    fn test_critical_metrics_present_in_output() {
        let table = make_table(vec![
            make_row("AAAA11", "8,0%", "0,90", "5,0%", "50.000"),
            make_row("BBBB11", "", "1,20", "2,0%", "200.000"),
            make_row("CCCC11", "6,0%", "", "1,0%", "80.000"),
            make_row("DDDD11", "6,0%", "0,80", "", "80.000"),
            make_row("EEEE11", "6,0%", "0,80", "1,0%", ""),
        ]);
        let batch = normalize(&table);

        // Only the fully-populated row survives; liquidity > 0 everywhere.
        assert_eq!(batch.dataset.len(), 1);
        assert_eq!(batch.dropped.len(), 4);
        for record in batch.dataset.iter() {
            assert!(record.liquidity > 0.0);
        }

        let reasons: Vec<DropReason> = batch.dropped.iter().map(|d| d.reason).collect();
        assert_eq!(
            reasons,
            vec![
                DropReason::MissingDividendYield,
                DropReason::MissingPriceToBook,
                DropReason::MissingVacancyRate,
                DropReason::MissingLiquidity,
            ]
        );
    }

    #[test]
    fn test_zero_liquidity_dropped() {
        let table = make_table(vec![make_row("ABCP11", "8,0%", "0,90", "5,0%", "0")]);
        let batch = normalize(&table);

        assert!(batch.dataset.is_empty());
        assert_eq!(batch.dropped[0].reason, DropReason::NonPositiveLiquidity);
        assert_eq!(batch.dropped[0].ticker, "ABCP11");
    }

    #[test]
    fn test_duplicate_ticker_first_wins() {
        let table = make_table(vec![
            make_row("ABCP11", "8,0%", "0,90", "5,0%", "50.000"),
            make_row("ABCP11", "9,0%", "1,10", "2,0%", "80.000"),
        ]);
        let batch = normalize(&table);

        assert_eq!(batch.dataset.len(), 1);
        assert_eq!(batch.dataset.records()[0].dividend_yield, 8.0);
        assert_eq!(batch.dropped[0].reason, DropReason::DuplicateTicker);
    }

    #[test]
    fn test_missing_ticker_dropped() {
        let table = make_table(vec![make_row("", "8,0%", "0,90", "5,0%", "50.000")]);
        let batch = normalize(&table);

        assert!(batch.dataset.is_empty());
        assert_eq!(batch.dropped[0].reason, DropReason::MissingTicker);
    }

    #[test]
    fn test_non_critical_fields_may_be_missing() {
        let mut row = make_row("ABCP11", "8,0%", "0,90", "5,0%", "50.000");
        row[col::QUOTE] = RawCell::Missing;
        row[col::FFO_YIELD] = RawCell::Missing;
        row[col::CAP_RATE] = RawCell::Text("n/d".to_string());
        let table = make_table(vec![row]);

        let batch = normalize(&table);
        assert_eq!(batch.dataset.len(), 1);

        let record = &batch.dataset.records()[0];
        assert_eq!(record.quote, None);
        assert_eq!(record.ffo_yield, None);
        assert_eq!(record.cap_rate, None);
    }

    #[test]
    fn test_empty_table_normalizes_to_empty_dataset() {
        let batch = normalize(&make_table(Vec::new()));
        assert!(batch.dataset.is_empty());
        assert!(batch.dropped.is_empty());
    }
}
