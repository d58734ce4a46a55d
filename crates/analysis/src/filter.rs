//! Threshold filtering of a normalized dataset.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use tracing::debug;

use fii_core::{Dataset, FilterCriteria, FundRecord};

/// Apply the four threshold filters and sort by dividend yield, highest
/// first.
///
/// All bounds are inclusive. The sort is stable: records with equal yield
/// keep their relative order from the input dataset. An empty result is a
/// valid outcome, not an error.
pub fn filter(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    let mut records: Vec<FundRecord> = dataset
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();
    records.sort_by_key(|r| Reverse(OrderedFloat(r.dividend_yield)));

    debug!(
        "filter selected {} of {} records",
        records.len(),
        dataset.len()
    );
    Dataset::new(records)
}
