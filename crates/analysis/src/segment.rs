//! Segment restriction and same-segment comparison.

use serde::{Deserialize, Serialize};

use fii_core::{Dataset, FundRecord};

/// Records whose segment equals `segment`, preserving relative order.
///
/// A pure projection: the grouping in [`crate::aggregate`] and the
/// entity-level comparison below both build on this restriction.
pub fn restrict_to_segment(dataset: &Dataset, segment: &str) -> Dataset {
    Dataset::new(
        dataset
            .iter()
            .filter(|r| r.segment == segment)
            .cloned()
            .collect(),
    )
}

/// A selected fund next to its same-segment peer group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentComparison {
    /// The selected record.
    pub selected: FundRecord,
    /// Every record sharing the selected record's segment, the selected
    /// record included, in dataset order.
    pub peers: Dataset,
    /// Mean dividend yield of the peer group, the reference value a caller
    /// plots against the selected fund.
    pub mean_dividend_yield: f64,
}

/// Build the same-segment comparison set for one ticker.
///
/// Returns `None` when the ticker is not present in the dataset.
pub fn compare_within_segment(dataset: &Dataset, ticker: &str) -> Option<SegmentComparison> {
    let selected = dataset.find(ticker)?.clone();
    let peers = restrict_to_segment(dataset, &selected.segment);
    // peers contains at least the selected record.
    let mean_dividend_yield =
        peers.iter().map(|r| r.dividend_yield).sum::<f64>() / peers.len() as f64;

    Some(SegmentComparison {
        selected,
        peers,
        mean_dividend_yield,
    })
}
