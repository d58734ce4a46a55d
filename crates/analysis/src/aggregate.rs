//! Per-segment aggregation of a dataset.

use std::cmp::Reverse;
use std::collections::HashMap;

use fii_core::{Dataset, SegmentSummary, SelectionStats};

#[derive(Default)]
struct SegmentAccum {
    count: u32,
    dividend_yield: f64,
    price_to_book: f64,
    vacancy_rate: f64,
    liquidity: f64,
}

/// Group a dataset by segment and compute unweighted arithmetic means.
///
/// Summaries come back ordered by member count, largest first; segments
/// with equal counts keep the order their first record appeared in the
/// input. A segment appears only when it has members, so every count is at
/// least 1. Empty input gives empty output.
pub fn aggregate(dataset: &Dataset) -> Vec<SegmentSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, SegmentAccum> = HashMap::new();

    for record in dataset.iter() {
        let accum = groups.entry(record.segment.as_str()).or_insert_with(|| {
            order.push(record.segment.as_str());
            SegmentAccum::default()
        });
        accum.count += 1;
        accum.dividend_yield += record.dividend_yield;
        accum.price_to_book += record.price_to_book;
        accum.vacancy_rate += record.vacancy_rate;
        accum.liquidity += record.liquidity;
    }

    let mut summaries: Vec<SegmentSummary> = order
        .iter()
        .filter_map(|segment| groups.get(segment).map(|accum| summarize(segment, accum)))
        .collect();
    // Stable sort keeps first-appearance order for equal counts.
    summaries.sort_by_key(|s| Reverse(s.count));
    summaries
}

fn summarize(segment: &str, accum: &SegmentAccum) -> SegmentSummary {
    let n = accum.count as f64;
    SegmentSummary {
        segment: segment.to_string(),
        count: accum.count,
        mean_dividend_yield: accum.dividend_yield / n,
        mean_price_to_book: accum.price_to_book / n,
        mean_vacancy_rate: accum.vacancy_rate / n,
        mean_liquidity: accum.liquidity / n,
    }
}

/// Headline metrics for a filtered selection against its source dataset.
pub fn selection_stats(filtered: &Dataset, total: usize) -> SelectionStats {
    let selected = filtered.len();
    let (mean_dividend_yield, mean_price_to_book) = if selected == 0 {
        (None, None)
    } else {
        let n = selected as f64;
        (
            Some(filtered.iter().map(|r| r.dividend_yield).sum::<f64>() / n),
            Some(filtered.iter().map(|r| r.price_to_book).sum::<f64>() / n),
        )
    };

    SelectionStats {
        selected: selected as u32,
        total: total as u32,
        mean_dividend_yield,
        mean_price_to_book,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fii_core::FundRecord;

    fn make_record(ticker: &str, segment: &str, dy: f64, pvp: f64, vacancy: f64, liquidity: f64) -> FundRecord {
        FundRecord {
            ticker: ticker.to_string(),
            segment: segment.to_string(),
            quote: None,
            ffo_yield: None,
            dividend_yield: dy,
            price_to_book: pvp,
            market_value: None,
            liquidity,
            property_count: None,
            price_per_area: None,
            rent_per_area: None,
            cap_rate: None,
            vacancy_rate: vacancy,
        }
    }

    #[test]
    fn test_counts_partition_dataset() {
        let dataset = Dataset::new(vec![
            make_record("AAAA11", "Shopping", 8.0, 0.9, 5.0, 50_000.0),
            make_record("BBBB11", "Logistics", 6.0, 0.8, 1.0, 80_000.0),
            make_record("CCCC11", "Shopping", 10.0, 1.2, 2.0, 200_000.0),
            make_record("DDDD11", "Offices", 7.0, 0.7, 15.0, 30_000.0),
        ]);

        let summaries = aggregate(&dataset);
        let total: u32 = summaries.iter().map(|s| s.count).sum();
        assert_eq!(total as usize, dataset.len());
        for summary in &summaries {
            assert!(summary.count >= 1);
        }
    }

    #[test]
    fn test_means_are_exact() {
        let dataset = Dataset::new(vec![
            make_record("AAAA11", "Shopping", 8.0, 0.9, 5.0, 50_000.0),
            make_record("BBBB11", "Shopping", 10.0, 1.2, 2.0, 200_000.0),
        ]);

        let summaries = aggregate(&dataset);
        assert_eq!(summaries.len(), 1);

        let shopping = &summaries[0];
        assert_eq!(shopping.segment, "Shopping");
        assert_eq!(shopping.count, 2);
        assert_relative_eq!(shopping.mean_dividend_yield, 9.0);
        assert_relative_eq!(shopping.mean_price_to_book, 1.05);
        assert_relative_eq!(shopping.mean_vacancy_rate, 3.5);
        assert_relative_eq!(shopping.mean_liquidity, 125_000.0);
    }

    #[test]
    fn test_ordered_by_count_descending() {
        let dataset = Dataset::new(vec![
            make_record("AAAA11", "Offices", 7.0, 0.7, 15.0, 30_000.0),
            make_record("BBBB11", "Shopping", 8.0, 0.9, 5.0, 50_000.0),
            make_record("CCCC11", "Shopping", 10.0, 1.2, 2.0, 200_000.0),
            make_record("DDDD11", "Shopping", 9.0, 1.0, 4.0, 90_000.0),
            make_record("EEEE11", "Logistics", 6.0, 0.8, 1.0, 80_000.0),
            make_record("FFFF11", "Logistics", 6.5, 0.85, 1.5, 85_000.0),
        ]);

        let summaries = aggregate(&dataset);
        let segments: Vec<&str> = summaries.iter().map(|s| s.segment.as_str()).collect();
        assert_eq!(segments, vec!["Shopping", "Logistics", "Offices"]);
    }

    #[test]
    fn test_count_ties_keep_first_appearance_order() {
        let dataset = Dataset::new(vec![
            make_record("AAAA11", "Offices", 7.0, 0.7, 15.0, 30_000.0),
            make_record("BBBB11", "Logistics", 6.0, 0.8, 1.0, 80_000.0),
            make_record("CCCC11", "Shopping", 8.0, 0.9, 5.0, 50_000.0),
        ]);

        let summaries = aggregate(&dataset);
        let segments: Vec<&str> = summaries.iter().map(|s| s.segment.as_str()).collect();
        assert_eq!(segments, vec!["Offices", "Logistics", "Shopping"]);
    }

    #[test]
    fn test_empty_dataset_aggregates_to_nothing() {
        assert!(aggregate(&Dataset::empty()).is_empty());
    }

    #[test]
    fn test_selection_stats() {
        let filtered = Dataset::new(vec![
            make_record("AAAA11", "Shopping", 8.0, 0.9, 5.0, 50_000.0),
            make_record("BBBB11", "Shopping", 10.0, 1.2, 2.0, 200_000.0),
        ]);

        let stats = selection_stats(&filtered, 10);
        assert_eq!(stats.selected, 2);
        assert_eq!(stats.total, 10);
        assert_relative_eq!(stats.mean_dividend_yield.unwrap(), 9.0);
        assert_relative_eq!(stats.mean_price_to_book.unwrap(), 1.05);
    }

    #[test]
    fn test_selection_stats_empty() {
        let stats = selection_stats(&Dataset::empty(), 10);
        assert_eq!(stats.selected, 0);
        assert_eq!(stats.mean_dividend_yield, None);
        assert_eq!(stats.mean_price_to_book, None);
    }
}
