//! Dataset-derived bounds for the filter input surface.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics};

use fii_core::{Dataset, FilterCriteria, FundRecord};

/// Inclusive `[low, high]` bound pair for one filter control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub low: f64,
    pub high: f64,
}

/// Valid ranges for the four filter thresholds, derived from a dataset at
/// refresh time.
///
/// Dividend yield, price-to-book and vacancy span the observed min/max. The
/// liquidity upper end is the 95th percentile, so a handful of extreme
/// outliers do not stretch the usable control range; the outlier records
/// themselves stay in the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterRanges {
    pub dividend_yield: Bound,
    pub price_to_book: Bound,
    pub vacancy_rate: Bound,
    pub liquidity: Bound,
}

impl FilterRanges {
    /// Derive ranges from a dataset; `None` when the dataset is empty.
    pub fn from_dataset(dataset: &Dataset) -> Option<Self> {
        if dataset.is_empty() {
            return None;
        }

        let liquidity_values: Vec<f64> = dataset.iter().map(|r| r.liquidity).collect();
        let liquidity_low = min_max(dataset, |r| r.liquidity).low;
        let mut liquidity_data = Data::new(liquidity_values);
        let liquidity_high = liquidity_data.percentile(95);

        Some(Self {
            dividend_yield: min_max(dataset, |r| r.dividend_yield),
            price_to_book: min_max(dataset, |r| r.price_to_book),
            vacancy_rate: min_max(dataset, |r| r.vacancy_rate),
            liquidity: Bound {
                low: liquidity_low,
                high: liquidity_high,
            },
        })
    }

    /// Criteria at the permissive end of every range: passes each record of
    /// the dataset the ranges were derived from.
    pub fn permissive(&self) -> FilterCriteria {
        FilterCriteria {
            min_dividend_yield: self.dividend_yield.low,
            max_price_to_book: self.price_to_book.high,
            max_vacancy_rate: self.vacancy_rate.high,
            min_liquidity: self.liquidity.low,
        }
    }
}

fn min_max(dataset: &Dataset, metric: impl Fn(&FundRecord) -> f64) -> Bound {
    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;
    for record in dataset.iter() {
        let value = metric(record);
        low = low.min(value);
        high = high.max(value);
    }
    Bound { low, high }
}
