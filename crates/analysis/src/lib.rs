//! Filtering, aggregation and segment analysis over normalized datasets.
//!
//! Everything here is a pure function over an input [`fii_core::Dataset`]:
//! new collections come back, the input is never mutated, so different
//! criteria can be evaluated concurrently over the same dataset. An empty
//! dataset is a valid terminal input throughout and produces empty output.

pub mod aggregate;
pub mod filter;
pub mod ranges;
pub mod segment;

pub use aggregate::{aggregate, selection_stats};
pub use filter::filter;
pub use ranges::{Bound, FilterRanges};
pub use segment::{compare_within_segment, restrict_to_segment, SegmentComparison};
