//! Search across platforms.
//!
//! - [`scorer`]: relevance scores for a single platform page
//! - [`matching`]: when two hits are the same entity
//! - [`aggregator`]: concurrent fan-out, merge and ranking

pub mod aggregator;
pub mod matching;
pub mod scorer;

pub use aggregator::{AggregatedResult, SearchAggregator};
pub use matching::{EntityMatcher, NormalizedMatcher};
