pub mod priority;

use crate::core::{CityMatch, RawCityRecord};

pub use priority::PriorityRanker;

/// Maximum number of matches a ranker returns
pub const MAX_RESULTS: usize = 15;

/// Trait for city match ranking implementations
pub trait CityRanker: Send + Sync {
    /// Order raw matches by relevance, truncated to [`MAX_RESULTS`]
    ///
    /// Pure function of its inputs: same query and matches always produce
    /// the same output, and the output is a subset of the input.
    fn rank(&self, query: &str, candidates: &[RawCityRecord]) -> Vec<CityMatch>;

    /// Get ranker name for logging
    fn name(&self) -> &str;
}
