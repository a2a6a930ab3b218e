// Keyword extractor trait — swap-ready abstraction.
//
// Both statistical strategies and the blended extractor that combines them
// implement this trait, so the recommendation pipeline never knows which
// algorithm produced its weighted terms.

use anyhow::Result;

/// A candidate keyword with its relative importance score.
pub type WeightedKeyword = (String, f64);

/// Trait for extracting weighted keywords from post text.
///
/// Returns at most `max_count` terms ordered by weight descending. An empty
/// result is not an error — short or empty posts simply yield nothing.
pub trait KeywordExtractor: Send + Sync {
    fn extract(&self, text: &str, max_count: usize) -> Result<Vec<WeightedKeyword>>;
}
