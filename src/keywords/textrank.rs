// TextRank keyword extraction strategy.
//
// Graph-based co-occurrence ranking via the `keyword_extraction` crate —
// words that co-occur with many other well-connected words rise to the top.
// Complements the frequency-based TF-IDF strategy: TextRank favors terms
// central to the post's structure even when they aren't the most frequent.
//
// Input must already be cleaned and segmented (see clean.rs).

use anyhow::Result;
use keyword_extraction::text_rank::{TextRank, TextRankParams};

use super::traits::{KeywordExtractor, WeightedKeyword};

/// Graph-based extraction strategy — the other half of the blend.
pub struct TextRankKeywords {
    stop_words: Vec<String>,
}

impl TextRankKeywords {
    pub fn new(stop_words: Vec<String>) -> Self {
        Self { stop_words }
    }
}

impl KeywordExtractor for TextRankKeywords {
    fn extract(&self, text: &str, max_count: usize) -> Result<Vec<WeightedKeyword>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let params = TextRankParams::WithDefaults(text, &self.stop_words);
        let text_rank = TextRank::new(params);

        let ranked = text_rank
            .get_ranked_word_scores(max_count)
            .into_iter()
            .map(|(word, score)| (word, score as f64))
            .collect();

        Ok(ranked)
    }
}
