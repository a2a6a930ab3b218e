// TF-IDF keyword extraction strategy.
//
// Uses the `keyword_extraction` crate with each sentence of the post as a
// separate document for IDF computation — words that appear in every
// sentence get downweighted, while words distinctive to certain sentences
// get boosted.
//
// Input must already be cleaned and segmented (see clean.rs): one sentence
// per line, words separated by spaces.

use anyhow::Result;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};

use super::traits::{KeywordExtractor, WeightedKeyword};

/// Corpus-frequency extraction strategy — one half of the blend.
pub struct TfIdfKeywords {
    stop_words: Vec<String>,
}

impl TfIdfKeywords {
    pub fn new(stop_words: Vec<String>) -> Self {
        Self { stop_words }
    }
}

impl KeywordExtractor for TfIdfKeywords {
    fn extract(&self, text: &str, max_count: usize) -> Result<Vec<WeightedKeyword>> {
        let documents: Vec<String> = text.lines().map(str::to_string).collect();
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let params = TfIdfParams::UnprocessedDocuments(&documents, &self.stop_words, None);
        let tfidf = TfIdf::new(params);

        let ranked = tfidf
            .get_ranked_word_scores(max_count)
            .into_iter()
            .map(|(word, score)| (word, score as f64))
            .collect();

        Ok(ranked)
    }
}
