// Blended keyword extraction — the fixed-weight merge of both strategies.
//
// Each strategy is asked for twice the requested count, then scores are
// merged per term: 0.6 × tfidf + 0.4 × textrank. A term seen by only one
// strategy keeps that strategy's scaled contribution. The top max_count
// merged terms form the candidate pool; single-character terms in the pool
// are noise and get demoted behind the multi-character ones.

use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

use super::clean::TextCleaner;
use super::textrank::TextRankKeywords;
use super::tfidf::TfIdfKeywords;
use super::traits::{KeywordExtractor, WeightedKeyword};

/// Contribution weight of the frequency-based (TF-IDF) strategy.
const FREQUENCY_WEIGHT: f64 = 0.6;
/// Contribution weight of the graph-based (TextRank) strategy.
const GRAPH_WEIGHT: f64 = 0.4;

/// The default extractor: cleans and segments once, runs both strategies,
/// blends their scores.
pub struct BlendedExtractor {
    cleaner: TextCleaner,
    frequency: TfIdfKeywords,
    graph: TextRankKeywords,
}

impl BlendedExtractor {
    pub fn new() -> Self {
        let stop_words = stop_words::get(stop_words::LANGUAGE::Chinese);
        Self {
            cleaner: TextCleaner::new(),
            frequency: TfIdfKeywords::new(stop_words.clone()),
            graph: TextRankKeywords::new(stop_words),
        }
    }
}

impl Default for BlendedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor for BlendedExtractor {
    fn extract(&self, text: &str, max_count: usize) -> Result<Vec<WeightedKeyword>> {
        if max_count == 0 {
            return Ok(Vec::new());
        }

        let cleaned = self.cleaner.clean(text);
        if cleaned.is_empty() {
            return Ok(Vec::new());
        }

        // Ask each strategy for twice the target so the merge has slack
        let frequency = self.frequency.extract(&cleaned, max_count * 2)?;
        let graph = self.graph.extract(&cleaned, max_count * 2)?;

        let merged = merge_scores(&frequency, &graph);
        let result = filter_noise(merged, max_count);

        debug!(
            requested = max_count,
            extracted = result.len(),
            "Blended keyword extraction"
        );

        Ok(result)
    }
}

/// Merge the two strategies' score lists into a single weight-descending
/// list. Ties are broken lexicographically so the result is deterministic
/// regardless of map iteration order.
pub fn merge_scores(
    frequency: &[WeightedKeyword],
    graph: &[WeightedKeyword],
) -> Vec<WeightedKeyword> {
    let mut combined: HashMap<String, f64> = HashMap::new();

    for (word, score) in frequency {
        *combined.entry(word.clone()).or_insert(0.0) += score * FREQUENCY_WEIGHT;
    }
    for (word, score) in graph {
        *combined.entry(word.clone()).or_insert(0.0) += score * GRAPH_WEIGHT;
    }

    let mut merged: Vec<WeightedKeyword> = combined.into_iter().collect();
    merged.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    merged
}

/// Demote single-character noise within the top `max_count` merged terms.
///
/// The candidate pool is the top slice only — lower-ranked terms never
/// displace a single character that made the cut. Within the pool,
/// multi-character terms keep their order and single characters backfill
/// behind them in merged order.
pub fn filter_noise(mut merged: Vec<WeightedKeyword>, max_count: usize) -> Vec<WeightedKeyword> {
    merged.truncate(max_count);

    let mut kept = Vec::new();
    let mut discarded = Vec::new();
    for entry in merged {
        if entry.0.chars().count() > 1 {
            kept.push(entry);
        } else {
            discarded.push(entry);
        }
    }

    for entry in discarded {
        if kept.len() >= max_count {
            break;
        }
        kept.push(entry);
    }

    kept
}
