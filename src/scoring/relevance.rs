// Keyword relevance scoring and ranking.
//
// Ranks a board's curated popularity entries against the keywords extracted
// from a post. Match strength dominates (70%), raw board popularity keeps a
// minority share (30%); entries with no match at all fall back to a heavily
// discounted pure-popularity score so ranking still produces a sensible
// order for posts the extractor can't read.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::keywords::traits::WeightedKeyword;
use crate::reference::{PopularEntry, ReferenceSet};

/// Configurable weights for the relevance formula.
///
/// `raw = direct + Σ related_contributions`, then
/// `final = raw * match_share + popularity/100 * popularity_share` when
/// raw > 0, else `popularity/100 * popularity_discount`.
pub struct RelevanceWeights {
    /// Bonus per extracted weight for a verbatim match on the entry's own
    /// keyword (default 10.0)
    pub direct_bonus: f64,
    /// Bonus per extracted weight for a verbatim match on a related term
    /// (default 5.0)
    pub related_bonus: f64,
    /// Bonus per extracted weight for a substring match in either direction
    /// (default 2.0) — at most one contribution per related term
    pub partial_bonus: f64,
    /// Share of the final score driven by match strength (default 0.7)
    pub match_share: f64,
    /// Share of the final score driven by board popularity (default 0.3)
    pub popularity_share: f64,
    /// Discount applied to popularity when nothing matched (default 0.1)
    pub popularity_discount: f64,
    /// Entries scoring at or below this don't count as real matches when
    /// deciding whether to pad the result (default 0.1)
    pub backfill_threshold: f64,
    /// Nominal score assigned to padded entries (default 0.05)
    pub pad_score: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            direct_bonus: 10.0,
            related_bonus: 5.0,
            partial_bonus: 2.0,
            match_share: 0.7,
            popularity_share: 0.3,
            popularity_discount: 0.1,
            backfill_threshold: 0.1,
            pad_score: 0.05,
        }
    }
}

/// A recommended hot keyword — the public shape, score already dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotKeyword {
    pub keyword: String,
    pub popularity: u8,
    pub related: Vec<String>,
}

/// A reference entry with its computed relevance score. Request-scoped;
/// trimmed down to HotKeyword before leaving the engine.
struct ScoredCandidate<'a> {
    entry: &'a PopularEntry,
    score: f64,
}

/// Score a single reference entry against the extracted keywords.
///
/// `extracted` must be in extraction order (weight descending): the partial
/// substring rule takes the FIRST qualifying extracted keyword, so order is
/// part of the contract. The substring rule is intentionally loose and can
/// overmatch on short strings; tightening it would silently shift rankings.
pub fn score_entry(
    entry: &PopularEntry,
    extracted: &[WeightedKeyword],
    weights: &RelevanceWeights,
) -> f64 {
    let by_term: HashMap<&str, f64> = extracted
        .iter()
        .map(|(term, weight)| (term.as_str(), *weight))
        .collect();

    let mut raw = 0.0;

    // Verbatim match on the entry's own keyword
    if by_term.contains_key(entry.keyword.as_str()) {
        let weight = by_term.get(entry.keyword.as_str()).copied().unwrap_or(1.0);
        raw += weights.direct_bonus * weight;
    }

    for related in &entry.related {
        if by_term.contains_key(related.as_str()) {
            // Verbatim match on a related term
            let weight = by_term.get(related.as_str()).copied().unwrap_or(0.5);
            raw += weights.related_bonus * weight;
        } else {
            // Partial match: first extracted keyword in a substring
            // relation with the related term, either direction
            for (term, _) in extracted {
                if related.contains(term.as_str()) || term.contains(related.as_str()) {
                    let weight = by_term.get(term.as_str()).copied().unwrap_or(0.3);
                    raw += weights.partial_bonus * weight;
                    break;
                }
            }
        }
    }

    let popularity_factor = f64::from(entry.popularity) / 100.0;

    if raw > 0.0 {
        raw * weights.match_share + popularity_factor * weights.popularity_share
    } else {
        popularity_factor * weights.popularity_discount
    }
}

/// Rank a board's reference entries by relevance to the extracted keywords.
///
/// Returns at most `max_results` entries, unique by keyword, best first.
/// An unrecognized board label degrades to the general list. Empty
/// extraction input degenerates to popularity order (stable on ties).
pub fn rank(
    reference: &ReferenceSet,
    board: &str,
    extracted: &[WeightedKeyword],
    max_results: usize,
    weights: &RelevanceWeights,
) -> Vec<HotKeyword> {
    let entries = reference.for_board(board);

    let mut scored: Vec<ScoredCandidate> = entries
        .iter()
        .map(|entry| ScoredCandidate {
            entry,
            score: score_entry(entry, extracted, weights),
        })
        .collect();

    // Stable sort: ties keep reference list order
    sort_by_score(&mut scored);

    // If too few entries genuinely matched, pad with the most popular
    // not-yet-selected entries at a nominal score, then re-sort
    let matched = scored
        .iter()
        .filter(|c| c.score > weights.backfill_threshold)
        .count();
    if matched < max_results {
        let selected: HashSet<&str> = scored
            .iter()
            .take(max_results)
            .map(|c| c.entry.keyword.as_str())
            .collect();

        let mut additional: Vec<&PopularEntry> = entries
            .iter()
            .filter(|e| !selected.contains(e.keyword.as_str()))
            .collect();
        additional.sort_by(|a, b| b.popularity.cmp(&a.popularity));

        for entry in additional.into_iter().take(max_results - matched) {
            scored.push(ScoredCandidate {
                entry,
                score: weights.pad_score,
            });
        }
        sort_by_score(&mut scored);
    }

    debug!(
        board,
        candidates = scored.len(),
        matched,
        "Ranked reference entries"
    );

    // Trim and deduplicate, keeping the first (best-scored) occurrence
    let mut seen = HashSet::new();
    scored
        .into_iter()
        .take(max_results)
        .filter(|c| seen.insert(c.entry.keyword.clone()))
        .map(|c| HotKeyword {
            keyword: c.entry.keyword.clone(),
            popularity: c.entry.popularity,
            related: c.entry.related.clone(),
        })
        .collect()
}

fn sort_by_score(scored: &mut [ScoredCandidate]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(keyword: &str, popularity: u8, related: &[&str]) -> PopularEntry {
        PopularEntry {
            keyword: keyword.to_string(),
            popularity,
            related: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_direct_match_score() {
        let e = entry("前任", 98, &[]);
        let extracted = vec![("前任".to_string(), 0.8)];
        let score = score_entry(&e, &extracted, &RelevanceWeights::default());
        // 10 * 0.8 = 8.0 raw; 8.0 * 0.7 + 0.98 * 0.3 = 5.894
        assert!((score - 5.894).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_related_verbatim_match_score() {
        let e = entry("前任", 98, &["分手"]);
        let extracted = vec![("分手".to_string(), 1.0)];
        let score = score_entry(&e, &extracted, &RelevanceWeights::default());
        // 5 * 1.0 = 5.0 raw; 5.0 * 0.7 + 0.98 * 0.3 = 3.794
        assert!((score - 3.794).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_partial_match_uses_first_qualifying_keyword() {
        let e = entry("挽回", 79, &["挽回前任"]);
        // Both extracted terms are substrings of the related term —
        // only the first contributes
        let extracted = vec![("挽回".to_string(), 0.9), ("前任".to_string(), 0.8)];
        let score = score_entry(&e, &extracted, &RelevanceWeights::default());
        // Direct: 10 * 0.9 = 9.0; partial: 2 * 0.9 = 1.8 (first only)
        // raw = 10.8; 10.8 * 0.7 + 0.79 * 0.3 = 7.797
        assert!((score - 7.797).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_no_match_falls_back_to_discounted_popularity() {
        let e = entry("美食", 92, &["餐廳", "食物"]);
        let extracted = vec![("分手".to_string(), 1.0)];
        let score = score_entry(&e, &extracted, &RelevanceWeights::default());
        assert!((score - 0.092).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_direct_match_monotonicity() {
        // An exact match must strictly raise the entry's score versus the
        // same input without that match
        let e = entry("分手", 93, &["結束", "放下"]);
        let with_match = vec![("分手".to_string(), 1.0), ("溝通".to_string(), 0.5)];
        let without_match = vec![("溝通".to_string(), 0.5)];
        let weights = RelevanceWeights::default();
        assert!(
            score_entry(&e, &with_match, &weights) > score_entry(&e, &without_match, &weights)
        );
    }

    #[test]
    fn test_rank_unique_and_bounded() {
        let reference = ReferenceSet::embedded().unwrap();
        let extracted = vec![("分手".to_string(), 1.0), ("前任".to_string(), 0.8)];
        let result = rank(
            &reference,
            "relationship",
            &extracted,
            3,
            &RelevanceWeights::default(),
        );
        assert!(result.len() <= 3);
        let mut seen = HashSet::new();
        for hot in &result {
            assert!(seen.insert(hot.keyword.clone()), "Duplicate: {}", hot.keyword);
            assert!(hot.popularity <= 100);
        }
    }

    #[test]
    fn test_rank_direct_matches_lead() {
        let reference = ReferenceSet::embedded().unwrap();
        let extracted = vec![("分手".to_string(), 1.0), ("前任".to_string(), 0.8)];
        let result = rank(
            &reference,
            "relationship",
            &extracted,
            3,
            &RelevanceWeights::default(),
        );
        // Both carry the direct-match bonus and must outrank unmatched entries
        assert!(
            result[0].keyword == "前任" || result[0].keyword == "分手",
            "Expected 前任 or 分手 first, got {}",
            result[0].keyword
        );
    }

    #[test]
    fn test_rank_empty_extraction_is_popularity_order() {
        let reference = ReferenceSet::embedded().unwrap();
        let result = rank(&reference, "mood", &[], 5, &RelevanceWeights::default());
        assert_eq!(result.len(), 5);
        for window in result.windows(2) {
            assert!(
                window[0].popularity >= window[1].popularity,
                "Expected popularity order: {} >= {}",
                window[0].popularity,
                window[1].popularity
            );
        }
    }

    #[test]
    fn test_rank_unknown_board_uses_general_list() {
        let reference = ReferenceSet::embedded().unwrap();
        let result = rank(
            &reference,
            "unknown_category",
            &[],
            10,
            &RelevanceWeights::default(),
        );
        let general: Vec<&str> = reference
            .general()
            .iter()
            .map(|e| e.keyword.as_str())
            .collect();
        for hot in &result {
            assert!(general.contains(&hot.keyword.as_str()));
        }
    }

    #[test]
    fn test_rank_idempotent() {
        let reference = ReferenceSet::embedded().unwrap();
        let extracted = vec![("壓力".to_string(), 0.7), ("焦慮".to_string(), 0.6)];
        let weights = RelevanceWeights::default();
        let first = rank(&reference, "mood", &extracted, 5, &weights);
        let second = rank(&reference, "mood", &extracted, 5, &weights);
        let keywords =
            |r: &[HotKeyword]| r.iter().map(|h| h.keyword.clone()).collect::<Vec<_>>();
        assert_eq!(keywords(&first), keywords(&second));
    }
}
