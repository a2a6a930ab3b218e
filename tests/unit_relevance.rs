// Unit tests for the keyword relevance engine against the embedded
// reference data.
//
// These pin the engine's observable contract: result bounds, uniqueness,
// popularity ranges, direct-match monotonicity, the pure-popularity
// degenerate path, and the fallback to the general list.

use std::collections::HashSet;

use ember::reference::ReferenceSet;
use ember::scoring::relevance::{rank, score_entry, RelevanceWeights};

fn breakup_keywords() -> Vec<(String, f64)> {
    vec![("分手".to_string(), 1.0), ("前任".to_string(), 0.8)]
}

// ============================================================
// Result bounds and uniqueness
// ============================================================

#[test]
fn rank_never_exceeds_max_results() {
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();
    for max_results in [0, 1, 3, 5, 50] {
        let result = rank(
            &reference,
            "relationship",
            &breakup_keywords(),
            max_results,
            &weights,
        );
        assert!(
            result.len() <= max_results,
            "Got {} results for max {max_results}",
            result.len()
        );
    }
}

#[test]
fn rank_keywords_are_unique() {
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();
    let boards = ["mood", "relationship", "talk", "unknown_category"];
    for board in boards {
        let result = rank(&reference, board, &breakup_keywords(), 10, &weights);
        let mut seen = HashSet::new();
        for hot in &result {
            assert!(
                seen.insert(hot.keyword.clone()),
                "Duplicate keyword '{}' on board '{board}'",
                hot.keyword
            );
        }
    }
}

#[test]
fn rank_popularity_always_in_range() {
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();
    for board in ["mood", "relationship", "talk"] {
        for hot in rank(&reference, board, &breakup_keywords(), 20, &weights) {
            assert!(hot.popularity <= 100);
        }
    }
}

// ============================================================
// Direct-match monotonicity
// ============================================================

#[test]
fn direct_match_strictly_raises_score() {
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();

    for entry in reference.for_board("relationship") {
        let with_match = vec![(entry.keyword.clone(), 0.9)];
        let without_match: Vec<(String, f64)> = Vec::new();
        assert!(
            score_entry(entry, &with_match, &weights)
                > score_entry(entry, &without_match, &weights),
            "Direct match on '{}' must strictly raise its score",
            entry.keyword
        );
    }
}

// ============================================================
// Degenerate paths
// ============================================================

#[test]
fn empty_extraction_yields_popularity_order() {
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();
    let result = rank(&reference, "mood", &[], 8, &weights);

    let mut expected: Vec<(String, u8)> = reference
        .for_board("mood")
        .iter()
        .map(|e| (e.keyword.clone(), e.popularity))
        .collect();
    // Stable sort: original list order breaks popularity ties
    expected.sort_by(|a, b| b.1.cmp(&a.1));

    let got: Vec<String> = result.iter().map(|h| h.keyword.clone()).collect();
    let want: Vec<String> = expected.into_iter().take(8).map(|(k, _)| k).collect();
    assert_eq!(got, want);
}

#[test]
fn unknown_board_uses_general_list_exactly() {
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();
    let general_len = reference.general().len();

    let result = rank(&reference, "unknown_category", &[], general_len, &weights);

    let want: Vec<String> = reference
        .general()
        .iter()
        .map(|e| e.keyword.clone())
        .collect();
    let got: Vec<String> = result.iter().map(|h| h.keyword.clone()).collect();
    assert_eq!(got, want, "General list should be used verbatim");
}

// ============================================================
// The breakup scenario
// ============================================================

#[test]
fn breakup_post_ranks_matched_entries_first() {
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();
    let result = rank(&reference, "relationship", &breakup_keywords(), 3, &weights);

    assert_eq!(result.len(), 3);
    assert!(
        result[0].keyword == "前任" || result[0].keyword == "分手",
        "Expected a direct-match entry first, got '{}'",
        result[0].keyword
    );
}

#[test]
fn breakup_scenario_front_of_list_beats_unmatched() {
    // 前任 carries both a direct match (0.8) and a related match on 分手
    // (1.0); every unmatched entry sits on the discounted popularity floor
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();
    let result = rank(&reference, "relationship", &breakup_keywords(), 5, &weights);

    let front: Vec<&str> = result.iter().take(2).map(|h| h.keyword.as_str()).collect();
    assert!(front.contains(&"前任"));
    assert!(front.contains(&"分手"));
}

// ============================================================
// Idempotence
// ============================================================

#[test]
fn rank_is_idempotent() {
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();
    let extracted = vec![
        ("壓力".to_string(), 0.9),
        ("焦慮".to_string(), 0.7),
        ("放鬆".to_string(), 0.4),
    ];

    let runs: Vec<Vec<String>> = (0..3)
        .map(|_| {
            rank(&reference, "mood", &extracted, 5, &weights)
                .into_iter()
                .map(|h| h.keyword)
                .collect()
        })
        .collect();

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

// ============================================================
// Backfill padding
// ============================================================

#[test]
fn unmatched_input_still_fills_result() {
    // Nothing in the mood list matches these terms — the backfill must
    // still deliver a full, unique result
    let reference = ReferenceSet::embedded().unwrap();
    let weights = RelevanceWeights::default();
    let extracted = vec![("滑板".to_string(), 1.0), ("衝浪".to_string(), 0.9)];
    let result = rank(&reference, "mood", &extracted, 5, &weights);

    assert_eq!(result.len(), 5);
    let unique: HashSet<&str> = result.iter().map(|h| h.keyword.as_str()).collect();
    assert_eq!(unique.len(), 5);
}
