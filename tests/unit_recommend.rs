// Integration tests for the recommendation pipeline — real extractor,
// embedded reference data, both the full and the degraded path.

use anyhow::Result;
use ember::keywords::blend::BlendedExtractor;
use ember::keywords::traits::{KeywordExtractor, WeightedKeyword};
use ember::recommend::{generate_recommendations, Outcome};
use ember::reference::ReferenceSet;

const BREAKUP_POST: &str = "上個月和交往三年的男友分手了，到現在還是會想起前任的好。\
    朋友都叫我放下，但每次看到合照還是很難過。想問大家都是怎麼走出分手的？";

struct BrokenExtractor;

impl KeywordExtractor for BrokenExtractor {
    fn extract(&self, _text: &str, _max_count: usize) -> Result<Vec<WeightedKeyword>> {
        anyhow::bail!("segmentation backend unavailable")
    }
}

// ============================================================
// Full pipeline
// ============================================================

#[test]
fn pipeline_produces_full_outcome_for_real_post() {
    let reference = ReferenceSet::embedded().unwrap();
    let extractor = BlendedExtractor::new();

    let outcome =
        generate_recommendations(&extractor, &reference, BREAKUP_POST, "relationship", 15, 5);
    let (recommendations, reason) = outcome.into_parts();

    assert!(reason.is_none(), "Unexpected degradation: {reason:?}");
    assert!(!recommendations.extracted_keywords.is_empty());
    assert!(recommendations.extracted_keywords.len() <= 10);
    assert_eq!(recommendations.recommended_keywords.len(), 5);
    for hot in &recommendations.recommended_keywords {
        assert!(hot.popularity <= 100);
    }
}

#[test]
fn pipeline_recommends_relationship_entries_for_breakup_post() {
    let reference = ReferenceSet::embedded().unwrap();
    let extractor = BlendedExtractor::new();

    let outcome =
        generate_recommendations(&extractor, &reference, BREAKUP_POST, "relationship", 15, 5);
    let (recommendations, _) = outcome.into_parts();

    // Every recommendation must come from the relationship reference list
    let relationship: Vec<&str> = reference
        .for_board("relationship")
        .iter()
        .map(|e| e.keyword.as_str())
        .collect();
    for hot in &recommendations.recommended_keywords {
        assert!(
            relationship.contains(&hot.keyword.as_str()),
            "'{}' is not a relationship entry",
            hot.keyword
        );
    }
}

#[test]
fn pipeline_unknown_board_still_recommends() {
    let reference = ReferenceSet::embedded().unwrap();
    let extractor = BlendedExtractor::new();

    let outcome =
        generate_recommendations(&extractor, &reference, BREAKUP_POST, "not_a_board", 15, 5);
    let (recommendations, reason) = outcome.into_parts();

    assert!(reason.is_none());
    assert_eq!(recommendations.recommended_keywords.len(), 5);
}

#[test]
fn pipeline_short_post_fills_from_popularity() {
    // Too little text for the extractor to work with — ranking degenerates
    // to popularity order, which is still a Full outcome
    let reference = ReferenceSet::embedded().unwrap();
    let extractor = BlendedExtractor::new();

    let outcome = generate_recommendations(&extractor, &reference, "嗨", "mood", 15, 5);
    let (recommendations, reason) = outcome.into_parts();

    assert!(reason.is_none());
    assert_eq!(recommendations.recommended_keywords.len(), 5);
}

// ============================================================
// Degraded path
// ============================================================

#[test]
fn broken_extractor_degrades_with_reason() {
    let reference = ReferenceSet::embedded().unwrap();

    let outcome =
        generate_recommendations(&BrokenExtractor, &reference, BREAKUP_POST, "mood", 15, 5);
    match outcome {
        Outcome::Degraded {
            recommendations,
            reason,
        } => {
            assert!(reason.contains("unavailable"));
            assert!(recommendations.extracted_keywords.is_empty());
            assert_eq!(recommendations.recommended_keywords.len(), 5);
        }
        Outcome::Full(_) => panic!("Expected a degraded outcome"),
    }
}

#[test]
fn degraded_jitter_stays_in_range() {
    // The fallback popularity jitter is bounded; run it enough times to
    // catch an off-by-one on either end
    let reference = ReferenceSet::embedded().unwrap();

    for _ in 0..50 {
        let outcome =
            generate_recommendations(&BrokenExtractor, &reference, "text", "talk", 15, 5);
        let (recommendations, _) = outcome.into_parts();
        for hot in &recommendations.recommended_keywords {
            assert!(
                (80..=95).contains(&hot.popularity),
                "Fallback popularity {} out of range",
                hot.popularity
            );
            assert!(hot.related.is_empty());
        }
    }
}

#[test]
fn degraded_keywords_come_from_general_list_in_order() {
    let reference = ReferenceSet::embedded().unwrap();

    let outcome = generate_recommendations(&BrokenExtractor, &reference, "text", "mood", 15, 5);
    let (recommendations, _) = outcome.into_parts();

    let want: Vec<String> = reference
        .general()
        .iter()
        .take(5)
        .map(|e| e.keyword.clone())
        .collect();
    let got: Vec<String> = recommendations
        .recommended_keywords
        .iter()
        .map(|h| h.keyword.clone())
        .collect();
    assert_eq!(got, want);
}
