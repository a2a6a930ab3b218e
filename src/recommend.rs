// Recommendation orchestration — extraction chained into relevance ranking.
//
// This layer owns the fail-soft contract: whatever goes wrong inside
// extraction or ranking, the caller always receives a non-empty, well-formed
// result. Failures are surfaced as a Degraded outcome instead of being
// silently swallowed, so the web layer and logs can still see them.

use anyhow::Result;
use rand::Rng;
use tracing::warn;

use crate::keywords::traits::KeywordExtractor;
use crate::reference::ReferenceSet;
use crate::scoring::relevance::{self, HotKeyword, RelevanceWeights};

/// How many extracted keywords are echoed back to the caller, regardless of
/// how many were requested from the extractor.
const ECHOED_KEYWORDS: usize = 10;

/// Base popularity for synthesized fallback entries; a 0-15 jitter is added
/// so repeated fallbacks don't look like a frozen list.
const FALLBACK_BASE_POPULARITY: u8 = 80;
const FALLBACK_JITTER_MAX: u8 = 15;

/// The combined recommendation payload.
#[derive(Debug, Clone)]
pub struct Recommendations {
    /// Top extracted keywords, weights dropped
    pub extracted_keywords: Vec<String>,
    /// Recommended hot keywords for the board
    pub recommended_keywords: Vec<HotKeyword>,
}

/// Result of the recommendation pipeline.
///
/// Degraded still carries a usable payload — the distinction exists purely
/// for observability. Callers that don't care can use `into_parts`.
#[derive(Debug)]
pub enum Outcome {
    Full(Recommendations),
    Degraded {
        recommendations: Recommendations,
        reason: String,
    },
}

impl Outcome {
    pub fn into_parts(self) -> (Recommendations, Option<String>) {
        match self {
            Outcome::Full(recommendations) => (recommendations, None),
            Outcome::Degraded {
                recommendations,
                reason,
            } => (recommendations, Some(reason)),
        }
    }
}

/// Extract keywords from a post and rank the board's hot keywords by
/// relevance. Never fails: internal errors degrade to a synthesized
/// fallback drawn from the general list.
pub fn generate_recommendations(
    extractor: &dyn KeywordExtractor,
    reference: &ReferenceSet,
    text: &str,
    board: &str,
    max_extracted: usize,
    max_recommended: usize,
) -> Outcome {
    match try_generate(extractor, reference, text, board, max_extracted, max_recommended) {
        Ok(recommendations) => Outcome::Full(recommendations),
        Err(e) => {
            warn!(error = %e, board, "Recommendation pipeline failed, serving fallback");
            Outcome::Degraded {
                recommendations: fallback_recommendations(reference, max_recommended),
                reason: e.to_string(),
            }
        }
    }
}

fn try_generate(
    extractor: &dyn KeywordExtractor,
    reference: &ReferenceSet,
    text: &str,
    board: &str,
    max_extracted: usize,
    max_recommended: usize,
) -> Result<Recommendations> {
    let extracted = extractor.extract(text, max_extracted)?;

    let recommended = relevance::rank(
        reference,
        board,
        &extracted,
        max_recommended,
        &RelevanceWeights::default(),
    );

    let extracted_keywords = extracted
        .into_iter()
        .take(ECHOED_KEYWORDS)
        .map(|(term, _)| term)
        .collect();

    Ok(Recommendations {
        extracted_keywords,
        recommended_keywords: recommended,
    })
}

/// Synthesize a fallback list from the general reference entries.
///
/// The candidate keywords are deterministic (the top general entries in list
/// order); only the popularity jitter varies. This is the one place in the
/// pipeline allowed to use randomness.
fn fallback_recommendations(reference: &ReferenceSet, max_recommended: usize) -> Recommendations {
    let mut rng = rand::rng();
    let recommended = reference
        .general()
        .iter()
        .take(max_recommended)
        .map(|entry| HotKeyword {
            keyword: entry.keyword.clone(),
            popularity: FALLBACK_BASE_POPULARITY + rng.random_range(0..=FALLBACK_JITTER_MAX),
            related: Vec::new(),
        })
        .collect();

    Recommendations {
        extracted_keywords: Vec::new(),
        recommended_keywords: recommended,
    }
}
