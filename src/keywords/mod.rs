// Keyword extraction pipeline.
//
// Raw post text is cleaned and segmented once, then two statistical
// strategies (TF-IDF and TextRank) run independently and their scores are
// blended with fixed weights. Either strategy can be swapped out behind the
// KeywordExtractor trait without touching the blend or ranking logic.

pub mod blend;
pub mod clean;
pub mod textrank;
pub mod tfidf;
pub mod traits;
