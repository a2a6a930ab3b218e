// Relevance scoring for hot keyword recommendation.

pub mod relevance;
