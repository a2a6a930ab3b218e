// Classifier trait — the swap-ready abstraction.
//
// The default implementation is a linear model loaded from a JSON artifact.
// Anything that maps text to a board plus probabilities can replace it.

use anyhow::Result;

use crate::category::Category;

/// The result of classifying a single post.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// The predicted board
    pub category: Category,
    /// Probability per board, in Category::ALL order. Boards the model
    /// doesn't know about get 0.0.
    pub probabilities: Vec<(Category, f64)>,
}

/// Trait for predicting which board a post belongs to.
pub trait Classifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<Prediction>;
}
