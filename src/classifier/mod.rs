// Board classification.
//
// The classifier is an external collaborator as far as the recommendation
// core is concerned: anything that turns text into a category plus
// per-category probabilities can sit behind the Classifier trait.

pub mod linear;
pub mod traits;
