// Linear board classifier loaded from a JSON artifact.
//
// The artifact is an export of the trained scikit-learn pipeline: the
// TF-IDF vocabulary with IDF weights plus one row of linear coefficients
// and an intercept per class. Inference reproduces the pipeline: term
// counts over the vocabulary, IDF weighting, L2 normalization, linear
// scores, softmax. Loaded once at startup and read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use super::traits::{Classifier, Prediction};
use crate::category::Category;
use crate::keywords::clean::TextCleaner;

/// On-disk artifact shape.
#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    /// Class labels in coefficient-row order
    pub classes: Vec<String>,
    /// Term -> feature index
    pub vocabulary: HashMap<String, usize>,
    /// IDF weight per feature index
    pub idf: Vec<f64>,
    /// One coefficient row per class
    pub coefficients: Vec<Vec<f64>>,
    /// One intercept per class
    pub intercepts: Vec<f64>,
}

pub struct LinearClassifier {
    artifact: ModelArtifact,
    cleaner: TextCleaner,
}

impl LinearClassifier {
    /// Load the classifier artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read classifier artifact {}", path.display()))?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("Classifier artifact {} is invalid", path.display()))?;

        let classifier = Self::from_artifact(artifact)?;
        info!(
            classes = classifier.artifact.classes.len(),
            vocabulary = classifier.artifact.vocabulary.len(),
            "Loaded classifier artifact"
        );
        Ok(classifier)
    }

    /// Build a classifier from an already-parsed artifact. Validates that
    /// the dimensions are consistent before accepting it.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let features = artifact.vocabulary.len();
        if artifact.classes.is_empty() {
            anyhow::bail!("Classifier artifact has no classes");
        }
        if artifact.idf.len() != features {
            anyhow::bail!(
                "Artifact IDF vector has {} entries for {} vocabulary terms",
                artifact.idf.len(),
                features
            );
        }
        if artifact.coefficients.len() != artifact.classes.len()
            || artifact.intercepts.len() != artifact.classes.len()
        {
            anyhow::bail!(
                "Artifact has {} classes but {} coefficient rows and {} intercepts",
                artifact.classes.len(),
                artifact.coefficients.len(),
                artifact.intercepts.len()
            );
        }
        for (i, row) in artifact.coefficients.iter().enumerate() {
            if row.len() != features {
                anyhow::bail!(
                    "Coefficient row {} has {} entries for {} vocabulary terms",
                    i,
                    row.len(),
                    features
                );
            }
        }

        Ok(Self {
            artifact,
            cleaner: TextCleaner::new(),
        })
    }

    /// TF-IDF feature vector as sparse (index, value) pairs, L2-normalized.
    fn features(&self, text: &str) -> Vec<(usize, f64)> {
        let cleaned = self.cleaner.clean(text);

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in cleaned.split_whitespace() {
            if let Some(&index) = self.artifact.vocabulary.get(token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.artifact.idf[index]))
            .collect();

        let norm: f64 = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut features {
                *v /= norm;
            }
        }

        features
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let features = self.features(text);

        let scores: Vec<f64> = self
            .artifact
            .coefficients
            .iter()
            .zip(&self.artifact.intercepts)
            .map(|(row, intercept)| {
                intercept
                    + features
                        .iter()
                        .map(|&(index, value)| row[index] * value)
                        .sum::<f64>()
            })
            .collect();

        let probabilities_by_class = softmax(&scores);

        // Argmax over class scores picks the predicted label
        let best = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);

        let label = &self.artifact.classes[best];
        let category = match Category::from_label(label) {
            Some(category) => category,
            None => {
                // A label outside the valid set degrades to the default
                // board rather than failing the request
                warn!(label, "Predicted label is not a valid board, using default");
                Category::ALL[0]
            }
        };

        // Every board gets a probability; boards missing from the model's
        // class list are reported as 0.0
        let probabilities = Category::ALL
            .iter()
            .map(|&c| {
                let p = self
                    .artifact
                    .classes
                    .iter()
                    .position(|label| label == c.label())
                    .map(|i| probabilities_by_class[i])
                    .unwrap_or(0.0);
                (c, p)
            })
            .collect();

        Ok(Prediction {
            category,
            probabilities,
        })
    }
}

/// Numerically stable softmax.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
