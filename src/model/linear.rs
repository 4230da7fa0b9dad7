//! Logistic-regression backend. Weights are stored in the manifest, one per feature.

use super::{check_columns, Classifier, Label};
use crate::error::Result;
use crate::features::{CategoryVocabulary, FeatureMatrix};
use ndarray::Array1;

pub struct LinearClassifier {
    feature_names: Vec<String>,
    weights: Array1<f32>,
    bias: f32,
    threshold: f32,
    vocabulary: Option<CategoryVocabulary>,
}

impl LinearClassifier {
    pub fn new(
        feature_names: Vec<String>,
        weights: Vec<f32>,
        bias: f32,
        threshold: f32,
    ) -> std::result::Result<Self, String> {
        if weights.len() != feature_names.len() {
            return Err(format!(
                "{} weights for {} features",
                weights.len(),
                feature_names.len()
            ));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(format!("threshold {} outside [0, 1]", threshold));
        }
        Ok(Self {
            feature_names,
            weights: Array1::from(weights),
            bias,
            threshold,
            vocabulary: None,
        })
    }

    pub fn with_vocabulary(mut self, vocabulary: Option<CategoryVocabulary>) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Attack probability per row
    pub fn scores(&self, features: &FeatureMatrix) -> Result<Vec<f32>> {
        check_columns(features, &self.feature_names)?;
        let logits = features.values.dot(&self.weights);
        Ok(logits.iter().map(|z| sigmoid(z + self.bias)).collect())
    }
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LinearClassifier {
    fn required_feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        Ok(self
            .scores(features)?
            .into_iter()
            .map(|p| Label::from(p >= self.threshold))
            .collect())
    }

    fn training_vocabulary(&self) -> Option<&CategoryVocabulary> {
        self.vocabulary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_weight_count_mismatch() {
        assert!(LinearClassifier::new(names(&["a", "b"]), vec![1.0], 0.0, 0.5).is_err());
    }

    #[test]
    fn thresholds_probability() {
        let clf = LinearClassifier::new(names(&["a"]), vec![1.0], 0.0, 0.5).unwrap();
        let mut m = FeatureMatrix::zeros(3, names(&["a"]));
        m.values[[0, 0]] = 4.0;
        m.values[[1, 0]] = -4.0;
        assert_eq!(clf.predict(&m).unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn rejects_reordered_columns() {
        let clf = LinearClassifier::new(names(&["a", "b"]), vec![1.0, 1.0], 0.0, 0.5).unwrap();
        let m = FeatureMatrix::zeros(1, names(&["b", "a"]));
        assert!(clf.predict(&m).is_err());
    }
}
