//! Classifier adapter: an opaque pre-trained model behind a fixed interface.
//!
//! The artifact on disk is a JSON manifest naming the ordered feature set the model was
//! trained on, an optional category vocabulary, and the backend that does the scoring.

mod linear;
mod onnx;

pub use linear::LinearClassifier;
pub use onnx::OnnxClassifier;

use crate::error::{DetectionError, Result};
use crate::features::{CategoryVocabulary, FeatureMatrix};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Binary decision per row: 1 = attack detected, 0 = safe.
pub type Label = u8;

pub trait Classifier: Send + Sync {
    /// Feature columns the model was trained on, in training order.
    fn required_feature_names(&self) -> &[String];

    /// One label per matrix row, same order. Implementations call [`check_columns`] first.
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>>;

    /// Vocabulary persisted with the model, when the artifact has one.
    fn training_vocabulary(&self) -> Option<&CategoryVocabulary> {
        None
    }
}

/// The column set and order must match the model exactly.
pub fn check_columns(features: &FeatureMatrix, required: &[String]) -> Result<()> {
    if features.columns.as_slice() != required {
        return Err(DetectionError::Prediction(format!(
            "feature columns do not match model: got {} columns, expected {}",
            features.columns.len(),
            required.len()
        )));
    }
    if features.values.ncols() != required.len() {
        return Err(DetectionError::Prediction(format!(
            "matrix has {} value columns for {} names",
            features.values.ncols(),
            required.len()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum ModelBackend {
    /// Logistic model: label = sigmoid(w·x + b) >= threshold
    Linear {
        weights: Vec<f32>,
        bias: f32,
        #[serde(default = "default_threshold")]
        threshold: f32,
    },
    /// ONNX graph; relative paths resolve against the manifest directory
    Onnx { file: PathBuf },
}

fn default_threshold() -> f32 {
    0.5
}

/// On-disk model manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorical_vocabulary: Option<CategoryVocabulary>,
    #[serde(flatten)]
    pub backend: ModelBackend,
}

impl ModelArtifact {
    pub fn read(path: &Path) -> Result<(Self, String)> {
        let bytes = std::fs::read(path).map_err(|e| DetectionError::model_load(path, e))?;
        let fingerprint = format!("{:x}", Sha256::digest(&bytes));
        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|e| DetectionError::model_load(path, e))?;
        if artifact.feature_names.is_empty() {
            return Err(DetectionError::model_load(path, "artifact lists no features"));
        }
        Ok((artifact, fingerprint))
    }
}

/// Load the classifier described by the manifest at `path`.
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>> {
    let (artifact, fingerprint) = ModelArtifact::read(path)?;
    let features = artifact.feature_names.len();
    let classifier: Box<dyn Classifier> = match artifact.backend {
        ModelBackend::Linear {
            weights,
            bias,
            threshold,
        } => Box::new(
            LinearClassifier::new(artifact.feature_names, weights, bias, threshold)
                .map_err(|reason| DetectionError::model_load(path, reason))?
                .with_vocabulary(artifact.categorical_vocabulary),
        ),
        ModelBackend::Onnx { file } => {
            let file = if file.is_relative() {
                path.parent().unwrap_or_else(|| Path::new(".")).join(file)
            } else {
                file
            };
            Box::new(
                OnnxClassifier::load(&file, artifact.feature_names)?
                    .with_vocabulary(artifact.categorical_vocabulary),
            )
        }
    };
    tracing::info!(path = %path.display(), sha256 = %fingerprint, features, "model loaded");
    Ok(classifier)
}
