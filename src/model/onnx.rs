//! ONNX Runtime backend. Input: [rows, features] f32. Output: label per row, either an
//! integer class tensor (used as-is) or a float score tensor (thresholded at 0.5).

use super::{check_columns, Classifier, Label};
use crate::error::{DetectionError, Result};
use crate::features::{CategoryVocabulary, FeatureMatrix};
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;

pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_name: String,
    feature_names: Vec<String>,
    vocabulary: Option<CategoryVocabulary>,
}

impl OnnxClassifier {
    pub fn load(path: &Path, feature_names: Vec<String>) -> Result<Self> {
        if !path.exists() {
            return Err(DetectionError::model_load(path, "ONNX model not found"));
        }

        let session = Session::builder()
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| DetectionError::model_load(path, e))?;

        // skl2onnx classifiers emit `label` first, then probabilities
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| DetectionError::model_load(path, "model defines no outputs"))?;

        tracing::debug!(path = %path.display(), output = %output_name, "ONNX session ready");
        Ok(Self {
            session: Mutex::new(session),
            output_name,
            feature_names,
            vocabulary: None,
        })
    }

    pub fn with_vocabulary(mut self, vocabulary: Option<CategoryVocabulary>) -> Self {
        self.vocabulary = vocabulary;
        self
    }
}

impl Classifier for OnnxClassifier {
    fn required_feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        check_columns(features, &self.feature_names)?;
        let rows = features.rows();
        if rows == 0 {
            return Ok(Vec::new());
        }

        let input = Tensor::from_array(features.values.clone())
            .map_err(|e| DetectionError::Prediction(format!("tensor error: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| DetectionError::Prediction("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| DetectionError::Prediction(format!("inference failed: {}", e)))?;
        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| DetectionError::Prediction("model produced no output".to_string()))?;

        let labels: Vec<Label> = if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
            data.iter().map(|&v| Label::from(v != 0)).collect()
        } else {
            let (_, data) = output
                .try_extract_tensor::<f32>()
                .map_err(|e| DetectionError::Prediction(format!("extract error: {}", e)))?;
            data.iter().map(|&v| Label::from(v >= 0.5)).collect()
        };

        if labels.len() != rows {
            return Err(DetectionError::Prediction(format!(
                "model returned {} labels for {} rows",
                labels.len(),
                rows
            )));
        }
        Ok(labels)
    }

    fn training_vocabulary(&self) -> Option<&CategoryVocabulary> {
        self.vocabulary.as_ref()
    }
}
