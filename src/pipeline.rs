//! Batch pipeline: records → encoder → classifier → reasoner → aggregator.
//! Each upload yields one `BatchContext`; nothing carries over between batches.

use crate::alerts::AlertReasoner;
use crate::config::AppConfig;
use crate::error::Result;
use crate::features::{FeatureMatrix, SchemaEncoder};
use crate::model::{self, Classifier, Label};
use crate::records::RecordBatch;
use crate::results::{self, ResultSet, SummaryStatistics};
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

/// Everything one batch produced, handed explicitly to every consumer.
#[derive(Debug, Clone)]
pub struct BatchContext {
    pub batch_id: Uuid,
    pub processed_at: DateTime<Utc>,
    pub raw: RecordBatch,
    pub session_ids: Vec<String>,
    pub encoded: FeatureMatrix,
    pub predictions: Vec<Label>,
    pub reasons: Vec<String>,
    pub results: ResultSet,
}

impl BatchContext {
    pub fn summary(&self) -> SummaryStatistics {
        self.results.summary
    }
}

pub struct DetectionPipeline {
    classifier: Box<dyn Classifier>,
    encoder: SchemaEncoder,
    reasoner: AlertReasoner,
}

impl DetectionPipeline {
    pub fn new(classifier: Box<dyn Classifier>, encoder: SchemaEncoder, reasoner: AlertReasoner) -> Self {
        Self {
            classifier,
            encoder,
            reasoner,
        }
    }

    /// Load the model named in `config` and wire the stages from config sections.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let classifier = model::load_classifier(&config.model_path)?;
        let encoder = SchemaEncoder::new(config.schema.clone())
            .with_training_vocabulary(classifier.training_vocabulary().cloned());
        let reasoner = AlertReasoner::new(config.alerts.rules.clone());
        Ok(Self::new(classifier, encoder, reasoner))
    }

    /// Run one batch end to end. Any stage error aborts the batch.
    pub fn process(&self, batch: RecordBatch) -> Result<BatchContext> {
        let batch_id = Uuid::new_v4();
        let required = self.classifier.required_feature_names();

        let (encoded, session_ids) = self.encoder.encode(&batch.records, required)?;
        let predictions = self.classifier.predict(&encoded)?;
        let reasons = self.reasoner.reasons(&batch.records);
        let results = results::aggregate(&session_ids, &predictions, &reasons)?;

        info!(
            %batch_id,
            rows = results.len(),
            detected = results.summary.detected_count,
            safe = results.summary.safe_count,
            "batch processed"
        );

        Ok(BatchContext {
            batch_id,
            processed_at: Utc::now(),
            raw: batch,
            session_ids,
            encoded,
            predictions,
            reasons,
            results,
        })
    }
}
