//! Schema encoder: strip id/label, one-hot categoricals, zero-fill and project to the
//! classifier's required columns. All column handling is name-keyed, never positional.

use super::vocabulary::{category_of, indicator_name, CategoryVocabulary, VocabularySource};
use super::FeatureMatrix;
use crate::config::SchemaConfig;
use crate::error::{DetectionError, Result};
use crate::records::{FieldValue, SessionRecord};
use std::collections::{BTreeSet, HashMap};

/// How the batch's emitted columns line up with the required ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnReconciliation {
    /// Required columns, in required order
    pub required: Vec<String>,
    /// Required columns the batch does not produce; encoded as 0.0
    pub zero_filled: Vec<String>,
    /// Produced columns the classifier does not know; dropped
    pub dropped: Vec<String>,
}

impl ColumnReconciliation {
    pub fn compute(emitted: &BTreeSet<String>, required: &[String]) -> Self {
        let required_set: BTreeSet<&String> = required.iter().collect();
        Self {
            required: required.to_vec(),
            zero_filled: required
                .iter()
                .filter(|r| !emitted.contains(*r))
                .cloned()
                .collect(),
            dropped: emitted
                .iter()
                .filter(|e| !required_set.contains(e))
                .cloned()
                .collect(),
        }
    }
}

pub struct SchemaEncoder {
    config: SchemaConfig,
    training_vocabulary: Option<CategoryVocabulary>,
}

impl SchemaEncoder {
    pub fn new(config: SchemaConfig) -> Self {
        Self {
            config,
            training_vocabulary: None,
        }
    }

    /// Attach the vocabulary shipped with the model artifact (used when the
    /// configured source is [`VocabularySource::Training`]).
    pub fn with_training_vocabulary(mut self, vocabulary: Option<CategoryVocabulary>) -> Self {
        self.training_vocabulary = vocabulary;
        self
    }

    fn is_categorical(&self, name: &str) -> bool {
        self.config.categorical_columns.iter().any(|c| c == name)
    }

    /// Columns that feed the numeric part of the encoding (not id, not label, not categorical).
    fn is_numeric_feature(&self, name: &str) -> bool {
        name != self.config.id_column && name != self.config.label_column && !self.is_categorical(name)
    }

    fn vocabulary_for(&self, records: &[SessionRecord]) -> Result<CategoryVocabulary> {
        match (self.config.vocabulary, &self.training_vocabulary) {
            (VocabularySource::Training, Some(vocab)) => {
                for column in &self.config.categorical_columns {
                    if !records.is_empty() && !records.iter().any(|r| r.has(column)) {
                        return Err(DetectionError::schema(
                            column.as_str(),
                            "categorical column missing from input",
                        ));
                    }
                }
                Ok(vocab.clone())
            }
            (VocabularySource::Training, None) => {
                tracing::warn!("model artifact has no category vocabulary; fitting on batch");
                CategoryVocabulary::fit(records, &self.config.categorical_columns)
            }
            (VocabularySource::Batch, _) => {
                CategoryVocabulary::fit(records, &self.config.categorical_columns)
            }
        }
    }

    /// Column names the batch produces before projection.
    fn emitted_columns(&self, records: &[SessionRecord], vocab: &CategoryVocabulary) -> BTreeSet<String> {
        let mut emitted: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.fields.keys())
            .filter(|name| self.is_numeric_feature(name))
            .cloned()
            .collect();
        emitted.extend(vocab.indicator_columns());
        emitted
    }

    /// Encode `records` into a matrix whose columns are exactly `required`, in order.
    /// Returns the session ids alongside, row-aligned with the input.
    pub fn encode(
        &self,
        records: &[SessionRecord],
        required: &[String],
    ) -> Result<(FeatureMatrix, Vec<String>)> {
        let vocab = self.vocabulary_for(records)?;
        let reconciliation = ColumnReconciliation::compute(&self.emitted_columns(records, &vocab), required);
        if !reconciliation.zero_filled.is_empty() {
            tracing::debug!(columns = ?reconciliation.zero_filled, "zero-filling required features");
        }
        if !reconciliation.dropped.is_empty() {
            tracing::debug!(columns = ?reconciliation.dropped, "dropping unknown features");
        }

        let index: HashMap<&str, usize> = required
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut matrix = FeatureMatrix::zeros(records.len(), required.to_vec());
        for (row, record) in records.iter().enumerate() {
            for (name, value) in &record.fields {
                if !self.is_numeric_feature(name) {
                    continue;
                }
                let Some(&col) = index.get(name.as_str()) else {
                    continue;
                };
                matrix.values[[row, col]] = match value {
                    FieldValue::Number { value, .. } => *value as f32,
                    FieldValue::Missing => 0.0,
                    FieldValue::Text(t) => {
                        return Err(DetectionError::schema(
                            name.as_str(),
                            format!("non-numeric value `{}` at row {}", t, row),
                        ));
                    }
                };
            }

            for column in &self.config.categorical_columns {
                let category = category_of(record.get(column));
                if !vocab.contains(column, &category) {
                    continue;
                }
                if let Some(&col) = index.get(indicator_name(column, &category).as_str()) {
                    matrix.values[[row, col]] = 1.0;
                }
            }
        }

        let session_ids = records.iter().map(|r| r.session_id.clone()).collect();
        tracing::debug!(
            rows = matrix.rows(),
            features = required.len(),
            zero_filled = reconciliation.zero_filled.len(),
            "batch encoded"
        );
        Ok((matrix, session_ids))
    }

    /// Reconciliation report for `records` without encoding them.
    pub fn reconcile(&self, records: &[SessionRecord], required: &[String]) -> Result<ColumnReconciliation> {
        let vocab = self.vocabulary_for(records)?;
        Ok(ColumnReconciliation::compute(&self.emitted_columns(records, &vocab), required))
    }
}
