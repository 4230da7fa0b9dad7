//! Error taxonomy for one detection batch. Every variant aborts the batch; no partial results.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DetectionError>;

#[derive(Error, Debug)]
pub enum DetectionError {
    /// Input cannot be reconciled with the feature schema (e.g. a categorical column is missing).
    #[error("schema error in column `{column}`: {reason}")]
    Schema { column: String, reason: String },

    /// Model artifact missing, unreadable, or inconsistent.
    #[error("model load error ({path}): {reason}")]
    ModelLoad { path: String, reason: String },

    /// Feature matrix does not match what the classifier expects.
    #[error("prediction error: {0}")]
    Prediction(String),

    /// Identifier, prediction and reason sequences are not index-aligned.
    #[error("aggregation error: {0}")]
    Aggregation(String),

    /// Uploaded file could not be parsed.
    #[error("input error: {0}")]
    Input(String),

    /// Results could not be serialized.
    #[error("output error: {0}")]
    Output(String),

    #[error("config error: {0}")]
    Config(String),
}

impl DetectionError {
    pub fn schema(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
            reason: reason.into(),
        }
    }

    pub fn model_load(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::ModelLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<csv::Error> for DetectionError {
    fn from(e: csv::Error) -> Self {
        match e.position() {
            Some(pos) => Self::Input(format!("line {}: {}", pos.line(), e)),
            None => Self::Input(e.to_string()),
        }
    }
}
