//! Intrusion Sentinel — batch intrusion detection over network session records.
//!
//! Modular structure:
//! - [`records`] — Uploaded session rows and CSV ingestion
//! - [`features`] — Schema encoder aligning rows to the model's feature set
//! - [`model`] — Classifier adapter (linear and ONNX backends)
//! - [`alerts`] — Rule-based alert reasons
//! - [`results`] — Result aggregation, summary counts, export
//! - [`pipeline`] — One batch end to end, as an explicit `BatchContext`
//! - [`report`] — Display values (preview, alert lines, chart counts)
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod records;
pub mod features;
pub mod model;
pub mod alerts;
pub mod results;
pub mod pipeline;
pub mod report;
pub mod logging;

pub use config::AppConfig;
pub use error::{DetectionError, Result};
pub use records::{FieldValue, RecordBatch, SessionRecord};
pub use features::{FeatureMatrix, SchemaEncoder};
pub use model::{Classifier, LinearClassifier, OnnxClassifier};
pub use alerts::AlertReasoner;
pub use results::{ResultSet, SessionResult, SummaryStatistics};
pub use pipeline::{BatchContext, DetectionPipeline};
pub use report::BatchReport;
pub use logging::StructuredLogger;
