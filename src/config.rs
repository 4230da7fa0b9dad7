//! Application configuration. JSON on disk; every section has defaults.

use crate::alerts::AlertRule;
use crate::error::DetectionError;
use crate::features::VocabularySource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the model artifact manifest (JSON)
    pub model_path: PathBuf,
    /// Batch to process when no path is given on the command line
    pub input_path: Option<PathBuf>,
    /// Column roles and categorical encoding
    pub schema: SchemaConfig,
    /// Alert reason rules
    pub alerts: AlertsConfig,
    /// Report output
    pub display: DisplayConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Identifier column, preserved verbatim and never encoded
    pub id_column: String,
    /// Ground-truth label column, dropped before encoding when present
    pub label_column: String,
    /// Columns expanded into one-hot indicators
    pub categorical_columns: Vec<String>,
    /// Where category vocabularies come from
    pub vocabulary: VocabularySource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Ordered rule table; evaluated top to bottom
    pub rules: Vec<AlertRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of raw rows shown in the upload preview
    pub preview_rows: usize,
    /// Emit the report as a single JSON document instead of text
    pub json: bool,
    /// Also save the result table here; `.json` writes JSON, anything else CSV
    pub results_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            input_path: None,
            schema: SchemaConfig::default(),
            alerts: AlertsConfig::default(),
            display: DisplayConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            id_column: "session_id".to_string(),
            label_column: "attack_detected".to_string(),
            categorical_columns: vec![
                "protocol_type".to_string(),
                "encryption_used".to_string(),
                "browser_type".to_string(),
            ],
            vocabulary: VocabularySource::Batch,
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            rules: AlertRule::defaults(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            json: false,
            results_path: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but cannot be read or parsed also yields the default, together
    /// with the error so the caller can log it once logging is up.
    pub fn load(path: &std::path::Path) -> (Self, Option<DetectionError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| DetectionError::Config(format!("{}: {}", path.display(), e)))
            .and_then(|data| {
                serde_json::from_str::<AppConfig>(&data)
                    .map_err(|e| DetectionError::Config(format!("{}: {}", path.display(), e)))
            });
        match parsed {
            Ok(c) => (c, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
