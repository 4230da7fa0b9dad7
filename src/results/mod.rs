//! Result aggregation: join ids, labels and reasons row by row, then count.

mod export;

pub use export::{to_csv, to_json, write_results};

use crate::error::{DetectionError, Result};
use crate::model::Label;
use serde::{Deserialize, Serialize};

/// Final per-session record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub session_id: String,
    pub attack_detected: Label,
    pub reason: String,
}

impl SessionResult {
    pub fn is_attack(&self) -> bool {
        self.attack_detected == 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub detected_count: usize,
    pub safe_count: usize,
}

impl SummaryStatistics {
    pub fn from_labels(labels: &[Label]) -> Self {
        let detected_count = labels.iter().filter(|&&l| l == 1).count();
        Self {
            detected_count,
            safe_count: labels.len() - detected_count,
        }
    }

    pub fn total(&self) -> usize {
        self.detected_count + self.safe_count
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub rows: Vec<SessionResult>,
    pub summary: SummaryStatistics,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn detected(&self) -> impl Iterator<Item = &SessionResult> {
        self.rows.iter().filter(|r| r.is_attack())
    }
}

/// Zip the three row-aligned sequences. Unequal lengths or a label outside {0, 1}
/// mean an upstream stage broke its contract.
pub fn aggregate(session_ids: &[String], predictions: &[Label], reasons: &[String]) -> Result<ResultSet> {
    if session_ids.len() != predictions.len() || predictions.len() != reasons.len() {
        return Err(DetectionError::Aggregation(format!(
            "length mismatch: {} ids, {} predictions, {} reasons",
            session_ids.len(),
            predictions.len(),
            reasons.len()
        )));
    }
    if let Some(i) = predictions.iter().position(|&l| l > 1) {
        return Err(DetectionError::Aggregation(format!(
            "row {} has non-binary label {}",
            i, predictions[i]
        )));
    }

    let rows = session_ids
        .iter()
        .zip(predictions)
        .zip(reasons)
        .map(|((id, &label), reason)| SessionResult {
            session_id: id.clone(),
            attack_detected: label,
            reason: reason.clone(),
        })
        .collect();

    Ok(ResultSet {
        rows,
        summary: SummaryStatistics::from_labels(predictions),
    })
}
