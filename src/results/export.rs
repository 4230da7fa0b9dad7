//! Serialize a result set for download: CSV table or full JSON.

use super::ResultSet;
use crate::error::{DetectionError, Result};
use std::path::Path;

pub fn to_csv(results: &ResultSet) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["session_id", "attack_detected", "reason"])
        .map_err(output_error)?;
    for row in &results.rows {
        let label = row.attack_detected.to_string();
        wtr.write_record([row.session_id.as_str(), label.as_str(), row.reason.as_str()])
            .map_err(output_error)?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| DetectionError::Output(format!("CSV writer error: {}", e)))?;
    String::from_utf8(data).map_err(|e| DetectionError::Output(format!("UTF-8 conversion error: {}", e)))
}

pub fn to_json(results: &ResultSet) -> Result<String> {
    serde_json::to_string_pretty(results).map_err(output_error)
}

/// Save `results` to `path`, JSON when the extension is `json`, CSV otherwise.
pub fn write_results(results: &ResultSet, path: &Path) -> Result<()> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let body = if is_json { to_json(results)? } else { to_csv(results)? };
    std::fs::write(path, body)
        .map_err(|e| DetectionError::Output(format!("{}: {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), rows = results.len(), "results saved");
    Ok(())
}

fn output_error(e: impl std::fmt::Display) -> DetectionError {
    DetectionError::Output(e.to_string())
}
