//! CSV ingestion of an uploaded batch: header row required, one `SessionRecord` per data row.

use super::{FieldValue, SessionRecord};
use crate::error::{DetectionError, Result};
use std::io::Read;
use std::path::Path;

/// Parsed upload. `columns` keeps the header order for the preview.
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    pub columns: Vec<String>,
    pub records: Vec<SessionRecord>,
}

impl RecordBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` rows, header order, as display strings
    pub fn preview(&self, n: usize, id_column: &str) -> Vec<Vec<String>> {
        self.records
            .iter()
            .take(n)
            .map(|r| {
                self.columns
                    .iter()
                    .map(|c| {
                        if c == id_column {
                            r.session_id.clone()
                        } else {
                            r.get(c).map(|v| v.to_string()).unwrap_or_default()
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Read a batch from any CSV source. `id_column` must be present in the header.
/// Only headers are trimmed: ids stay verbatim, feature cells are trimmed by `FieldValue::parse`.
pub fn read_batch<R: Read>(source: R, id_column: &str) -> Result<RecordBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let id_idx = columns
        .iter()
        .position(|c| c == id_column)
        .ok_or_else(|| DetectionError::Input(format!("missing identifier column `{}`", id_column)))?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut record = SessionRecord::new(row.get(id_idx).unwrap_or_default());
        for (i, (name, cell)) in columns.iter().zip(row.iter()).enumerate() {
            if i == id_idx {
                continue;
            }
            record.fields.insert(name.clone(), FieldValue::parse(cell));
        }
        records.push(record);
    }

    tracing::debug!(rows = records.len(), columns = columns.len(), "batch parsed");
    Ok(RecordBatch { columns, records })
}

pub fn read_batch_path(path: &Path, id_column: &str) -> Result<RecordBatch> {
    let file = std::fs::File::open(path)
        .map_err(|e| DetectionError::Input(format!("{}: {}", path.display(), e)))?;
    read_batch(file, id_column)
}
