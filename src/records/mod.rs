//! Session records: one row of an uploaded batch, keyed by column name.

mod csv_input;

pub use csv_input::{read_batch, read_batch_path, RecordBatch};

use std::collections::BTreeMap;
use std::fmt;

/// A single cell of the uploaded table
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `text` is the trimmed cell as uploaded; category labels are built from it
    Number { value: f64, text: String },
    Text(String),
    Missing,
}

impl FieldValue {
    /// Classify a raw cell: empty or NaN → Missing, float-parsable → Number, anything else → Text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_nan() => FieldValue::Missing,
            Ok(value) => FieldValue::Number {
                value,
                text: trimmed.to_string(),
            },
            Err(_) => FieldValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number { text, .. } | FieldValue::Text(text) => f.write_str(text),
            FieldValue::Missing => f.write_str("nan"),
        }
    }
}

/// One uploaded row. `session_id` is kept out of `fields` so it can never reach the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub session_id: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl SessionRecord {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert, mostly for tests and benches
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_number(self, name: impl Into<String>, value: f64) -> Self {
        self.with(
            name,
            FieldValue::Number {
                value,
                text: value.to_string(),
            },
        )
    }

    pub fn with_text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, FieldValue::Text(value.into()))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Numeric value of a field; `None` when absent, empty, or not a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keeps_cell_text() {
        let v = FieldValue::parse(" 1.0 ");
        assert_eq!(v.as_number(), Some(1.0));
        assert_eq!(v.to_string(), "1.0");
        assert_eq!(FieldValue::parse("06").to_string(), "06");
    }

    #[test]
    fn empty_and_nan_cells_are_missing() {
        assert_eq!(FieldValue::parse("  "), FieldValue::Missing);
        assert_eq!(FieldValue::parse("NaN"), FieldValue::Missing);
        assert_eq!(FieldValue::parse("TCP"), FieldValue::Text("TCP".to_string()));
    }
}
