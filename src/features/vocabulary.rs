//! Category vocabularies for one-hot expansion.

use crate::error::{DetectionError, Result};
use crate::records::{FieldValue, SessionRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Where the per-column category lists come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularySource {
    /// Fit on the distinct values of the current batch only
    #[default]
    Batch,
    /// Use the vocabulary stored alongside the model artifact
    Training,
}

/// Indicator column name for one category of one column, e.g. `protocol_type_TCP`.
pub fn indicator_name(column: &str, category: &str) -> String {
    format!("{}_{}", column, category)
}

/// Category label of a cell: the uploaded text, so `1.0` stays `1.0`.
/// Empty cells form their own `nan` category.
pub(crate) fn category_of(value: Option<&FieldValue>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "nan".to_string())
}

/// Ordered category list per categorical column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryVocabulary {
    columns: BTreeMap<String, Vec<String>>,
}

impl CategoryVocabulary {
    pub fn new(columns: BTreeMap<String, Vec<String>>) -> Self {
        Self { columns }
    }

    /// Fit on the distinct values present in `records`. Categories are sorted.
    /// A column that no record carries cannot be fitted and is a schema error.
    pub fn fit(records: &[SessionRecord], categorical: &[String]) -> Result<Self> {
        let mut columns = BTreeMap::new();
        for column in categorical {
            let mut seen = BTreeSet::new();
            let mut present = false;
            for r in records {
                if let Some(v) = r.get(column) {
                    present = true;
                    seen.insert(category_of(Some(v)));
                }
            }
            if !present && !records.is_empty() {
                return Err(DetectionError::schema(
                    column.as_str(),
                    "categorical column missing from input",
                ));
            }
            columns.insert(column.clone(), seen.into_iter().collect());
        }
        Ok(Self { columns })
    }

    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    pub fn contains(&self, column: &str, category: &str) -> bool {
        self.categories(column)
            .is_some_and(|cats| cats.iter().any(|c| c == category))
    }

    /// Every indicator column this vocabulary produces, in column then category order.
    pub fn indicator_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|(col, cats)| cats.iter().map(move |c| indicator_name(col, c)))
            .collect()
    }
}
