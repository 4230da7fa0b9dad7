//! Feature alignment: raw session records → the exact column set a classifier was trained on.

mod encoder;
mod vocabulary;

pub use encoder::{ColumnReconciliation, SchemaEncoder};
pub use vocabulary::{indicator_name, CategoryVocabulary, VocabularySource};

use ndarray::{Array2, ArrayView1};

/// Encoded batch: one row per input record (same order), one column per required feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub columns: Vec<String>,
    pub values: Array2<f32>,
}

impl FeatureMatrix {
    pub fn zeros(rows: usize, columns: Vec<String>) -> Self {
        let values = Array2::zeros((rows, columns.len()));
        Self { columns, values }
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f32> {
        self.values.row(i)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at (row, column name); `None` when the column is not part of the matrix.
    pub fn get(&self, row: usize, name: &str) -> Option<f32> {
        let col = self.column_index(name)?;
        self.values.get((row, col)).copied()
    }
}
