//! The analysis response returned by `POST /api/v1/analyze`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Dataset;
use crate::indices::FinancialIndices;

/// A dynamically keyed table row. Key order is preserved as received.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Body of a successful analysis call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResponse {
    pub raw_data: Vec<Row>,
    pub standardized_data: Vec<Row>,
    pub financial_indices: FinancialIndices,
}

impl AnalysisResponse {
    /// Rows of the selected dataset. Indices are pivoted to one row per year.
    #[must_use]
    pub fn rows(&self, dataset: Dataset) -> Vec<Row> {
        match dataset {
            Dataset::Raw => self.raw_data.clone(),
            Dataset::Standardized => self.standardized_data.clone(),
            Dataset::Indices => self.financial_indices.to_rows(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            raw_rows: self.raw_data.len(),
            raw_columns: owned(columns(&self.raw_data)),
            standardized_rows: self.standardized_data.len(),
            standardized_columns: owned(columns(&self.standardized_data)),
            years: owned(self.financial_indices.years()),
            indices: owned(self.financial_indices.index_names()),
        }
    }
}

/// Compact overview of a response, used for CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisSummary {
    pub raw_rows: usize,
    pub raw_columns: Vec<String>,
    pub standardized_rows: usize,
    pub standardized_columns: Vec<String>,
    pub years: Vec<String>,
    pub indices: Vec<String>,
}

/// Table columns, taken from the keys of the first row only.
///
/// Later rows are not consulted: keys they add are not columns, keys they
/// lack render as empty cells.
#[must_use]
pub fn columns(rows: &[Row]) -> Vec<&str> {
    rows.first()
        .map(|first| first.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Shape mismatch of a row against the first row's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDivergence {
    pub row: usize,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

/// Report every row whose key set differs from the first row's.
#[must_use]
pub fn divergent_rows(rows: &[Row]) -> Vec<RowDivergence> {
    let header = columns(rows);
    rows.iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, row)| {
            let missing: Vec<String> = header
                .iter()
                .filter(|column| !row.contains_key(**column))
                .map(|column| (*column).to_string())
                .collect();
            let extra: Vec<String> = row
                .keys()
                .filter(|key| !header.contains(&key.as_str()))
                .cloned()
                .collect();
            if missing.is_empty() && extra.is_empty() {
                None
            } else {
                Some(RowDivergence {
                    row: index,
                    missing,
                    extra,
                })
            }
        })
        .collect()
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}
