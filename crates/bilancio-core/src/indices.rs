//! Financial indices returned by the backend, keyed by fiscal year.
//!
//! The backend computes the ratios; this module only catalogues their
//! meaning and reshapes them into table rows. A ratio whose denominator was
//! zero arrives as `null` and is kept as `None`.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

use crate::response::Row;

/// Column holding the fiscal year in pivoted index tables.
pub const YEAR_COLUMN: &str = "year";

/// Index values for a single year, keyed by index name in the order the
/// backend computed them.
pub type YearIndices = IndexMap<String, Option<f64>>;

/// Per-year financial indices: `{ "<year>": { "<index>": <number> } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FinancialIndices(pub BTreeMap<String, YearIndices>);

impl FinancialIndices {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fiscal years present, in ascending order.
    #[must_use]
    pub fn years(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn for_year(&self, year: &str) -> Option<&YearIndices> {
        self.0.get(year)
    }

    /// Index names of the first year, which define the table columns.
    #[must_use]
    pub fn index_names(&self) -> Vec<&str> {
        self.0
            .values()
            .next()
            .map(|first| first.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Keep only the given year. Unknown years yield an empty set.
    #[must_use]
    pub fn filter_year(&self, year: &str) -> Self {
        Self(
            self.0
                .get_key_value(year)
                .map(|(k, v)| (k.clone(), v.clone()))
                .into_iter()
                .collect(),
        )
    }

    /// Wide layout: one row per year, `year` first, then that year's
    /// indices in backend order. Columns are fixed by the first year when
    /// the rows are rendered or exported; indices a later year adds or
    /// lacks are reported there.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Row> {
        self.0
            .iter()
            .map(|(year, values)| {
                let mut row = Row::new();
                row.insert(YEAR_COLUMN.to_string(), Value::String(year.clone()));
                for (name, value) in values {
                    row.insert(name.clone(), number_or_null(*value));
                }
                row
            })
            .collect()
    }

    /// Long layout: one row per (year, index) pair with `year`, `index`,
    /// `value` columns.
    #[must_use]
    pub fn to_long_rows(&self) -> Vec<Row> {
        self.0
            .iter()
            .flat_map(|(year, values)| {
                values.iter().map(move |(name, value)| {
                    let mut row = Row::new();
                    row.insert(YEAR_COLUMN.to_string(), Value::String(year.clone()));
                    row.insert("index".to_string(), Value::String(name.clone()));
                    row.insert("value".to_string(), number_or_null(*value));
                    row
                })
            })
            .collect()
    }
}

fn number_or_null(value: Option<f64>) -> Value {
    value
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexUnit {
    Percent,
    Ratio,
}

/// A financial index the backend is known to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexInfo {
    pub name: &'static str,
    pub unit: IndexUnit,
    pub description: &'static str,
}

pub const CATALOGUE: &[IndexInfo] = &[
    IndexInfo {
        name: "ROE",
        unit: IndexUnit::Percent,
        description: "Return on Equity: profitability of shareholders' equity",
    },
    IndexInfo {
        name: "ROI",
        unit: IndexUnit::Percent,
        description: "Return on Investment: profitability of invested capital",
    },
    IndexInfo {
        name: "ROS",
        unit: IndexUnit::Percent,
        description: "Return on Sales: profitability of revenue",
    },
    IndexInfo {
        name: "Indice di Liquidità",
        unit: IndexUnit::Ratio,
        description: "Ability to meet short-term obligations from cash and receivables",
    },
    IndexInfo {
        name: "Indice di Indebitamento",
        unit: IndexUnit::Ratio,
        description: "Third-party capital relative to equity",
    },
    IndexInfo {
        name: "EBITDA Margin",
        unit: IndexUnit::Percent,
        description: "Gross operating profitability as a share of revenue",
    },
    IndexInfo {
        name: "Rotazione Capitale Investito",
        unit: IndexUnit::Ratio,
        description: "Efficiency in the use of invested capital",
    },
    IndexInfo {
        name: "Indice di Copertura delle Immobilizzazioni",
        unit: IndexUnit::Ratio,
        description: "Share of fixed assets financed by equity",
    },
    IndexInfo {
        name: "Indice di Autonomia Finanziaria",
        unit: IndexUnit::Percent,
        description: "Degree of financial independence: equity over total assets",
    },
];

/// Look up a catalogued index by its exact name.
#[must_use]
pub fn describe(name: &str) -> Option<&'static IndexInfo> {
    CATALOGUE.iter().find(|info| info.name == name)
}
