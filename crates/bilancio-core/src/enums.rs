//! Matching strategies, export formats, and dataset selectors.
//!
//! All enums use lowercase serialization and round-trip through
//! `as_str()` / `FromStr` so the wire value, the config value and the CLI
//! value are the same literal.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// MatchingType
// ---------------------------------------------------------------------------

/// Strategy the backend uses to map raw statement line items onto the
/// standard taxonomy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchingType {
    #[default]
    Fuzzy,
    Embedding,
    Gpt,
}

impl MatchingType {
    pub const ALL: [Self; 3] = [Self::Fuzzy, Self::Embedding, Self::Gpt];

    /// Literal sent in the `matching_type` form field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fuzzy => "fuzzy",
            Self::Embedding => "embedding",
            Self::Gpt => "gpt",
        }
    }

    /// Human-readable label shown next to the selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fuzzy => "Fuzzy (Base)",
            Self::Embedding => "Embedding (Premium)",
            Self::Gpt => "GPT (Premium)",
        }
    }

    #[must_use]
    pub const fn is_premium(self) -> bool {
        !matches!(self, Self::Fuzzy)
    }
}

impl fmt::Display for MatchingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchingType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fuzzy" => Ok(Self::Fuzzy),
            "embedding" => Ok(Self::Embedding),
            "gpt" => Ok(Self::Gpt),
            other => Err(CoreError::InvalidValue {
                field: "matching type",
                value: other.to_string(),
                expected: "fuzzy, embedding, gpt",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ExportFormat
// ---------------------------------------------------------------------------

/// On-disk encoding of an exported row sequence.
///
/// Deserialization goes through [`FromStr`], so configuration accepts the
/// same case-insensitive spellings as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        self.as_str()
    }

    /// Infer the format from a file name: `.json` selects JSON, anything
    /// else falls back to CSV.
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        let is_json = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json { Self::Json } else { Self::Csv }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(CoreError::InvalidValue {
                field: "export format",
                value: s.to_string(),
                expected: "csv, json",
            }),
        }
    }
}

impl<'de> Deserialize<'de> for ExportFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// One of the three tables carried by an analysis response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Raw,
    Standardized,
    Indices,
}

impl Dataset {
    pub const ALL: [Self; 3] = [Self::Raw, Self::Standardized, Self::Indices];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Standardized => "standardized",
            Self::Indices => "indices",
        }
    }

    /// Base file name (without extension) used when exporting the dataset.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Raw => "raw_data",
            Self::Standardized => "standardized_data",
            Self::Indices => "financial_indices",
        }
    }

    #[must_use]
    pub fn filename(self, format: ExportFormat) -> String {
        format!("{}.{}", self.file_stem(), format.extension())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" | "raw_data" => Ok(Self::Raw),
            "standardized" | "standardized_data" => Ok(Self::Standardized),
            "indices" | "financial_indices" => Ok(Self::Indices),
            other => Err(CoreError::InvalidValue {
                field: "dataset",
                value: other.to_string(),
                expected: "raw, standardized, indices",
            }),
        }
    }
}
