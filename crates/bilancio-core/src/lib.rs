//! # bilancio-core
//!
//! Core types and error types for Bilancio.
//!
//! This crate provides the foundational types shared across all Bilancio crates:
//! - The matching strategies understood by the analysis backend
//! - The analysis response contract (raw rows, standardized rows, indices)
//! - The financial index catalogue and the per-year pivot used for tables
//! - Export format selection
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod indices;
pub mod response;

pub use enums::{Dataset, ExportFormat, MatchingType};
pub use errors::CoreError;
pub use indices::{FinancialIndices, IndexInfo, IndexUnit, YearIndices};
pub use response::{AnalysisResponse, AnalysisSummary, Row, RowDivergence, columns, divergent_rows};
