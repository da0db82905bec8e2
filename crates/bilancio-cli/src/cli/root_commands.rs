use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Upload a balance sheet and analyze it.
    Analyze(AnalyzeArgs),
    /// Export one dataset of a saved analysis response.
    Export(ExportArgs),
    /// Show one dataset of a saved analysis response as a table.
    Show(ShowArgs),
    /// List the financial indices the backend computes.
    Indices,
    /// List the available matching strategies.
    Matching,
    /// Print the effective configuration.
    Config,
    /// Print the JSON Schema of the analysis response.
    Schema,
}

/// Arguments for `bilancio analyze`.
#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Balance-sheet workbook (.xlsx or .xls).
    pub file: PathBuf,

    /// Matching strategy: fuzzy, embedding, gpt.
    #[arg(short, long, default_value = "fuzzy")]
    pub matching: String,

    /// Export raw, standardized and indices tables into this directory.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Export format: csv or json (defaults to the configured format).
    #[arg(short = 'x', long)]
    pub export_format: Option<String>,

    /// Save the full response as JSON for later `export`/`show`.
    #[arg(long)]
    pub save_response: Option<PathBuf>,

    /// Only show indices for this fiscal year.
    #[arg(short, long)]
    pub year: Option<String>,
}

/// Arguments for `bilancio export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Saved analysis response (JSON).
    pub response: PathBuf,

    /// Dataset: raw, standardized, indices.
    #[arg(short, long)]
    pub dataset: String,

    /// Destination file, or `-` for stdout. Defaults to the dataset's
    /// standard file name in the configured output directory.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export format: csv or json (inferred from the file name otherwise).
    #[arg(short = 'x', long)]
    pub export_format: Option<String>,

    /// Only include this fiscal year (indices only).
    #[arg(short, long)]
    pub year: Option<String>,

    /// One row per (year, index) instead of one row per year (indices only).
    #[arg(long)]
    pub long: bool,
}

/// Arguments for `bilancio show`.
#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Saved analysis response (JSON).
    pub response: PathBuf,

    /// Dataset: raw, standardized, indices.
    #[arg(short, long, default_value = "standardized")]
    pub dataset: String,

    /// Only include this fiscal year (indices only).
    #[arg(short, long)]
    pub year: Option<String>,
}
