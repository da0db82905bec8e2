use bilancio_core::AnalysisResponse;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `bilancio schema`. A schema has no tabular form, so table mode
/// prints pretty JSON.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(AnalysisResponse);
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(&schema, format)
}
