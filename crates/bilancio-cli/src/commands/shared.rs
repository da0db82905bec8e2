use std::path::Path;

use anyhow::Context;
use bilancio_core::{AnalysisResponse, Dataset, ExportFormat, FinancialIndices, Row};

/// Parse an optional `--export-format` value.
pub fn parse_format(raw: Option<&str>) -> anyhow::Result<Option<ExportFormat>> {
    raw.map(|value| {
        value
            .parse::<ExportFormat>()
            .map_err(|error| anyhow::anyhow!("invalid --export-format '{value}': {error}"))
    })
    .transpose()
}

/// Read a response previously saved with `analyze --save-response`.
pub async fn load_response(path: &Path) -> anyhow::Result<AnalysisResponse> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read response file {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("{} is not a valid analysis response", path.display()))
}

/// Restrict indices to one fiscal year, failing when the year is absent.
pub fn select_year(indices: &FinancialIndices, year: Option<&str>) -> anyhow::Result<FinancialIndices> {
    let Some(year) = year else {
        return Ok(indices.clone());
    };
    let filtered = indices.filter_year(year);
    if filtered.is_empty() {
        anyhow::bail!(
            "year '{year}' not found in financial indices (available: {})",
            indices.years().join(", ")
        );
    }
    Ok(filtered)
}

/// Rows of `dataset`, applying the indices-only options.
pub fn dataset_rows(
    response: &AnalysisResponse,
    dataset: Dataset,
    year: Option<&str>,
    long: bool,
) -> anyhow::Result<Vec<Row>> {
    if dataset != Dataset::Indices {
        if year.is_some() || long {
            anyhow::bail!("--year and --long apply only to the indices dataset");
        }
        return Ok(response.rows(dataset));
    }

    let indices = select_year(&response.financial_indices, year)?;
    Ok(if long {
        indices.to_long_rows()
    } else {
        indices.to_rows()
    })
}
