use std::path::Path;

use anyhow::Context;
use bilancio_client::{AnalysisClient, Upload};
use bilancio_config::BilancioConfig;
use bilancio_core::{AnalysisResponse, AnalysisSummary, Dataset, ExportFormat, MatchingType, Row};
use bilancio_export::{DirectorySink, ExportReport, export_rows};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::commands::shared::{parse_format, select_year};
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    file: String,
    matching: MatchingType,
    summary: AnalysisSummary,
    indices: Vec<Row>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exports: Vec<ExportReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_response: Option<String>,
}

/// Handle `bilancio analyze`.
pub async fn handle(
    args: &AnalyzeArgs,
    config: &BilancioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let matching: MatchingType = args.matching.parse()?;
    let format = parse_format(args.export_format.as_deref())?.unwrap_or(config.export.format);

    let upload = Upload::from_path(&args.file).await?;
    let file = upload.file_name().to_string();
    let client = AnalysisClient::new(&config.api)?;

    let progress = Progress::spinner(&format!(
        "Analyzing {file} with {} matching",
        matching.label()
    ));
    let response = match client
        .submit_analysis_until(upload, matching, interrupted())
        .await
    {
        Ok(response) => {
            progress.finish_clear();
            response
        }
        Err(error) => {
            progress.finish_err("analysis failed");
            return Err(error).with_context(|| format!("analysis of {file} failed"));
        }
    };

    let saved_response = match &args.save_response {
        Some(path) => Some(save_response(&response, path).await?),
        None => None,
    };

    let exports = match &args.out {
        Some(dir) => export_all(&response, dir, format)?,
        None => Vec::new(),
    };

    let indices = select_year(&response.financial_indices, args.year.as_deref())?.to_rows();

    output(
        &AnalyzeResponse {
            file,
            matching,
            summary: response.summary(),
            indices,
            exports,
            saved_response,
        },
        flags.format,
    )
}

/// Resolves on Ctrl-C. Never resolves if the signal handler cannot be
/// installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn save_response(response: &AnalysisResponse, path: &Path) -> anyhow::Result<String> {
    let json = serde_json::to_vec_pretty(response)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to save response to {}", path.display()))?;
    Ok(path.display().to_string())
}

/// Write the three datasets under their standard file names.
fn export_all(
    response: &AnalysisResponse,
    dir: &Path,
    format: ExportFormat,
) -> anyhow::Result<Vec<ExportReport>> {
    let mut sink = DirectorySink::new(dir);
    Dataset::ALL
        .into_iter()
        .map(|dataset| {
            let filename = dataset.filename(format);
            export_rows(&response.rows(dataset), &filename, Some(format), &mut sink)
                .with_context(|| format!("failed to export {dataset} data"))
        })
        .collect()
}
