use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bilancio_config::BilancioConfig;
use bilancio_core::{Dataset, ExportFormat};
use bilancio_export::{DirectorySink, ExportReport, WriterSink, export_rows};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::commands::shared::{dataset_rows, load_response, parse_format};
use crate::output::output;

/// Where `bilancio export` writes.
#[derive(Debug, PartialEq, Eq)]
enum Destination {
    Stdout { filename: String },
    File { dir: PathBuf, filename: String },
}

/// Handle `bilancio export`.
pub async fn handle(
    args: &ExportArgs,
    config: &BilancioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let dataset: Dataset = args.dataset.parse()?;
    let explicit = parse_format(args.export_format.as_deref())?;
    let response = load_response(&args.response).await?;
    let rows = dataset_rows(&response, dataset, args.year.as_deref(), args.long)?;

    let destination = resolve_destination(
        args.output.as_deref(),
        dataset,
        explicit.unwrap_or(config.export.format),
        &config.export.output_dir,
    )?;

    match destination {
        Destination::Stdout { filename } => {
            let format = explicit.unwrap_or(config.export.format);
            let mut sink = WriterSink::new(std::io::stdout(), "<stdout>");
            let report = export_rows(&rows, &filename, Some(format), &mut sink)?;
            // Piped output stays byte-identical to the file export.
            if std::io::stdout().is_terminal() {
                println!();
            }
            if !flags.quiet {
                report_to_stderr(&report);
            }
            Ok(())
        }
        Destination::File { dir, filename } => {
            let mut sink = DirectorySink::new(dir);
            let report = export_rows(&rows, &filename, explicit, &mut sink)
                .with_context(|| format!("failed to export {dataset} data"))?;
            output(&report, flags.format)
        }
    }
}

/// Stdout carries the data, so the summary goes to stderr.
fn report_to_stderr(report: &ExportReport) {
    eprintln!(
        "exported {} rows x {} columns ({} bytes, {})",
        report.rows, report.columns, report.bytes, report.format
    );
}

/// Split `--output` into a directory and a file name. Without `--output`
/// the dataset's standard name is placed in the configured directory.
fn resolve_destination(
    output: Option<&str>,
    dataset: Dataset,
    format: ExportFormat,
    output_dir: &Path,
) -> anyhow::Result<Destination> {
    match output {
        Some("-") => Ok(Destination::Stdout {
            filename: dataset.filename(format),
        }),
        Some(path) => {
            let path = Path::new(path);
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .with_context(|| format!("--output '{}' has no file name", path.display()))?
                .to_string();
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            Ok(Destination::File { dir, filename })
        }
        None => Ok(Destination::File {
            dir: output_dir.to_path_buf(),
            filename: dataset.filename(format),
        }),
    }
}
