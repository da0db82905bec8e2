//! # bilancio-export
//!
//! Turns analysis tables into downloadable files.
//!
//! CSV is the canonical format; JSON is available when asked for explicitly
//! or when the file name ends in `.json`. Encoded bytes go to an
//! [`ExportSink`], so the same routine serves a directory on disk, stdout,
//! or an in-memory buffer in tests.

pub mod csv_writer;
pub mod json_writer;
pub mod sink;

mod error;

pub use error::ExportError;
pub use sink::{DirectorySink, ExportSink, WriterSink};

use std::path::PathBuf;

use bilancio_core::{ExportFormat, Row, columns};
use serde::Serialize;

/// Outcome of one export, suitable for CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub filename: String,
    pub target: PathBuf,
    pub format: ExportFormat,
    pub rows: usize,
    pub columns: usize,
    pub bytes: usize,
}

/// Encode rows in the given format.
///
/// # Errors
///
/// Returns [`ExportError`] if encoding fails.
pub fn encode_rows(rows: &[Row], format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => csv_writer::encode(rows),
        ExportFormat::Json => json_writer::to_json_string(rows).map(String::into_bytes),
    }
}

/// Encode `rows` and hand them to `sink` as `filename`.
///
/// With `format` unset, the format is inferred from the file extension.
///
/// # Errors
///
/// Returns [`ExportError`] if encoding fails or the sink cannot be written.
pub fn export_rows<S>(
    rows: &[Row],
    filename: &str,
    format: Option<ExportFormat>,
    sink: &mut S,
) -> Result<ExportReport, ExportError>
where
    S: ExportSink + ?Sized,
{
    let format = format.unwrap_or_else(|| ExportFormat::from_filename(filename));
    let contents = encode_rows(rows, format)?;
    let target = sink.write_export(filename, &contents)?;

    tracing::info!(
        filename,
        target = %target.display(),
        %format,
        rows = rows.len(),
        bytes = contents.len(),
        "exported rows"
    );

    Ok(ExportReport {
        filename: filename.to_string(),
        target,
        format,
        rows: rows.len(),
        columns: columns(rows).len(),
        bytes: contents.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Vec<Row> {
        serde_json::from_value(json!([{"a": 1, "b": "x,y"}, {"a": 2, "b": "z"}])).unwrap()
    }

    #[test]
    fn format_follows_extension_when_unset() {
        let mut sink = WriterSink::new(Vec::new(), "<buffer>");
        let report = export_rows(&sample(), "rows.json", None, &mut sink).unwrap();
        assert_eq!(report.format, ExportFormat::Json);
        let parsed: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(parsed[1]["b"], "z");
    }

    #[test]
    fn explicit_format_wins_over_extension() {
        let mut sink = WriterSink::new(Vec::new(), "<buffer>");
        let report =
            export_rows(&sample(), "rows.json", Some(ExportFormat::Csv), &mut sink).unwrap();
        assert_eq!(report.format, ExportFormat::Csv);
        assert_eq!(sink.into_inner(), b"a,b\n1,\"x,y\"\n2,z");
    }

    #[test]
    fn report_counts_rows_columns_and_bytes() {
        let mut sink = WriterSink::new(Vec::new(), "<buffer>");
        let report = export_rows(&sample(), "raw_data.csv", None, &mut sink).unwrap();
        assert_eq!(
            report,
            ExportReport {
                filename: "raw_data.csv".to_string(),
                target: PathBuf::from("<buffer>"),
                format: ExportFormat::Csv,
                rows: 2,
                columns: 2,
                bytes: 15,
            }
        );
    }
}
