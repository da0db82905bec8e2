//! CSV encoding of dynamically keyed rows.
//!
//! Columns come from the first row and the header line is those keys
//! joined by commas, unquoted. Every row is written in that column order:
//! a missing key yields an empty cell, keys absent from the first row are
//! dropped. Data cells containing a comma, a quote, CR or LF are quoted
//! with inner quotes doubled. Records are joined by `\n` with no trailing
//! newline, and an empty input encodes to an empty string.

use bilancio_core::{Row, columns, divergent_rows};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::{Number, Value};

use crate::error::ExportError;

/// Encode rows as CSV text.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if the underlying writer fails.
pub fn to_csv_string(rows: &[Row]) -> Result<String, ExportError> {
    let bytes = encode(rows)?;
    String::from_utf8(bytes).map_err(|error| {
        ExportError::Csv(csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error,
        )))
    })
}

/// Encode rows as CSV bytes.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if the underlying writer fails.
pub fn encode(rows: &[Row]) -> Result<Vec<u8>, ExportError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    for divergence in divergent_rows(rows) {
        tracing::warn!(
            row = divergence.row,
            missing = ?divergence.missing,
            dropped = ?divergence.extra,
            "row keys differ from the header row"
        );
    }

    let header = columns(rows);
    if header.is_empty() {
        // One empty line per row after the empty header line.
        return Ok(vec![b'\n'; rows.len()]);
    }

    // The header line is the row-0 keys joined verbatim; only data cells
    // are quoted.
    let mut bytes = header.join(",").into_bytes();
    bytes.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(bytes);

    for row in rows {
        writer.write_record(
            header
                .iter()
                .map(|column| row.get(*column).map(cell_text).unwrap_or_default()),
        )?;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|error| ExportError::Csv(csv::Error::from(error.into_error())))?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(bytes)
}

/// Text of a single cell, before quoting.
///
/// `null` is empty, strings are verbatim, numbers use their shortest form
/// (integral floats drop the fraction), nested values are compact JSON.
#[must_use]
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        nested => nested.to_string(),
    }
}

fn number_text(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    match number.as_f64() {
        Some(float) if float == 0.0 => String::from("0"),
        Some(float) if float.fract() == 0.0 && float.abs() < 1e21 => format!("{float:.0}"),
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}
