//! JSON encoding: rows serialized verbatim, pretty-printed.

use bilancio_core::Row;

use crate::error::ExportError;

/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn to_json_string(rows: &[Row]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_divergent_keys() {
        let rows: Vec<Row> = serde_json::from_value(json!([{"a": 1}, {"b": 2}])).unwrap();
        let text = to_json_string(&rows).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!([{"a": 1}, {"b": 2}]));
        assert!(text.contains('\n'));
    }

    #[test]
    fn empty_rows_encode_as_empty_array() {
        assert_eq!(to_json_string(&[]).unwrap(), "[]");
    }
}
