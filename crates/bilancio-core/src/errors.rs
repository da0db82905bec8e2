//! Cross-cutting error types for Bilancio.
//!
//! Transport and export failures are defined in their respective crates
//! (`ClientError`, `ExportError`). The binary converges them with `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Bilancio crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A caller passed a value outside an enumerated contract.
    #[error("Invalid {field} '{value}': expected one of {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}
