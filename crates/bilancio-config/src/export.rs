//! Export defaults.

use bilancio_core::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Format used when a command does not pick one explicitly.
    #[serde(default)]
    pub format: ExportFormat,

    /// Directory exported files are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            output_dir: default_output_dir(),
        }
    }
}
