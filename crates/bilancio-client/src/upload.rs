//! The file half of an analysis request.

use std::path::{Path, PathBuf};

use crate::error::ClientError;

/// Extensions the backend parses as workbooks.
pub const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// An in-memory file ready to be sent as the `file` multipart part.
///
/// Any byte content is accepted; the extension is only a hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping its base name for the part header.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Read`] if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Read {
                path: PathBuf::from(path),
                source,
            })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self { file_name, bytes })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    #[must_use]
    pub fn looks_like_spreadsheet(&self) -> bool {
        self.extension()
            .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.as_str()))
    }

    /// MIME type declared on the multipart part.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Some("xls") => "application/vnd.ms-excel",
            _ => "application/octet-stream",
        }
    }

    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part, ClientError> {
        let mime = self.mime_type();
        Ok(reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(mime)?)
    }
}
