//! Output sinks: where an encoded export ends up.
//!
//! A browser triggers a "save as"; headless callers hand the exporter a
//! directory or any writer instead.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::error::ExportError;

/// Capability to persist an encoded export under a file name.
pub trait ExportSink {
    /// Write `contents` as `filename` and return the resolved target.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the name is rejected or the write fails.
    fn write_export(&mut self, filename: &str, contents: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Writes each export as a file inside a directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `filename` inside the sink directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidFilename`] unless `filename` is a single
    /// plain path component.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf, ExportError> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(filename)),
            _ => Err(ExportError::InvalidFilename(filename.to_string())),
        }
    }
}

impl ExportSink for DirectorySink {
    fn write_export(&mut self, filename: &str, contents: &[u8]) -> Result<PathBuf, ExportError> {
        let target = self.path_for(filename)?;
        fs::create_dir_all(&self.root).map_err(|source| ExportError::Io {
            target: self.root.clone(),
            source,
        })?;
        fs::write(&target, contents).map_err(|source| ExportError::Io {
            target: target.clone(),
            source,
        })?;
        Ok(target)
    }
}

/// Streams every export into one writer (stdout, a buffer, a socket).
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
    label: PathBuf,
}

impl<W: Write> WriterSink<W> {
    /// `label` names the writer in reports and errors, e.g. `<stdout>`.
    pub fn new(writer: W, label: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            label: label.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExportSink for WriterSink<W> {
    fn write_export(&mut self, filename: &str, contents: &[u8]) -> Result<PathBuf, ExportError> {
        if filename.is_empty() {
            return Err(ExportError::InvalidFilename(String::new()));
        }
        self.writer
            .write_all(contents)
            .and_then(|()| self.writer.flush())
            .map_err(|source| ExportError::Io {
                target: self.label.clone(),
                source,
            })?;
        Ok(self.label.clone())
    }
}
