//! Document sinks.
//!
//! The generator never touches the filesystem directly for output. It hands
//! each document to a [`DocSink`], which either writes it under an output
//! directory ([`FsSink`]) or keeps it in memory ([`MemorySink`]).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File written by [`FsSink::finish`] mapping documents to their sources.
pub const EDIT_PATHS_FILE: &str = ".edit-paths.json";

/// Errors that can occur while writing documents.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Destination for generated documents.
///
/// Paths are `/`-separated and relative to the sink's root.
pub trait DocSink {
    /// Create or replace the document at `path` with `contents`.
    fn write_document(&mut self, path: &str, contents: &str) -> Result<(), SinkError>;

    /// Associate the document at `path` with the source file it documents.
    fn set_edit_path(&mut self, path: &str, source: &str) -> Result<(), SinkError>;
}

/// Writes documents to disk under a root directory.
#[derive(Debug)]
pub struct FsSink {
    root: PathBuf,
    edit_paths: BTreeMap<String, String>,
    written: usize,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            edit_paths: BTreeMap::new(),
            written: 0,
        }
    }

    /// Root directory documents are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of documents written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush the collected edit paths to [`EDIT_PATHS_FILE`].
    pub fn finish(self) -> Result<PathBuf, SinkError> {
        let path = self.root.join(EDIT_PATHS_FILE);
        let json = serde_json::to_string_pretty(&self.edit_paths)?;
        write_file(&path, &json)?;
        Ok(path)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/').fold(self.root.clone(), |acc, seg| acc.join(seg))
    }
}

impl DocSink for FsSink {
    fn write_document(&mut self, path: &str, contents: &str) -> Result<(), SinkError> {
        let target = self.resolve(path);
        write_file(&target, contents)?;
        self.written += 1;
        tracing::debug!(path = %target.display(), "wrote document");
        Ok(())
    }

    fn set_edit_path(&mut self, path: &str, source: &str) -> Result<(), SinkError> {
        self.edit_paths.insert(path.to_string(), source.to_string());
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), SinkError> {
    let io_err = |source: std::io::Error| SinkError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}

/// Keeps documents in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub documents: BTreeMap<String, String>,
    pub edit_paths: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the document at `path`.
    pub fn document(&self, path: &str) -> Option<&str> {
        self.documents.get(path).map(String::as_str)
    }

    /// Source recorded for the document at `path`.
    pub fn edit_path(&self, path: &str) -> Option<&str> {
        self.edit_paths.get(path).map(String::as_str)
    }
}

impl DocSink for MemorySink {
    fn write_document(&mut self, path: &str, contents: &str) -> Result<(), SinkError> {
        self.documents.insert(path.to_string(), contents.to_string());
        Ok(())
    }

    fn set_edit_path(&mut self, path: &str, source: &str) -> Result<(), SinkError> {
        self.edit_paths.insert(path.to_string(), source.to_string());
        Ok(())
    }
}
