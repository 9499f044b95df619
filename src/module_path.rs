//! Module paths and their classification.
//!
//! A [`ModulePath`] is the dotted-module view of a source file: the segments
//! of its location relative to the package root, extension stripped, with
//! package entry points (`__init__`) folded into their directory.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// File stem marking a package's own module.
pub const PACKAGE_ENTRY_POINT: &str = "__init__";

/// Prefix marking a private module or package.
pub const PRIVATE_PREFIX: char = '_';

/// Document name used for package pages.
pub const INDEX_DOCUMENT: &str = "index.md";

/// Errors that can occur while deriving a module path.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("{path} is not under source root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("path segment is not valid UTF-8: {path}")]
    NonUtf8 { path: PathBuf },

    #[error("source path has no module segments: {path}")]
    Empty { path: PathBuf },
}

/// Why a module produced no page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "segment", rename_all = "kebab-case")]
pub enum SkipReason {
    /// A segment starts with the private prefix.
    Private(String),
    /// A segment is one of the reserved names.
    Reserved(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Private(segment) => write!(f, "private segment `{segment}`"),
            SkipReason::Reserved(segment) => write!(f, "reserved segment `{segment}`"),
        }
    }
}

/// Raw segments of a source file relative to the package root.
///
/// These still include the `__init__` segment for package entry points;
/// skip rules run against this form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSegments(Vec<String>);

impl SourceSegments {
    /// Derive segments for `path` under `root`, stripping the extension.
    pub fn from_source(root: &Path, path: &Path) -> Result<Self, PathError> {
        let relative = path.strip_prefix(root).map_err(|_| PathError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
        let stem = relative.with_extension("");

        let mut parts = Vec::new();
        for component in stem.components() {
            if let Component::Normal(segment) = component {
                let segment = segment.to_str().ok_or_else(|| PathError::NonUtf8 {
                    path: path.to_path_buf(),
                })?;
                parts.push(segment.to_string());
            }
        }

        if parts.is_empty() {
            return Err(PathError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Self(parts))
    }

    /// Segments in order.
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Decide whether this module is excluded from the reference.
    ///
    /// Private segments are checked before reserved names, each in path order.
    pub fn skip_reason<S: AsRef<str>>(&self, reserved: &[S]) -> Option<SkipReason> {
        if let Some(segment) = self
            .0
            .iter()
            .find(|s| s.starts_with(PRIVATE_PREFIX) && s.as_str() != PACKAGE_ENTRY_POINT)
        {
            return Some(SkipReason::Private(segment.clone()));
        }

        self.0
            .iter()
            .find(|s| reserved.iter().any(|r| r.as_ref() == s.as_str()))
            .map(|s| SkipReason::Reserved(s.clone()))
    }

    /// Fold the entry-point segment away, producing the module path.
    pub fn into_module_path(mut self) -> ModulePath {
        let is_package = self.0.last().is_some_and(|s| s == PACKAGE_ENTRY_POINT);
        if is_package {
            self.0.pop();
        }
        ModulePath {
            parts: self.0,
            is_package,
        }
    }
}

/// A retained module: its key segments and whether it is a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    parts: Vec<String>,
    is_package: bool,
}

impl ModulePath {
    /// Build a module path directly from segments.
    pub fn new<S: Into<String>>(parts: impl IntoIterator<Item = S>, is_package: bool) -> Self {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
            is_package,
        }
    }

    /// Segments with the entry-point marker removed. Empty for the root package.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Whether the source file was a package entry point.
    pub fn is_package(&self) -> bool {
        self.is_package
    }

    /// Whether this is the root package's entry point.
    pub fn is_root(&self) -> bool {
        self.parts.is_empty()
    }

    /// Last segment, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    /// Fully-qualified identifier for the documentation directive.
    pub fn identifier(&self, package: &str) -> String {
        if self.parts.is_empty() {
            package.to_string()
        } else {
            format!("{}.{}", package, self.parts.join("."))
        }
    }

    /// Document path relative to the output prefix, always `/`-separated.
    ///
    /// Packages map to `<parts>/index.md`, regular modules to `<parts>.md`.
    pub fn doc_path(&self) -> String {
        if self.is_package {
            let mut segments: Vec<&str> = self.parts.iter().map(String::as_str).collect();
            segments.push(INDEX_DOCUMENT);
            segments.join("/")
        } else {
            format!("{}.md", self.parts.join("/"))
        }
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.parts.join("."))
        }
    }
}
