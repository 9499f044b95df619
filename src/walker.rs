//! Source discovery.
//!
//! Uses the `ignore` crate to walk the package directory and collect every
//! file carrying the source extension, sorted by path so that repeated runs
//! emit pages and navigation entries in the same order.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;

/// Errors that can occur during directory walking.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("symlink loop detected: {path}")]
    SymlinkLoop { path: PathBuf },
}

/// Options for directory walking.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Follow symbolic links.
    pub follow_symlinks: bool,
    /// Include hidden files and directories.
    pub include_hidden: bool,
    /// Respect .gitignore and .ignore patterns. Off by default: generated
    /// modules are often gitignored yet still part of the public API.
    pub respect_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: false,
            respect_gitignore: false,
        }
    }
}

impl WalkOptions {
    /// Create options that include hidden files.
    pub fn with_hidden() -> Self {
        Self {
            include_hidden: true,
            ..Default::default()
        }
    }

    /// Create options that honor ignore files.
    pub fn with_gitignore() -> Self {
        Self {
            respect_gitignore: true,
            ..Default::default()
        }
    }
}

/// Collect every file under `root` whose extension is `extension`.
///
/// The result is sorted lexicographically by path. Any traversal error
/// aborts the walk.
///
/// # Examples
///
/// ```no_run
/// use refdoc::walker::{collect_sources, WalkOptions};
/// use std::path::Path;
///
/// let sources = collect_sources(Path::new("src/griddy"), "py", &WalkOptions::default()).unwrap();
/// for path in &sources {
///     println!("{}", path.display());
/// }
/// ```
pub fn collect_sources(
    root: &Path,
    extension: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>, WalkError> {
    if !root.exists() {
        return Err(WalkError::NotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(root)
        .hidden(!options.include_hidden)
        .ignore(options.respect_gitignore)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .parents(options.respect_gitignore)
        .follow_links(options.follow_symlinks)
        .build();

    let mut sources = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => match convert_error(e, root.to_path_buf()) {
                Some(err) => return Err(err),
                None => continue,
            },
        };

        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if !is_file {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == extension);
        if matches {
            sources.push(entry.into_path());
        }
    }

    sources.sort();
    tracing::debug!(root = %root.display(), count = sources.len(), "collected sources");
    Ok(sources)
}

/// Map an `ignore` error onto a walk error.
///
/// Ignore-file parse problems are not fatal to the walk and yield `None`.
fn convert_error(error: ignore::Error, path: PathBuf) -> Option<WalkError> {
    match error {
        ignore::Error::WithPath { path, err } => convert_error(*err, path),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            convert_error(*err, path)
        }
        ignore::Error::Loop { child, .. } => Some(WalkError::SymlinkLoop { path: child }),
        ignore::Error::Io(source) => {
            if source.kind() == std::io::ErrorKind::PermissionDenied {
                Some(WalkError::PermissionDenied { path })
            } else {
                Some(WalkError::Io { path, source })
            }
        }
        other => {
            tracing::warn!(error = %other, "ignoring walk error");
            None
        }
    }
}
