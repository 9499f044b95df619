//! Error types for refdoc.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::module_path::PathError;
use crate::nav::NavError;
use crate::sink::SinkError;
use crate::walker::WalkError;

/// Top-level error type for refdoc operations.
#[derive(Debug, thiserror::Error)]
pub enum RefDocError {
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("no source files found in {0}")]
    NoSourcesFound(PathBuf),

    #[error("cannot determine package name for {0}; pass --package")]
    UnknownPackage(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("path error: {0}")]
    Path(#[from] PathError),

    #[error("navigation error: {0}")]
    Nav(#[from] NavError),

    #[error("output error: {0}")]
    Sink(#[from] SinkError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Map an error to its exit code.
pub fn exit_code(error: &RefDocError) -> i32 {
    match error {
        RefDocError::PathNotFound(_) => 3,
        RefDocError::PermissionDenied(_) => 4,
        RefDocError::NoSourcesFound(_) => 5,
        RefDocError::Config(_) => 6,
        RefDocError::Nav(_) => 7,
        RefDocError::Walk(WalkError::NotFound { .. }) => 3,
        RefDocError::Walk(WalkError::PermissionDenied { .. }) => 4,
        RefDocError::Walk(_) => 2,
        RefDocError::UnknownPackage(_) => 1,
        RefDocError::Io(_) => 1,
        RefDocError::Path(_) => 1,
        RefDocError::Sink(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let not_found = RefDocError::Walk(WalkError::NotFound {
            path: PathBuf::from("missing"),
        });
        assert_eq!(exit_code(&not_found), 3);

        let duplicate = RefDocError::Nav(NavError::DuplicateKey {
            key: "auth".into(),
            existing: "auth.md".into(),
            incoming: "auth/index.md".into(),
        });
        assert_eq!(exit_code(&duplicate), 7);
        assert_eq!(exit_code(&RefDocError::NoSourcesFound(PathBuf::from("."))), 5);
    }
}
