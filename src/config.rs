//! Generator settings and `refdoc.toml` loading.
//!
//! Settings resolve in three layers: built-in defaults, then the config file
//! (explicit `--config` path, or `./refdoc.toml` when present), then CLI
//! flags applied by the binary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::Deserialize;
use thiserror::Error;

use crate::title::TitleTable;
use crate::walker::WalkOptions;

/// Config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "refdoc.toml";

/// Default directory, relative to the docs root, that pages are written under.
pub const DEFAULT_OUTPUT_PREFIX: &str = "sdk-reference/python";

/// Default source file extension.
pub const DEFAULT_EXTENSION: &str = "py";

/// Default navigation manifest name.
pub const DEFAULT_NAV_FILE: &str = "SUMMARY.md";

/// Segments that exclude a module from the reference.
pub const DEFAULT_RESERVED_NAMES: &[&str] = &["tests", "test", "scripts", "migrations"];

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid manual override pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// On-disk shape of `refdoc.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub package: Option<String>,
    pub output_prefix: Option<String>,
    pub extension: Option<String>,
    pub nav_file: Option<String>,
    pub reserved_names: Option<Vec<String>>,
    #[serde(default)]
    pub manual_overrides: Vec<String>,
    pub repo_root: Option<PathBuf>,
    pub include_hidden: Option<bool>,
    pub respect_gitignore: Option<bool>,
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
}

impl FileConfig {
    /// Parse a config file's contents.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load the config file.
///
/// An explicit path must exist. Without one, `./refdoc.toml` is used when
/// present and defaults otherwise.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(CONFIG_FILENAME);
            if !local.is_file() {
                tracing::debug!("no {CONFIG_FILENAME} found, using defaults");
                return Ok(FileConfig::default());
            }
            local
        }
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = FileConfig::parse(&contents, &path)?;
    tracing::debug!(?path, "loaded config");
    Ok(config)
}

/// Resolved generator settings.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Package name; derived from the source directory name when unset.
    pub package: Option<String>,
    /// Prefix for document paths, `/`-separated.
    pub output_prefix: String,
    /// Source file extension, without the dot.
    pub extension: String,
    /// Navigation manifest file name, written under the output prefix.
    pub nav_file: String,
    /// Segments that exclude a module.
    pub reserved_names: Vec<String>,
    /// Hand-written documents that must not be generated.
    pub manual_overrides: Vec<Pattern>,
    /// Root that edit paths are made relative to; the source root's parent when unset.
    pub repo_root: Option<PathBuf>,
    pub titles: TitleTable,
    pub walk: WalkOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: None,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            nav_file: DEFAULT_NAV_FILE.to_string(),
            reserved_names: DEFAULT_RESERVED_NAMES.iter().map(|s| s.to_string()).collect(),
            manual_overrides: Vec::new(),
            repo_root: None,
            titles: TitleTable::default(),
            walk: WalkOptions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Apply a config file over the defaults.
    pub fn from_file(file: FileConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        config.package = file.package;
        if let Some(prefix) = file.output_prefix {
            config.output_prefix = prefix.trim_matches('/').to_string();
        }
        if let Some(extension) = file.extension {
            config.extension = extension.trim_start_matches('.').to_string();
        }
        if let Some(nav_file) = file.nav_file {
            config.nav_file = nav_file;
        }
        if let Some(reserved) = file.reserved_names {
            config.reserved_names = reserved;
        }
        for pattern in &file.manual_overrides {
            config.add_manual_override(pattern)?;
        }
        config.repo_root = file.repo_root;
        if let Some(hidden) = file.include_hidden {
            config.walk.include_hidden = hidden;
        }
        if let Some(gitignore) = file.respect_gitignore {
            config.walk.respect_gitignore = gitignore;
        }
        config.titles = config.titles.with_overrides(file.titles);

        Ok(config)
    }

    /// Register a manual override glob.
    pub fn add_manual_override(&mut self, pattern: &str) -> Result<(), ConfigError> {
        let compiled = Pattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.manual_overrides.push(compiled);
        Ok(())
    }

    /// Whether `doc_path` (relative to the output prefix) is hand-written.
    pub fn is_manual_override(&self, doc_path: &str) -> bool {
        self.manual_overrides.iter().any(|p| p.matches(doc_path))
    }

    /// Join a document path onto the output prefix.
    pub fn output_path(&self, doc_path: &str) -> String {
        if self.output_prefix.is_empty() {
            doc_path.to_string()
        } else {
            format!("{}/{}", self.output_prefix, doc_path)
        }
    }

    /// Full path of the navigation manifest.
    pub fn nav_path(&self) -> String {
        self.output_path(&self.nav_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.output_prefix, "sdk-reference/python");
        assert_eq!(config.extension, "py");
        assert_eq!(config.nav_path(), "sdk-reference/python/SUMMARY.md");
        assert_eq!(config.reserved_names, ["tests", "test", "scripts", "migrations"]);
        assert!(config.manual_overrides.is_empty());
        assert!(!config.walk.respect_gitignore);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
package = "griddy"
output-prefix = "/reference/"
extension = ".py"
nav-file = "NAV.md"
reserved-names = ["tests"]
manual-overrides = ["index.md", "nfl/*.md"]
repo-root = "../python-sdk"
include-hidden = true
respect-gitignore = true

[titles]
nfl = "NFL"
"#;
        let file = FileConfig::parse(toml_str, Path::new("refdoc.toml")).unwrap();
        let config = GeneratorConfig::from_file(file).unwrap();

        assert_eq!(config.package.as_deref(), Some("griddy"));
        assert_eq!(config.output_prefix, "reference");
        assert_eq!(config.extension, "py");
        assert_eq!(config.nav_path(), "reference/NAV.md");
        assert_eq!(config.reserved_names, ["tests"]);
        assert_eq!(config.repo_root, Some(PathBuf::from("../python-sdk")));
        assert!(config.walk.include_hidden);
        assert!(config.walk.respect_gitignore);
        assert_eq!(config.titles.segment_title("nfl"), "NFL");
        assert_eq!(config.titles.segment_title("auth"), "Authentication");
    }

    #[test]
    fn test_parse_minimal_config() {
        let file = FileConfig::parse("package = \"griddy\"\n", Path::new("refdoc.toml")).unwrap();
        let config = GeneratorConfig::from_file(file).unwrap();

        assert_eq!(config.package.as_deref(), Some("griddy"));
        assert_eq!(config.output_prefix, DEFAULT_OUTPUT_PREFIX);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = FileConfig::parse("pakage = \"griddy\"\n", Path::new("refdoc.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_manual_override_globs() {
        let mut config = GeneratorConfig::default();
        config.add_manual_override("index.md").unwrap();
        config.add_manual_override("nfl/*.md").unwrap();

        assert!(config.is_manual_override("index.md"));
        assert!(config.is_manual_override("nfl/games.md"));
        assert!(!config.is_manual_override("auth/index.md"));
    }

    #[test]
    fn test_invalid_override_pattern() {
        let mut config = GeneratorConfig::default();
        let err = config.add_manual_override("nfl/[.md").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = load_file_config(Some(Path::new("/nonexistent/refdoc.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_empty_output_prefix() {
        let config = GeneratorConfig {
            output_prefix: String::new(),
            ..Default::default()
        };
        assert_eq!(config.output_path("index.md"), "index.md");
    }
}
