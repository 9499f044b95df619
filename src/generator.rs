//! Reference page generation.
//!
//! One pass over the sorted source files classifies every module, derives
//! its page, and registers it in the navigation tree. Pages and the manifest
//! are only handed to the sink once the whole pass has succeeded, so a
//! failing run writes nothing.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::errors::RefDocError;
use crate::module_path::{ModulePath, SkipReason, SourceSegments};
use crate::nav::Nav;
use crate::page::Page;
use crate::sink::DocSink;
use crate::walker::{collect_sources, WalkError};

/// A page produced for one module.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    /// Source file, as discovered under the source root.
    pub source: String,
    /// Document path including the output prefix.
    pub output_path: String,
    /// Document path relative to the output prefix (the nav target).
    pub doc_path: String,
    /// Navigation key segments; `["index"]` for the root package.
    pub nav_key: Vec<String>,
    pub identifier: String,
    pub title: String,
    /// Source path relative to the repository root.
    pub edit_path: String,
    pub is_package: bool,
    #[serde(skip)]
    pub contents: String,
}

/// A module excluded by the skip rules.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedModule {
    pub source: String,
    pub reason: SkipReason,
}

/// A module whose document is maintained by hand.
#[derive(Debug, Clone, Serialize)]
pub struct OverriddenModule {
    pub source: String,
    pub doc_path: String,
}

/// Everything one run decided, in source order.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub package: String,
    pub pages: Vec<PageRecord>,
    pub skipped: Vec<SkippedModule>,
    pub overridden: Vec<OverriddenModule>,
    pub nav_path: String,
    #[serde(skip)]
    pub nav: Nav,
}

impl GenerateReport {
    /// Page generated for the given document path (relative to the prefix).
    pub fn page(&self, doc_path: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.doc_path == doc_path)
    }

    /// Literate-nav manifest contents.
    pub fn manifest(&self) -> String {
        self.nav.to_literate_nav()
    }
}

/// Builder for a generation run.
///
/// # Examples
///
/// ```no_run
/// use refdoc::generator::RefDoc;
/// use refdoc::sink::FsSink;
///
/// let mut sink = FsSink::new("docs");
/// let report = RefDoc::new("tmp/python-sdk/src/griddy")
///     .package("griddy")
///     .generate(&mut sink)
///     .unwrap();
///
/// println!("{} pages", report.pages.len());
/// ```
#[derive(Debug, Clone)]
pub struct RefDoc {
    root: PathBuf,
    config: GeneratorConfig,
    pending_overrides: Vec<String>,
}

impl RefDoc {
    /// Create a builder for the package rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: GeneratorConfig::default(),
            pending_overrides: Vec::new(),
        }
    }

    /// Replace all settings.
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the package name used in identifiers and the root title.
    pub fn package(mut self, name: impl Into<String>) -> Self {
        self.config.package = Some(name.into());
        self
    }

    /// Set the directory pages are written under.
    pub fn output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.output_prefix = prefix.into();
        self
    }

    /// Set the root edit paths are made relative to.
    pub fn repo_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.repo_root = Some(root.into());
        self
    }

    /// Mark documents matching `pattern` as hand-written.
    pub fn manual_override(mut self, pattern: impl Into<String>) -> Self {
        self.pending_overrides.push(pattern.into());
        self
    }

    /// Include hidden files.
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.walk.include_hidden = include;
        self
    }

    /// Skip source files matched by ignore files.
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.config.walk.respect_gitignore = respect;
        self
    }

    /// Classify every module and render pages without writing anything.
    pub fn plan(self) -> Result<GenerateReport, RefDocError> {
        let (root, config) = self.resolve()?;
        plan(&root, &config)
    }

    /// Run the generator, writing pages and the manifest to `sink`.
    pub fn generate(self, sink: &mut dyn DocSink) -> Result<GenerateReport, RefDocError> {
        let (root, config) = self.resolve()?;
        generate(&root, &config, sink)
    }

    fn resolve(self) -> Result<(PathBuf, GeneratorConfig), RefDocError> {
        let mut config = self.config;
        for pattern in &self.pending_overrides {
            config.add_manual_override(pattern)?;
        }
        Ok((self.root, config))
    }
}

// ============================================================================
// Functional API
// ============================================================================

/// Classify every module under `root` and render its page in memory.
pub fn plan(root: &Path, config: &GeneratorConfig) -> Result<GenerateReport, RefDocError> {
    let sources = collect_sources(root, &config.extension, &config.walk).map_err(|e| match e {
        WalkError::NotFound { path } => RefDocError::PathNotFound(path),
        WalkError::PermissionDenied { path } => RefDocError::PermissionDenied(path),
        other => RefDocError::Walk(other),
    })?;
    if sources.is_empty() {
        return Err(RefDocError::NoSourcesFound(root.to_path_buf()));
    }

    let package = package_name(root, config)?;
    let edit_prefix = edit_prefix(root, config);

    let mut report = GenerateReport {
        package: package.clone(),
        pages: Vec::new(),
        skipped: Vec::new(),
        overridden: Vec::new(),
        nav_path: config.nav_path(),
        nav: Nav::new(),
    };

    for source in &sources {
        let segments = SourceSegments::from_source(root, source)?;
        let source_display = source.display().to_string();

        if let Some(reason) = segments.skip_reason(&config.reserved_names) {
            tracing::debug!(source = %source_display, %reason, "skipping module");
            report.skipped.push(SkippedModule {
                source: source_display,
                reason,
            });
            continue;
        }

        let relative = to_slash(&segments_path(source, root));
        let module = segments.into_module_path();
        let doc_path = module.doc_path();

        if config.is_manual_override(&doc_path) {
            tracing::info!(%doc_path, "leaving hand-written page in place");
            report.overridden.push(OverriddenModule {
                source: source_display,
                doc_path,
            });
            continue;
        }

        report.nav.insert_module(module.parts(), doc_path.clone())?;

        let record = build_page(&module, &package, config, source_display, doc_path, &edit_prefix, &relative);
        tracing::debug!(module = %module, doc = %record.output_path, "planned page");
        report.pages.push(record);
    }

    Ok(report)
}

/// Run the generator over `root`, writing every page and the manifest to `sink`.
pub fn generate(
    root: &Path,
    config: &GeneratorConfig,
    sink: &mut dyn DocSink,
) -> Result<GenerateReport, RefDocError> {
    let report = plan(root, config)?;

    for page in &report.pages {
        sink.write_document(&page.output_path, &page.contents)?;
        sink.set_edit_path(&page.output_path, &page.edit_path)?;
    }
    sink.write_document(&report.nav_path, &report.manifest())?;

    tracing::info!(
        package = %report.package,
        pages = report.pages.len(),
        skipped = report.skipped.len(),
        overridden = report.overridden.len(),
        "generated reference pages"
    );
    Ok(report)
}

fn build_page(
    module: &ModulePath,
    package: &str,
    config: &GeneratorConfig,
    source: String,
    doc_path: String,
    edit_prefix: &str,
    relative: &str,
) -> PageRecord {
    let title = config.titles.module_title(module.parts(), package);
    let page = Page::new(module, package, title.clone());

    let nav_key = if module.is_root() {
        vec![crate::nav::ROOT_KEY.to_string()]
    } else {
        module.parts().to_vec()
    };

    let edit_path = if edit_prefix.is_empty() {
        relative.to_string()
    } else {
        format!("{edit_prefix}/{relative}")
    };

    PageRecord {
        source,
        output_path: config.output_path(&doc_path),
        doc_path,
        nav_key,
        identifier: page.identifier.clone(),
        title,
        edit_path,
        is_package: module.is_package(),
        contents: page.render(),
    }
}

/// Package name from config, or the source directory's name.
fn package_name(root: &Path, config: &GeneratorConfig) -> Result<String, RefDocError> {
    if let Some(package) = &config.package {
        return Ok(package.clone());
    }

    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| RefDocError::UnknownPackage(root.to_path_buf()))
}

/// Path of the source root relative to the repository root, `/`-separated.
///
/// Defaults to the source root's directory name, so edit paths look like
/// `griddy/auth/token.py`.
fn edit_prefix(root: &Path, config: &GeneratorConfig) -> String {
    let root_abs = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

    let repo_abs = match &config.repo_root {
        Some(repo) => repo.canonicalize().unwrap_or_else(|_| repo.clone()),
        None => match root_abs.parent() {
            Some(parent) => parent.to_path_buf(),
            None => return String::new(),
        },
    };

    match root_abs.strip_prefix(&repo_abs) {
        Ok(prefix) => to_slash(prefix),
        Err(_) => {
            tracing::warn!(
                root = %root_abs.display(),
                repo = %repo_abs.display(),
                "source root is outside the repository root; edit paths are relative to the source root"
            );
            String::new()
        }
    }
}

fn segments_path(source: &Path, root: &Path) -> PathBuf {
    source.strip_prefix(root).unwrap_or(source).to_path_buf()
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
