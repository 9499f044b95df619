//! refdoc - Generate mkdocstrings reference pages for Python packages.
//!
//! refdoc walks a package's source tree and writes one Markdown stub per
//! public module, each holding the `:::` directives mkdocstrings expands at
//! build time, plus a `SUMMARY.md` manifest for the literate-nav plugin.
//!
//! # Quick Start
//!
//! ```no_run
//! use refdoc::generator::RefDoc;
//! use refdoc::sink::FsSink;
//!
//! let mut sink = FsSink::new("docs");
//! let report = RefDoc::new("tmp/python-sdk/src/griddy")
//!     .package("griddy")
//!     .manual_override("index.md")
//!     .generate(&mut sink)
//!     .unwrap();
//!
//! println!("{} pages, {} skipped", report.pages.len(), report.skipped.len());
//! ```
//!
//! # Modules
//!
//! - [`walker`] - Source discovery
//! - [`module_path`] - Module paths, skip rules, document paths
//! - [`title`] - Page titles
//! - [`page`] - Breadcrumbs and page rendering
//! - [`nav`] - Navigation tree and literate-nav manifest
//! - [`sink`] - Document output
//! - [`config`] - Settings and `refdoc.toml`
//! - [`generator`] - The generation pass and fluent builder

pub mod errors;
pub mod walker;
pub mod module_path;
pub mod title;
pub mod page;
pub mod nav;
pub mod sink;
pub mod config;
pub mod generator;

// Re-export key types at crate root for convenience
pub use config::{ConfigError, FileConfig, GeneratorConfig};
pub use errors::RefDocError;
pub use generator::{generate, plan, GenerateReport, PageRecord, RefDoc};
pub use module_path::{ModulePath, PathError, SkipReason};
pub use nav::{Nav, NavError};
pub use page::{Breadcrumb, Page};
pub use sink::{DocSink, FsSink, MemorySink, SinkError};
pub use title::TitleTable;
pub use walker::WalkError;
