//! Reference page rendering.
//!
//! A page is a title heading, an optional breadcrumb trail back through the
//! module's ancestor packages, and one or two mkdocstrings `:::` directives.

use crate::module_path::{ModulePath, INDEX_DOCUMENT};

/// One ancestor link in a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
}

/// Breadcrumb trail for a nested module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub ancestors: Vec<Crumb>,
    pub leaf: String,
}

impl Breadcrumb {
    /// Build the trail for `parts`, or `None` when there is no ancestor.
    ///
    /// Ancestor `i` links to its package index. A module page lives in its
    /// parent's directory and climbs `len - i - 2` levels; a package page
    /// lives one level deeper, in `<parts>/index.md`, and climbs `len - i - 1`.
    pub fn for_parts<S: AsRef<str>>(parts: &[S], is_package: bool) -> Option<Self> {
        if parts.len() < 2 {
            return None;
        }

        let depth = parts.len();
        let page_depth = if is_package { depth } else { depth - 1 };
        let ancestors = parts[..depth - 1]
            .iter()
            .enumerate()
            .map(|(i, part)| Crumb {
                label: part.as_ref().to_string(),
                href: format!("{}{}", "../".repeat(page_depth - i - 1), INDEX_DOCUMENT),
            })
            .collect();

        Some(Self {
            ancestors,
            leaf: parts[depth - 1].as_ref().to_string(),
        })
    }

    /// Render as an emphasized Markdown line (no trailing newline).
    pub fn render(&self) -> String {
        let mut pieces: Vec<String> = self
            .ancestors
            .iter()
            .map(|c| format!("[{}]({})", c.label, c.href))
            .collect();
        pieces.push(format!("**{}**", self.leaf));
        format!("*{}*", pieces.join(" / "))
    }
}

/// A fully described reference page, ready to render.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub identifier: String,
    pub breadcrumb: Option<Breadcrumb>,
    pub is_package: bool,
}

impl Page {
    /// Describe the page for `module` with a precomputed title.
    pub fn new(module: &ModulePath, package: &str, title: String) -> Self {
        Self {
            title,
            identifier: module.identifier(package),
            breadcrumb: Breadcrumb::for_parts(module.parts(), module.is_package()),
            is_package: module.is_package(),
        }
    }

    /// Render the Markdown document.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let id = &self.identifier;

        out.push_str(&format!("# {}\n\n", self.title));

        if let Some(breadcrumb) = &self.breadcrumb {
            out.push_str(&format!("{}\n\n", breadcrumb.render()));
        }

        if self.is_package {
            // Package docstring only, then the module-level members.
            out.push_str(&format!("::: {id}\n"));
            out.push_str("    options:\n");
            out.push_str("      show_root_heading: false\n");
            out.push_str("      show_root_toc_entry: false\n");
            out.push_str("      members: false\n");
            out.push_str("\n---\n\n");
            out.push_str("## Module Contents\n\n");
            out.push_str(&format!("::: {id}\n"));
            out.push_str("    options:\n");
            out.push_str("      show_root_heading: false\n");
            out.push_str("      show_submodules: false\n");
        } else {
            out.push_str(&format!("::: {id}\n"));
        }

        out
    }
}
