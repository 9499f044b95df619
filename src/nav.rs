//! Navigation tree and literate-nav manifest.
//!
//! [`Nav`] accumulates `key -> document` entries during the walk. Keys are
//! module segments; siblings keep insertion order. The finished tree is
//! serialized as a nested Markdown list for the literate-nav plugin.

use thiserror::Error;

/// Key used for the root package's entry.
pub const ROOT_KEY: &str = "index";

/// Indentation per nesting level in the manifest.
const INDENT: &str = "    ";

/// Box-drawing characters for outline rendering.
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const VERTICAL: &str = "│   ";
const SPACE: &str = "    ";

/// Errors raised while registering navigation entries.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("duplicate navigation key `{key}`: {existing} and {incoming}")]
    DuplicateKey {
        key: String,
        existing: String,
        incoming: String,
    },

    #[error("navigation key must have at least one segment")]
    EmptyKey,
}

#[derive(Debug, Clone, Default)]
struct NavNode {
    doc: Option<String>,
    children: Vec<(String, NavNode)>,
}

impl NavNode {
    fn child_mut(&mut self, name: &str) -> &mut NavNode {
        let index = match self.children.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.children.push((name.to_string(), NavNode::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[index].1
    }
}

/// Navigation accumulator.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    root: NavNode,
    len: usize,
}

impl Nav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key -> doc`.
    ///
    /// Registering the same key twice is an error; the first entry is kept.
    pub fn insert<S: AsRef<str>>(&mut self, key: &[S], doc: impl Into<String>) -> Result<(), NavError> {
        if key.is_empty() {
            return Err(NavError::EmptyKey);
        }

        let doc = doc.into();
        let mut node = &mut self.root;
        for segment in key {
            node = node.child_mut(segment.as_ref());
        }

        if let Some(existing) = &node.doc {
            return Err(NavError::DuplicateKey {
                key: key
                    .iter()
                    .map(|s| s.as_ref())
                    .collect::<Vec<_>>()
                    .join("."),
                existing: existing.clone(),
                incoming: doc,
            });
        }

        node.doc = Some(doc);
        self.len += 1;
        Ok(())
    }

    /// Register a module key, mapping the empty key to [`ROOT_KEY`].
    pub fn insert_module<S: AsRef<str>>(&mut self, parts: &[S], doc: impl Into<String>) -> Result<(), NavError> {
        if parts.is_empty() {
            self.insert(&[ROOT_KEY], doc)
        } else {
            self.insert(parts, doc)
        }
    }

    /// Look up the document registered for `key`.
    pub fn get<S: AsRef<str>>(&self, key: &[S]) -> Option<&str> {
        let mut node = &self.root;
        for segment in key {
            node = &node
                .children
                .iter()
                .find(|(name, _)| name == segment.as_ref())?
                .1;
        }
        node.doc.as_deref()
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Manifest lines, each terminated by a newline.
    ///
    /// Nodes are emitted depth-first in insertion order. Intermediate nodes
    /// without a document of their own are listed as plain text.
    pub fn build_literate_nav(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.len);
        push_literate(&mut lines, &self.root, 0);
        lines
    }

    /// The whole manifest as one string.
    pub fn to_literate_nav(&self) -> String {
        self.build_literate_nav().concat()
    }

    /// Render the tree with box-drawing characters under a `title` line.
    pub fn render_outline(&self, title: &str) -> String {
        let mut output = String::with_capacity(64 * (self.len + 1));
        output.push_str(title);
        output.push('\n');
        render_children(&mut output, &self.root, "");
        output
    }
}

fn push_literate(lines: &mut Vec<String>, node: &NavNode, level: usize) {
    for (name, child) in &node.children {
        let item = match &child.doc {
            Some(doc) => format!("[{name}]({doc})"),
            None => name.clone(),
        };
        lines.push(format!("{}* {}\n", INDENT.repeat(level), item));
        push_literate(lines, child, level + 1);
    }
}

fn render_children(output: &mut String, node: &NavNode, prefix: &str) {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last = i == count - 1;

        output.push_str(prefix);
        output.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        output.push_str(name);
        if let Some(doc) = &child.doc {
            output.push_str(" -> ");
            output.push_str(doc);
        }
        output.push('\n');

        let continuation = if is_last { SPACE } else { VERTICAL };
        render_children(output, child, &format!("{prefix}{continuation}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Nav {
        let mut nav = Nav::new();
        let root: [&str; 0] = [];
        nav.insert_module(&root, "index.md").unwrap();
        nav.insert_module(&["auth"], "auth/index.md").unwrap();
        nav.insert_module(&["auth", "token"], "auth/token.md").unwrap();
        nav.insert_module(&["client"], "client.md").unwrap();
        nav
    }

    #[test]
    fn test_literate_nav_nesting() {
        let nav = sample();

        assert_eq!(
            nav.build_literate_nav(),
            vec![
                "* [index](index.md)\n",
                "* [auth](auth/index.md)\n",
                "    * [token](auth/token.md)\n",
                "* [client](client.md)\n",
            ]
        );
        assert_eq!(nav.len(), 4);
    }

    #[test]
    fn test_intermediate_nodes_without_document() {
        let mut nav = Nav::new();
        nav.insert(&["nfl", "games"], "nfl/games.md").unwrap();

        assert_eq!(
            nav.to_literate_nav(),
            "* nfl\n    * [games](nfl/games.md)\n"
        );
    }

    #[test]
    fn test_child_before_parent_keeps_position() {
        let mut nav = Nav::new();
        nav.insert(&["auth", "token"], "auth/token.md").unwrap();
        nav.insert(&["auth"], "auth/index.md").unwrap();

        assert_eq!(
            nav.to_literate_nav(),
            "* [auth](auth/index.md)\n    * [token](auth/token.md)\n"
        );
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let mut nav = Nav::new();
        nav.insert(&["auth"], "auth.md").unwrap();

        let err = nav.insert(&["auth"], "auth/index.md").unwrap_err();
        assert!(matches!(err, NavError::DuplicateKey { .. }));
        assert_eq!(nav.get(&["auth"]), Some("auth.md"));
        assert_eq!(nav.len(), 1);
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let mut nav = Nav::new();
        let key: [&str; 0] = [];
        assert!(matches!(nav.insert(&key, "x.md"), Err(NavError::EmptyKey)));
    }

    #[test]
    fn test_get() {
        let nav = sample();
        assert_eq!(nav.get(&["index"]), Some("index.md"));
        assert_eq!(nav.get(&["auth", "token"]), Some("auth/token.md"));
        assert_eq!(nav.get(&["auth", "missing"]), None);
    }

    #[test]
    fn test_render_outline() {
        let nav = sample();
        let outline = nav.render_outline("griddy");

        assert_eq!(
            outline,
            "griddy\n\
             ├── index -> index.md\n\
             ├── auth -> auth/index.md\n\
             │   └── token -> auth/token.md\n\
             └── client -> client.md\n"
        );
    }
}
