//! Page titles.
//!
//! A module's title comes from an override table keyed by its last segment,
//! falling back to a title-cased rendering of the segment itself.

use std::collections::BTreeMap;

/// Built-in titles for common module names.
pub const DEFAULT_TITLES: &[(&str, &str)] = &[
    ("auth", "Authentication"),
    ("api", "API Client"),
    ("cli", "Command Line Interface"),
    ("utils", "Utilities"),
    ("config", "Configuration"),
    ("exc", "Exceptions"),
    ("exceptions", "Exceptions"),
    ("types", "Type Definitions"),
    ("models", "Data Models"),
    ("endpoints", "API Endpoints"),
    ("client", "Client"),
];

/// Title lookup table: built-in overrides plus user additions.
#[derive(Debug, Clone)]
pub struct TitleTable {
    overrides: BTreeMap<String, String>,
}

impl Default for TitleTable {
    fn default() -> Self {
        Self {
            overrides: DEFAULT_TITLES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl TitleTable {
    /// Table with no overrides at all.
    pub fn empty() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Add or replace overrides, returning the extended table.
    pub fn with_overrides<K, V>(mut self, extra: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in extra {
            self.overrides.insert(k.into(), v.into());
        }
        self
    }

    /// Look up a segment in the override table only.
    pub fn lookup(&self, segment: &str) -> Option<&str> {
        self.overrides.get(segment).map(String::as_str)
    }

    /// Title for a module with the given key segments.
    ///
    /// The root package (no segments) is titled after `package`.
    pub fn module_title<S: AsRef<str>>(&self, parts: &[S], package: &str) -> String {
        match parts.last() {
            None => title_case(package),
            Some(name) => self.segment_title(name.as_ref()),
        }
    }

    /// Title for a single segment.
    pub fn segment_title(&self, segment: &str) -> String {
        match self.lookup(segment) {
            Some(title) => title.to_string(),
            None => title_case(&segment.replace('_', " ")),
        }
    }
}

/// Title-case `text` the way Python's `str.title` does.
///
/// Each cased character is lowercased when it follows another cased one and
/// titlecased otherwise, so `"v2api"` becomes `"V2Api"` and `"ß"` becomes
/// `"Ss"`. Titlecasing covers the Latin digraphs (`ǆ` -> `ǅ`); other
/// characters use the first char of their uppercase mapping followed by the
/// lowercased remainder, which differs from Unicode titlecase only for a few
/// Greek iota-subscript letters and `ŉ`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for c in text.chars() {
        let cased = is_cased(c);
        if cased {
            if previous_cased {
                out.extend(c.to_lowercase());
            } else {
                push_titlecase(&mut out, c);
            }
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }

    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || matches!(c, 'ǅ' | 'ǈ' | 'ǋ' | 'ǲ')
}

fn push_titlecase(out: &mut String, c: char) {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => out.push('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => out.push('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => out.push('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => out.push('ǲ'),
        _ => {
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("token"), "Token");
        assert_eq!(title_case("game stats"), "Game Stats");
        assert_eq!(title_case("HTTP CLIENT"), "Http Client");
        assert_eq!(title_case("v2api"), "V2Api");
        assert_eq!(title_case("player's"), "Player'S");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_uses_titlecase_mapping() {
        assert_eq!(title_case("ß"), "Ss");
        assert_eq!(title_case("straße"), "Straße");
        assert_eq!(title_case("ﬁle"), "File");
        assert_eq!(title_case("ǆemal"), "ǅemal");
        assert_eq!(title_case("Ǉubljana"), "ǈubljana");
        assert_eq!(title_case("aǅ"), "Aǆ");
    }

    #[test]
    fn test_override_table() {
        let titles = TitleTable::default();
        assert_eq!(titles.segment_title("auth"), "Authentication");
        assert_eq!(titles.segment_title("api"), "API Client");
        assert_eq!(titles.segment_title("exc"), "Exceptions");
        assert_eq!(titles.segment_title("endpoints"), "API Endpoints");
    }

    #[test]
    fn test_fallback_replaces_underscores() {
        let titles = TitleTable::default();
        assert_eq!(titles.segment_title("game_stats"), "Game Stats");
        assert_eq!(titles.segment_title("token"), "Token");
    }

    #[test]
    fn test_root_title_from_package() {
        let titles = TitleTable::default();
        let empty: [&str; 0] = [];
        assert_eq!(titles.module_title(&empty, "griddy"), "Griddy");
        assert_eq!(titles.module_title(&["nfl", "auth"], "griddy"), "Authentication");
    }

    #[test]
    fn test_user_overrides_extend_and_replace() {
        let titles = TitleTable::default().with_overrides([("nfl", "NFL"), ("client", "HTTP Client")]);
        assert_eq!(titles.segment_title("nfl"), "NFL");
        assert_eq!(titles.segment_title("client"), "HTTP Client");
        assert_eq!(titles.segment_title("auth"), "Authentication");
    }

    #[test]
    fn test_titles_never_empty_for_nonempty_segments() {
        let titles = TitleTable::empty();
        for segment in ["a", "x_y", "9", "λ"] {
            assert!(!titles.segment_title(segment).is_empty());
        }
    }
}
