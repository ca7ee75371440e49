//! Tree-sitter language registry and token extraction
//!
//! Grammars and compiled highlight queries are built once per process and
//! shared read-only between conversions. Parsers are `!Sync`, so a fresh
//! parser is created for every block.

use std::collections::HashMap;
use std::sync::LazyLock;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser, Query, QueryCursor};

use super::highlights::{flatten_captures, highlight_id_for_name, HighlightToken};
use super::languages::LanguageId;

// Highlight queries shipped with the grammar crates
// (some use HIGHLIGHT_QUERY singular)
const RUST_HIGHLIGHTS: &str = tree_sitter_rust::HIGHLIGHTS_QUERY;
const JAVASCRIPT_HIGHLIGHTS: &str = tree_sitter_javascript::HIGHLIGHT_QUERY;
const TYPESCRIPT_HIGHLIGHTS: &str = tree_sitter_typescript::HIGHLIGHTS_QUERY;
const PYTHON_HIGHLIGHTS: &str = tree_sitter_python::HIGHLIGHTS_QUERY;
const GO_HIGHLIGHTS: &str = tree_sitter_go::HIGHLIGHTS_QUERY;
const C_HIGHLIGHTS: &str = tree_sitter_c::HIGHLIGHT_QUERY;
const CPP_HIGHLIGHTS: &str = tree_sitter_cpp::HIGHLIGHT_QUERY;
const JAVA_HIGHLIGHTS: &str = tree_sitter_java::HIGHLIGHTS_QUERY;
const BASH_HIGHLIGHTS: &str = tree_sitter_bash::HIGHLIGHT_QUERY;
const JSON_HIGHLIGHTS: &str = tree_sitter_json::HIGHLIGHTS_QUERY;
const CSS_HIGHLIGHTS: &str = tree_sitter_css::HIGHLIGHTS_QUERY;
const HTML_HIGHLIGHTS: &str = tree_sitter_html::HIGHLIGHTS_QUERY;
const PHP_HIGHLIGHTS: &str = tree_sitter_php::HIGHLIGHTS_QUERY;

static REGISTRY: LazyLock<LanguageRegistry> = LazyLock::new(LanguageRegistry::new);

/// The process-wide registry, initialized on first use
pub fn registry() -> &'static LanguageRegistry {
    &REGISTRY
}

/// Grammar plus compiled highlight query for one language
struct LanguageEntry {
    language: Language,
    query: Query,
}

/// Read-only set of languages that can be highlighted
pub struct LanguageRegistry {
    entries: HashMap<LanguageId, LanguageEntry>,
}

impl LanguageRegistry {
    /// Build grammars and compile queries for every supported language
    pub fn new() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
        };
        for &lang in LanguageId::HIGHLIGHTED {
            registry.init_language(lang);
        }
        tracing::debug!(
            "Language registry ready: {} of {} languages",
            registry.entries.len(),
            LanguageId::HIGHLIGHTED.len()
        );
        registry
    }

    /// Initialize a language's grammar and query
    fn init_language(&mut self, lang: LanguageId) {
        let (language, highlights_scm): (Language, String) = match lang {
            LanguageId::Rust => (tree_sitter_rust::LANGUAGE.into(), RUST_HIGHLIGHTS.into()),
            LanguageId::JavaScript => (
                tree_sitter_javascript::LANGUAGE.into(),
                JAVASCRIPT_HIGHLIGHTS.into(),
            ),
            // The TypeScript query only adds to the JavaScript one
            LanguageId::TypeScript => (
                tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                format!("{}\n{}", JAVASCRIPT_HIGHLIGHTS, TYPESCRIPT_HIGHLIGHTS),
            ),
            LanguageId::Python => (tree_sitter_python::LANGUAGE.into(), PYTHON_HIGHLIGHTS.into()),
            LanguageId::Go => (tree_sitter_go::LANGUAGE.into(), GO_HIGHLIGHTS.into()),
            LanguageId::C => (tree_sitter_c::LANGUAGE.into(), C_HIGHLIGHTS.into()),
            LanguageId::Cpp => (
                tree_sitter_cpp::LANGUAGE.into(),
                // C++ highlights extend the C ones
                format!("{}\n{}", C_HIGHLIGHTS, CPP_HIGHLIGHTS),
            ),
            LanguageId::Java => (tree_sitter_java::LANGUAGE.into(), JAVA_HIGHLIGHTS.into()),
            LanguageId::Bash => (tree_sitter_bash::LANGUAGE.into(), BASH_HIGHLIGHTS.into()),
            LanguageId::Json => (tree_sitter_json::LANGUAGE.into(), JSON_HIGHLIGHTS.into()),
            LanguageId::Css => (tree_sitter_css::LANGUAGE.into(), CSS_HIGHLIGHTS.into()),
            LanguageId::Html => (tree_sitter_html::LANGUAGE.into(), HTML_HIGHLIGHTS.into()),
            LanguageId::Php => (tree_sitter_php::LANGUAGE_PHP.into(), PHP_HIGHLIGHTS.into()),
            // No highlighting for plain text
            LanguageId::PlainText => return,
        };

        // Validate the grammar against the tree-sitter ABI before keeping it
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&language) {
            tracing::error!("Failed to set language for {:?}: {}", lang, e);
            return;
        }

        // Create query (may fail if query syntax is invalid)
        match Query::new(&language, &highlights_scm) {
            Ok(query) => {
                self.entries.insert(lang, LanguageEntry { language, query });
            }
            Err(e) => {
                tracing::error!("Failed to compile query for {:?}: {:?}", lang, e);
            }
        }
    }

    /// Whether `lang` has a usable grammar and query
    pub fn supports(&self, lang: LanguageId) -> bool {
        self.entries.contains_key(&lang)
    }

    /// Parse `source` and return non-overlapping highlight tokens (byte ranges).
    ///
    /// Returns None when the language is unsupported or parsing fails.
    pub fn tokenize(&self, source: &str, lang: LanguageId) -> Option<Vec<HighlightToken>> {
        let entry = self.entries.get(&lang)?;

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&entry.language) {
            tracing::error!("Failed to set language for {:?}: {}", lang, e);
            return None;
        }
        let Some(tree) = parser.parse(source, None) else {
            tracing::warn!("Parse failed for {:?}", lang);
            return None;
        };

        let mut captured = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut captures = cursor.captures(&entry.query, tree.root_node(), source.as_bytes());
        while let Some((query_match, capture_idx)) = captures.next() {
            let capture = &query_match.captures[*capture_idx];
            let capture_name = &entry.query.capture_names()[capture.index as usize];

            // Map capture name to highlight ID
            let Some(highlight) = highlight_id_for_name(capture_name) else {
                continue; // Skip unknown captures
            };

            let node = capture.node;
            captured.push(HighlightToken {
                start: node.start_byte(),
                end: node.end_byte(),
                highlight,
            });
        }

        Some(flatten_captures(source.len(), &captured))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::HIGHLIGHT_NAMES;

    fn names<'a>(source: &'a str, tokens: &[HighlightToken]) -> Vec<(&'a str, &'static str)> {
        tokens
            .iter()
            .map(|t| (&source[t.start..t.end], HIGHLIGHT_NAMES[t.highlight as usize]))
            .collect()
    }

    #[test]
    fn test_rust_tokens() {
        let source = "fn main() {\n    let x = 42;\n}\n";
        let tokens = registry()
            .tokenize(source, LanguageId::Rust)
            .expect("rust should be supported");
        let named = names(source, &tokens);

        assert!(named.iter().any(|(text, name)| *text == "fn" && name.starts_with("keyword")));
        assert!(named.iter().any(|(text, name)| *text == "let" && name.starts_with("keyword")));
        assert!(named.iter().any(|(text, _)| *text == "main"));
    }

    #[test]
    fn test_python_tokens() {
        let source = "def greet(name):\n    return \"hi\"\n";
        let tokens = registry()
            .tokenize(source, LanguageId::Python)
            .expect("python should be supported");
        let named = names(source, &tokens);

        assert!(named.iter().any(|(text, name)| *text == "def" && name.starts_with("keyword")));
        assert!(named.iter().any(|(text, name)| text.contains("hi") && name.starts_with("string")));
    }

    #[test]
    fn test_tokens_are_sorted_and_disjoint() {
        let source = "fn a() -> &'static str { \"a\\nb\" }";
        let tokens = registry().tokenize(source, LanguageId::Rust).unwrap();
        for pair in tokens.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for token in &tokens {
            assert!(source.is_char_boundary(token.start));
            assert!(source.is_char_boundary(token.end));
        }
    }

    #[test]
    fn test_plain_text_is_unsupported() {
        assert!(!registry().supports(LanguageId::PlainText));
        assert!(registry().tokenize("hello", LanguageId::PlainText).is_none());
    }

    #[test]
    fn test_core_languages_compile() {
        for lang in [LanguageId::Rust, LanguageId::Python, LanguageId::JavaScript] {
            assert!(registry().supports(lang), "{:?} failed to compile", lang);
        }
    }

    #[test]
    fn test_broken_source_still_tokenizes() {
        // tree-sitter recovers from syntax errors
        let tokens = registry().tokenize("fn ( {{ let", LanguageId::Rust);
        assert!(tokens.is_some());
    }
}
