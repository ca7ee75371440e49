//! Syntax highlighting data structures
//!
//! Defines capture names, highlight tokens, and the flattening of overlapping
//! query captures into a non-overlapping token list.

/// Standard tree-sitter capture names mapped to `hl-*` CSS classes.
/// Index into this array is the HighlightId.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",             // @attribute
    "boolean",               // @boolean (true, false)
    "comment",               // @comment
    "constant",              // @constant
    "constant.builtin",      // @constant.builtin (null, nil)
    "constructor",           // @constructor (new Foo)
    "escape",                // @escape (string escapes)
    "function",              // @function
    "function.builtin",      // @function.builtin (echo, print)
    "function.method",       // @function.method
    "keyword",               // @keyword
    "keyword.return",        // @keyword.return
    "keyword.function",      // @keyword.function (function, fn)
    "keyword.operator",      // @keyword.operator (and, or)
    "label",                 // @label
    "number",                // @number
    "operator",              // @operator
    "property",              // @property
    "punctuation",           // @punctuation (general)
    "punctuation.bracket",   // @punctuation.bracket
    "punctuation.delimiter", // @punctuation.delimiter
    "punctuation.special",   // @punctuation.special
    "string",                // @string
    "string.special",        // @string.special (regex, heredoc)
    "tag",                   // @tag (HTML tags)
    "tag.attribute",         // @tag.attribute
    "text",                  // @text
    "text.emphasis",         // @text.emphasis
    "text.strong",           // @text.strong
    "text.title",            // @text.title
    "text.uri",              // @text.uri
    "type",                  // @type
    "type.builtin",          // @type.builtin (int, string, bool)
    "variable",              // @variable
    "variable.builtin",      // @variable.builtin ($this, self)
    "variable.parameter",    // @variable.parameter
];

/// Index into HIGHLIGHT_NAMES
pub type HighlightId = u16;

/// A highlighted byte range within a code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightToken {
    /// Start byte (inclusive)
    pub start: usize,
    /// End byte (exclusive)
    pub end: usize,
    /// Index into HIGHLIGHT_NAMES
    pub highlight: HighlightId,
}

/// Look up highlight ID by capture name
pub fn highlight_id_for_name(name: &str) -> Option<HighlightId> {
    // Handle hierarchical names: try exact match first, then progressively shorter
    // parents (e.g. "keyword.control.import" -> "keyword.control" -> "keyword").
    let mut current = name;
    loop {
        if let Some(pos) = HIGHLIGHT_NAMES.iter().position(|&n| n == current) {
            return Some(pos as HighlightId);
        }

        let Some(dot_pos) = current.rfind('.') else {
            break;
        };
        current = &current[..dot_pos];
    }

    None
}

/// CSS class for a highlight, e.g. `hl-keyword-function`
pub fn css_class(id: HighlightId) -> Option<String> {
    HIGHLIGHT_NAMES
        .get(id as usize)
        .map(|name| format!("hl-{}", name.replace('.', "-")))
}

/// Resolve possibly nested captures into sorted, non-overlapping tokens.
///
/// Where captures overlap, the narrower one wins; for identical ranges the
/// first capture wins. Adjacent bytes with the same highlight are merged.
pub fn flatten_captures(len: usize, captures: &[HighlightToken]) -> Vec<HighlightToken> {
    let mut owner: Vec<Option<(HighlightId, usize)>> = vec![None; len];

    for capture in captures {
        let end = capture.end.min(len);
        if capture.start >= end {
            continue;
        }
        let width = end - capture.start;
        for slot in &mut owner[capture.start..end] {
            match slot {
                Some((_, existing)) if *existing <= width => {}
                _ => *slot = Some((capture.highlight, width)),
            }
        }
    }

    let mut tokens: Vec<HighlightToken> = Vec::new();
    for (byte, slot) in owner.iter().enumerate() {
        let Some((highlight, _)) = *slot else {
            continue;
        };
        match tokens.last_mut() {
            Some(last) if last.end == byte && last.highlight == highlight => last.end = byte + 1,
            _ => tokens.push(HighlightToken {
                start: byte,
                end: byte + 1,
                highlight,
            }),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(start: usize, end: usize, highlight: HighlightId) -> HighlightToken {
        HighlightToken {
            start,
            end,
            highlight,
        }
    }

    #[test]
    fn test_highlight_id_lookup() {
        assert!(highlight_id_for_name("keyword").is_some());
        assert!(highlight_id_for_name("keyword.function").is_some());
        assert!(highlight_id_for_name("keyword.control.import").is_some());
        assert!(highlight_id_for_name("string").is_some());
        assert!(highlight_id_for_name("nonexistent").is_none());
    }

    #[test]
    fn test_css_class() {
        let id = highlight_id_for_name("keyword.function").unwrap();
        assert_eq!(css_class(id).as_deref(), Some("hl-keyword-function"));
        assert_eq!(css_class(HighlightId::MAX), None);
    }

    #[test]
    fn test_flatten_disjoint() {
        let tokens = flatten_captures(10, &[token(0, 2, 1), token(5, 8, 2)]);
        assert_eq!(tokens, vec![token(0, 2, 1), token(5, 8, 2)]);
    }

    #[test]
    fn test_flatten_nested_narrower_wins() {
        // string "a\nb" with an escape inside
        let tokens = flatten_captures(6, &[token(0, 6, 22), token(2, 4, 6)]);
        assert_eq!(tokens, vec![token(0, 2, 22), token(2, 4, 6), token(4, 6, 22)]);
    }

    #[test]
    fn test_flatten_identical_first_wins() {
        let tokens = flatten_captures(3, &[token(0, 3, 7), token(0, 3, 33)]);
        assert_eq!(tokens, vec![token(0, 3, 7)]);
    }

    #[test]
    fn test_flatten_merges_adjacent_and_clamps() {
        let tokens = flatten_captures(4, &[token(0, 2, 5), token(2, 9, 5)]);
        assert_eq!(tokens, vec![token(0, 4, 5)]);
    }
}
