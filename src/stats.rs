//! Document statistics
//!
//! Character and word counts derived from the raw Markdown source. These never
//! depend on the parser, so a degraded conversion still reports correct numbers.

/// Character and word counts for one source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Number of Unicode code points
    pub chars: usize,
    /// Number of whitespace-delimited segments
    pub words: usize,
}

impl DocumentStats {
    /// Status line text, e.g. `Characters: 1,024 | Words: 180`
    pub fn summary(&self) -> String {
        format!(
            "Characters: {} | Words: {}",
            format_count(self.chars),
            format_count(self.words)
        )
    }
}

/// Compute both counts for `text`
pub fn count(text: &str) -> DocumentStats {
    DocumentStats {
        chars: char_count(text),
        words: word_count(text),
    }
}

/// Length in code points (`"こんにちは"` is 5)
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Number of segments after splitting on runs of whitespace.
///
/// Leading and trailing whitespace is ignored, so an all-whitespace string has
/// zero words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Format a count with `,` thousands separators
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
