//! Detection of which Markdown constructs a document uses

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};

use super::renderer::markdown_options;

/// Markdown constructs present in a source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownFeatures {
    pub has_headings: bool,
    pub has_links: bool,
    pub has_code_blocks: bool,
    pub has_inline_code: bool,
    pub has_bold: bool,
    pub has_italic: bool,
    pub has_lists: bool,
}

impl MarkdownFeatures {
    /// True when no construct beyond plain paragraphs was found
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Scan the parser event stream for the constructs in [`MarkdownFeatures`]
pub fn detect_features(markdown: &str) -> MarkdownFeatures {
    let mut features = MarkdownFeatures::default();

    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Start(Tag::Heading { .. }) => features.has_headings = true,
            Event::Start(Tag::Link { .. }) => features.has_links = true,
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => {
                features.has_code_blocks = true
            }
            Event::Code(_) => features.has_inline_code = true,
            Event::Start(Tag::Strong) => features.has_bold = true,
            Event::Start(Tag::Emphasis) => features.has_italic = true,
            Event::Start(Tag::List(_)) => features.has_lists = true,
            _ => {}
        }
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_headings() {
        assert!(detect_features("# Title\n## Subtitle").has_headings);
    }

    #[test]
    fn test_detects_links() {
        assert!(detect_features("Click [here](http://example.com)").has_links);
    }

    #[test]
    fn test_detects_code() {
        let features = detect_features("```javascript\ncode\n```");
        assert!(features.has_code_blocks);
        assert!(!features.has_inline_code);

        let features = detect_features("Use `console.log()` for debugging");
        assert!(features.has_inline_code);
        assert!(!features.has_code_blocks);
    }

    #[test]
    fn test_detects_emphasis() {
        assert!(detect_features("This is **bold** text").has_bold);
        assert!(detect_features("This is *italic* text").has_italic);
    }

    #[test]
    fn test_detects_lists() {
        assert!(detect_features("- Item 1\n- Item 2").has_lists);
        assert!(detect_features("1. First\n2. Second").has_lists);
    }

    #[test]
    fn test_plain_text_has_no_features() {
        let features = detect_features("Plain text without markdown");
        assert!(features.is_plain());
    }
}
