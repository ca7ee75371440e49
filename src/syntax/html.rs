//! Highlighting pass over rendered HTML
//!
//! Finds `<pre><code>` blocks emitted by the markdown renderer and wraps their
//! tokens in `<span class="hl-*">` elements. Highlighted blocks are tagged with
//! `data-highlighted="true"` and skipped on later passes.

use super::highlights::{css_class, HighlightToken};
use super::languages::LanguageId;
use super::registry::registry;

const BLOCK_OPEN: &str = "<pre><code";
const BLOCK_CLOSE: &str = "</code></pre>";
const HIGHLIGHTED_ATTR: &str = "data-highlighted=\"true\"";

/// Highlight every code block in `html`.
///
/// Blocks without a recognizable language and malformed block markup are
/// copied through unchanged.
pub fn highlight_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 2);
    let mut rest = html;

    while let Some(start) = rest.find(BLOCK_OPEN) {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let block = rest;

        let Some(tag_len) = block[BLOCK_OPEN.len()..].find('>') else {
            break;
        };
        let attrs_end = BLOCK_OPEN.len() + tag_len;
        let body_start = attrs_end + 1;
        let Some(body_len) = block[body_start..].find(BLOCK_CLOSE) else {
            break;
        };
        let block_end = body_start + body_len + BLOCK_CLOSE.len();

        let attrs = &block[BLOCK_OPEN.len()..attrs_end];
        let body = &block[body_start..body_start + body_len];
        match highlight_block(attrs, body) {
            Some(highlighted) => out.push_str(&highlighted),
            None => out.push_str(&block[..block_end]),
        }
        rest = &block[block_end..];
    }

    // Remaining text, including any unterminated block
    out.push_str(rest);
    out
}

/// Highlight one block, or None to leave it as-is
fn highlight_block(attrs: &str, body: &str) -> Option<String> {
    if attrs.contains(HIGHLIGHTED_ATTR) {
        return None;
    }

    let fence_tag = language_class(attrs);
    let code = unescape_html(body);

    let language = match fence_tag.and_then(LanguageId::from_fence_tag) {
        Some(lang) => lang,
        None => match LanguageId::detect(&code) {
            Some(lang) => {
                tracing::debug!(
                    "Detected {} for code block tagged {:?}",
                    lang.display_name(),
                    fence_tag
                );
                lang
            }
            None => {
                tracing::debug!(
                    "Highlight skipped: no language for block tagged {:?}",
                    fence_tag
                );
                return None;
            }
        },
    };

    let Some(tokens) = registry().tokenize(&code, language) else {
        tracing::debug!("Highlight skipped: no grammar for {:?}", language);
        return None;
    };

    let class = fence_tag.unwrap_or(language.fence_tag());
    let mut out = String::with_capacity(body.len() * 2);
    out.push_str(BLOCK_OPEN);
    out.push_str(" class=\"language-");
    push_escaped(&mut out, class);
    out.push_str("\" ");
    out.push_str(HIGHLIGHTED_ATTR);
    out.push('>');
    push_tokens(&mut out, &code, &tokens);
    out.push_str(BLOCK_CLOSE);
    Some(out)
}

/// Highlight raw code as an HTML fragment of escaped text and spans
pub fn highlight_code(code: &str, language: LanguageId) -> Option<String> {
    let tokens = registry().tokenize(code, language)?;
    let mut out = String::with_capacity(code.len() * 2);
    push_tokens(&mut out, code, &tokens);
    Some(out)
}

fn push_tokens(out: &mut String, code: &str, tokens: &[HighlightToken]) {
    let mut last = 0;
    for token in tokens {
        let Some(class) = css_class(token.highlight) else {
            continue;
        };
        if token.start < last
            || !code.is_char_boundary(token.start)
            || !code.is_char_boundary(token.end)
        {
            continue;
        }
        push_escaped(out, &code[last..token.start]);
        out.push_str("<span class=\"");
        out.push_str(&class);
        out.push_str("\">");
        push_escaped(out, &code[token.start..token.end]);
        out.push_str("</span>");
        last = token.end;
    }
    push_escaped(out, &code[last..]);
}

/// The `xyz` of a `class="language-xyz"` attribute
fn language_class(attrs: &str) -> Option<&str> {
    let value_start = attrs.find("class=\"")? + "class=\"".len();
    let value_len = attrs[value_start..].find('"')?;
    attrs[value_start..value_start + value_len]
        .split_whitespace()
        .find_map(|class| class.strip_prefix("language-"))
        .filter(|tag| !tag.is_empty())
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Reverse the entity escaping applied by the HTML writer
fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    const ENTITIES: &[(&str, char)] = &[
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
        ("&#x27;", '\''),
    ];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &tail[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_block_is_highlighted() {
        let html = "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n";
        let out = highlight_html(html);
        assert!(out.starts_with("<pre><code class=\"language-rust\" data-highlighted=\"true\">"));
        assert!(out.contains("<span class=\"hl-keyword"));
        assert!(out.ends_with("</code></pre>\n"));
    }

    #[test]
    fn test_idempotent() {
        let html = "<p>x</p>\n<pre><code class=\"language-python\">def f():\n    return 1\n</code></pre>\n";
        let once = highlight_html(html);
        let twice = highlight_html(&once);
        assert_ne!(once, html);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_code_text_is_preserved() {
        let html = "<pre><code class=\"language-rust\">if a &lt; b &amp;&amp; c &gt; d { \"s\" }\n</code></pre>";
        let out = highlight_html(html);
        let text = strip_tags(&out);
        assert_eq!(unescape_html(&text), "if a < b && c > d { \"s\" }\n");
        assert!(!out.contains("a < b"));
    }

    #[test]
    fn test_unknown_tag_falls_back_to_detection() {
        let html = "<pre><code class=\"language-weird\">fn main() {\n    let x = 1;\n}\n</code></pre>";
        let out = highlight_html(html);
        assert!(out.contains("class=\"language-weird\" data-highlighted=\"true\""));
        assert!(out.contains("hl-keyword"));
    }

    #[test]
    fn test_untagged_undetectable_block_is_unchanged() {
        let html = "<pre><code>just some words\n</code></pre>\n";
        assert_eq!(highlight_html(html), html);
    }

    #[test]
    fn test_untagged_detected_block_gets_language_class() {
        let html = "<pre><code>def f(x):\n    return x\n</code></pre>";
        let out = highlight_html(html);
        assert!(out.contains("class=\"language-python\""));
    }

    #[test]
    fn test_html_without_code_is_unchanged() {
        let html = "<h1>Title</h1>\n<p>Hello <strong>World</strong></p>\n";
        assert_eq!(highlight_html(html), html);
        assert_eq!(highlight_html(""), "");
    }

    #[test]
    fn test_malformed_block_markup_is_copied_through() {
        for html in [
            "<pre><code",
            "<pre><code class=\"language-rust\">fn main() {}",
            "<p>a</p><pre><code class=\"language-rust\">",
        ] {
            assert_eq!(highlight_html(html), html);
        }
    }

    #[test]
    fn test_multiple_blocks() {
        let html = "<pre><code class=\"language-rust\">let a = 1;\n</code></pre>\n<p>mid</p>\n<pre><code class=\"language-js\">const b = 2;\n</code></pre>\n";
        let out = highlight_html(html);
        assert_eq!(out.matches(HIGHLIGHTED_ATTR).count(), 2);
        assert!(out.contains("<p>mid</p>"));
    }

    #[test]
    fn test_highlight_code_fragment() {
        let out = highlight_code("let x = \"<b>\";", LanguageId::Rust).unwrap();
        assert!(out.contains("&lt;b&gt;"));
        assert!(out.contains("<span class=\"hl-"));
        assert!(highlight_code("text", LanguageId::PlainText).is_none());
    }

    #[test]
    fn test_unescape_html() {
        assert_eq!(
            unescape_html("a &amp; b &lt;c&gt; &quot;d&quot; &#39;e&#39;"),
            "a & b <c> \"d\" 'e'"
        );
        assert_eq!(unescape_html("R&D &unknown;"), "R&D &unknown;");
    }

    #[test]
    fn test_language_class() {
        assert_eq!(language_class(" class=\"language-rust\""), Some("rust"));
        assert_eq!(language_class(" class=\"hl language-c++\""), Some("c++"));
        assert_eq!(language_class(""), None);
        assert_eq!(language_class(" class=\"language-\""), None);
    }

    fn strip_tags(html: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for ch in html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if !in_tag => out.push(ch),
                _ => {}
            }
        }
        out
    }
}
