//! Markdown to HTML renderer using pulldown-cmark
//!
//! The event stream is rewritten before serialization:
//! - soft breaks become `<br />`
//! - raw HTML from the source is emitted as escaped text
//! - link and image destinations with script-capable schemes are neutralized
//! - bare `http(s)://` and `www.` URLs in text become links

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};
use thiserror::Error;

/// Fragment published in place of the document when conversion fails
pub const FALLBACK_HTML: &str = "<p class=\"conversion-error\">Markdown conversion failed</p>\n";

/// Why a conversion produced the fallback fragment
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("markdown conversion panicked: {0}")]
    Panicked(String),
}

/// How a conversion went
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversionOutcome {
    #[default]
    Converted,
    /// An internal failure was caught and the fallback fragment was used
    ParseDegraded,
}

/// Result of [`parse`]: always carries publishable HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    pub html: String,
    pub outcome: ConversionOutcome,
}

/// Parser options: GFM tables, strikethrough, task lists and footnotes
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Convert markdown to an HTML fragment, never panicking.
///
/// Any panic raised while parsing or serializing is caught and reported as a
/// [`ParseError`].
pub fn markdown_to_html(markdown: &str) -> Result<String, ParseError> {
    render_guarded(markdown, render_fragment)
}

/// Convert markdown, substituting [`FALLBACK_HTML`] on failure
pub fn parse(markdown: &str) -> ParseOutput {
    parse_with(markdown, render_fragment)
}

/// [`parse`] with a caller-supplied render step
pub(crate) fn parse_with<F>(markdown: &str, render: F) -> ParseOutput
where
    F: FnOnce(&str) -> String,
{
    match render_guarded(markdown, render) {
        Ok(html) => ParseOutput {
            html,
            outcome: ConversionOutcome::Converted,
        },
        Err(e) => {
            tracing::error!("Markdown conversion failed: {}", e);
            ParseOutput {
                html: FALLBACK_HTML.to_string(),
                outcome: ConversionOutcome::ParseDegraded,
            }
        }
    }
}

fn render_guarded<F>(markdown: &str, render: F) -> Result<String, ParseError>
where
    F: FnOnce(&str) -> String,
{
    panic::catch_unwind(AssertUnwindSafe(|| render(markdown)))
        .map_err(|payload| ParseError::Panicked(panic_message(payload.as_ref())))
}

/// Text of a caught panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn render_fragment(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let events = rewrite_events(parser);

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

/// Apply line-break, sanitization and autolink rewrites to the event stream
fn rewrite_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    // Text is buffered because pulldown-cmark may split a URL across events
    let mut pending_text = String::new();
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in parser {
        if let Event::Text(text) = &event {
            pending_text.push_str(text);
            continue;
        }
        flush_text(
            &mut pending_text,
            link_depth == 0 && !in_code_block,
            &mut out,
        );

        match event {
            Event::SoftBreak => out.push(Event::HardBreak),
            Event::Start(Tag::HtmlBlock) => out.push(Event::Start(Tag::Paragraph)),
            Event::End(TagEnd::HtmlBlock) => out.push(Event::End(TagEnd::Paragraph)),
            Event::Html(raw) => {
                let raw = raw.trim_end_matches('\n');
                if !raw.is_empty() {
                    out.push(Event::Text(CowStr::from(raw.to_string())));
                    out.push(Event::HardBreak);
                }
            }
            Event::InlineHtml(raw) => out.push(Event::Text(raw)),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                link_depth += 1;
                out.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url: sanitize_url(dest_url),
                    title,
                    id,
                }));
            }
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                link_depth += 1;
                out.push(Event::Start(Tag::Image {
                    link_type,
                    dest_url: sanitize_url(dest_url),
                    title,
                    id,
                }));
            }
            Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                link_depth = link_depth.saturating_sub(1);
                out.push(event);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                out.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push(event);
            }
            other => out.push(other),
        }
    }
    flush_text(
        &mut pending_text,
        link_depth == 0 && !in_code_block,
        &mut out,
    );

    out
}

fn flush_text<'a>(pending: &mut String, autolink: bool, out: &mut Vec<Event<'a>>) {
    if pending.is_empty() {
        return;
    }
    let text = std::mem::take(pending);
    if autolink {
        push_autolinked(text, out);
    } else {
        out.push(Event::Text(CowStr::from(text)));
    }
}

/// Replace destinations that could execute script with `#`
fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        tracing::debug!("Neutralized unsafe link destination");
        CowStr::Borrowed("#")
    }
}

fn is_safe_url(url: &str) -> bool {
    // Browsers ignore embedded whitespace and control characters in schemes
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();

    if normalized.starts_with("data:") {
        return normalized.starts_with("data:image/");
    }
    !(normalized.starts_with("javascript:")
        || normalized.starts_with("vbscript:")
        || normalized.starts_with("file:"))
}

/// Split `text` into plain text and link events for bare URLs
fn push_autolinked<'a>(text: String, out: &mut Vec<Event<'a>>) {
    let urls = find_urls(&text);
    if urls.is_empty() {
        out.push(Event::Text(CowStr::from(text)));
        return;
    }

    let mut last = 0;
    for (start, end) in urls {
        if start > last {
            out.push(Event::Text(CowStr::from(text[last..start].to_string())));
        }
        let url = &text[start..end];
        let href = if url.starts_with("www.") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(href),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        out.push(Event::Text(CowStr::from(url.to_string())));
        out.push(Event::End(TagEnd::Link));
        last = end;
    }
    if last < text.len() {
        out.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

const URL_PREFIXES: &[&str] = &["https://", "http://", "www."];

/// Byte ranges of bare URLs in `text`
fn find_urls(text: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut search_from = 0;

    while search_from < text.len() {
        let rest = &text[search_from..];
        let Some((offset, prefix)) = URL_PREFIXES
            .iter()
            .filter_map(|p| rest.find(p).map(|i| (i, *p)))
            .min_by_key(|(i, _)| *i)
        else {
            break;
        };

        let start = search_from + offset;
        let at_boundary = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || matches!(c, '(' | '[' | '"' | '\''));

        let end = text[start..]
            .find(|c: char| c.is_whitespace() || c == '<' || c == '>')
            .map_or(text.len(), |i| start + i);
        let end = start
            + text[start..end]
                .trim_end_matches(['.', ',', ':', ';', '!', '?', ')', '\'', '"'])
                .len();

        if at_boundary && end > start + prefix.len() {
            found.push((start, end));
            search_from = end;
        } else {
            search_from = start + prefix.len();
        }
    }

    found
}
