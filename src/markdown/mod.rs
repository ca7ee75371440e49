//! Markdown conversion module
//!
//! Converts Markdown source into sanitized HTML fragments and provides the
//! styling used to display or export them.

mod features;
mod renderer;
mod theme;
mod welcome;

pub use features::{detect_features, MarkdownFeatures};
pub use renderer::{
    markdown_options, markdown_to_html, parse, ConversionOutcome, ParseError, ParseOutput,
    FALLBACK_HTML,
};
pub(crate) use renderer::{panic_message, parse_with};
pub use theme::{PreviewTheme, SyntaxColors, DARK_THEME_ID, LIGHT_THEME_ID};
pub use welcome::DEFAULT_MARKDOWN;
