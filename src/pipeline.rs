//! Conversion pipeline
//!
//! One conversion maps a revision-tagged [`SourceText`] to a complete
//! [`RenderedDocument`]: statistics from the raw text, then parse, then
//! highlight. Publication and stale-write rejection live in `update::pipeline`.
//!
//! ```text
//! SourceMsg::Changed → Cmd::RunConversion (revision N)
//!     → (worker thread) convert() → Msg::Pipeline(ConversionCompleted)
//!     → published only if N is still the current revision
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::time::SystemTime;

use crate::markdown::{self, ConversionOutcome, ParseOutput};
use crate::stats::{self, DocumentStats};
use crate::syntax;

/// The user's input at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    /// Bumped on every change; tags conversion work
    pub revision: u64,
    pub text: String,
}

impl SourceText {
    pub fn new(revision: u64, text: impl Into<String>) -> Self {
        Self {
            revision,
            text: text.into(),
        }
    }
}

/// Settings that affect conversion output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Run the highlighting pass over code blocks
    pub highlight_code: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            highlight_code: true,
        }
    }
}

/// Immutable snapshot produced by one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Revision of the SourceText this was generated from
    pub revision: u64,
    pub html: String,
    pub char_count: usize,
    pub word_count: usize,
    pub generated_at: SystemTime,
    pub outcome: ConversionOutcome,
}

impl RenderedDocument {
    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            chars: self.char_count,
            words: self.word_count,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.outcome == ConversionOutcome::ParseDegraded
    }
}

/// Where the pipeline is for the current revision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineState {
    #[default]
    Idle,
    Converting { revision: u64 },
    Published { revision: u64 },
}

/// Run one full conversion.
///
/// Statistics are computed from the raw text and do not depend on the parser;
/// a failed parse still yields correct counts next to the fallback fragment.
pub fn convert(source: &SourceText, options: &ConvertOptions) -> RenderedDocument {
    convert_with(source, options, markdown::parse, syntax::highlight_html)
}

fn convert_with<P, H>(
    source: &SourceText,
    options: &ConvertOptions,
    parse: P,
    highlight: H,
) -> RenderedDocument
where
    P: FnOnce(&str) -> ParseOutput,
    H: FnOnce(&str) -> String,
{
    let DocumentStats { chars, words } = stats::count(&source.text);

    let parsed = parse(&source.text);
    let html = if options.highlight_code && parsed.outcome == ConversionOutcome::Converted {
        highlight_or_plain(parsed.html, highlight)
    } else {
        parsed.html
    };

    tracing::trace!(
        "Converted revision {} ({} chars, {} words, {} bytes of HTML)",
        source.revision,
        chars,
        words,
        html.len()
    );

    RenderedDocument {
        revision: source.revision,
        html,
        char_count: chars,
        word_count: words,
        generated_at: SystemTime::now(),
        outcome: parsed.outcome,
    }
}

/// Highlight `html`, keeping it unstyled if the pass panics
fn highlight_or_plain<H>(html: String, highlight: H) -> String
where
    H: FnOnce(&str) -> String,
{
    match panic::catch_unwind(AssertUnwindSafe(|| highlight(&html))) {
        Ok(highlighted) => highlighted,
        Err(payload) => {
            tracing::error!(
                "Highlighting failed, publishing unstyled code: {}",
                markdown::panic_message(payload.as_ref())
            );
            html
        }
    }
}
