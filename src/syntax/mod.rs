//! Syntax highlighting module
//!
//! Provides tree-sitter based highlighting of code blocks in rendered HTML:
//! - Language resolution from fence tags, with content-based detection
//! - A process-wide, read-only registry of grammars and highlight queries
//! - An idempotent HTML → HTML pass that wraps tokens in `hl-*` spans
//!
//! ## Architecture
//!
//! ```text
//! <pre><code class="language-x"> → LanguageId::from_fence_tag / detect
//!     → LanguageRegistry::tokenize (tree-sitter query captures)
//!     → flatten_captures → <span class="hl-keyword">…</span>
//! ```

mod highlights;
mod html;
mod languages;
mod registry;

pub use highlights::{
    css_class, flatten_captures, highlight_id_for_name, HighlightId, HighlightToken,
    HIGHLIGHT_NAMES,
};
pub use html::{highlight_code, highlight_html};
pub use languages::LanguageId;
pub use registry::{registry, LanguageRegistry};
