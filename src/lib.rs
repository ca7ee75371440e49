//! markview - live Markdown to HTML preview pipeline
//!
//! This crate converts Markdown into sanitized, syntax-highlighted HTML with
//! live statistics, and exports the result to the clipboard or a standalone
//! file. State changes follow the Elm Architecture pattern: messages go through
//! [`update`](update::update), side effects come back as [`Cmd`]s that the
//! [`Runtime`] executes.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod export;
pub mod markdown;
pub mod messages;
pub mod model;
pub mod pipeline;
pub mod runtime;
pub mod stats;
pub mod syntax;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::PreviewConfig;
pub use export::{ClipboardSink, ExportError, DEFAULT_EXPORT_FILENAME};
pub use messages::Msg;
pub use model::AppModel;
pub use pipeline::{convert, PipelineState, RenderedDocument, SourceText};
pub use runtime::Runtime;
pub use stats::DocumentStats;
