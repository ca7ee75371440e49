//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::export::ExportError;
use crate::pipeline::RenderedDocument;

/// Input text messages
#[derive(Debug, Clone)]
pub enum SourceMsg {
    /// Replace the whole input; bumps the revision and starts a conversion
    Changed(String),
    /// Reconvert the current text under a new revision
    Refresh,
}

/// Conversion pipeline messages
#[derive(Debug)]
pub enum PipelineMsg {
    /// A worker finished converting the revision carried by the document
    ConversionCompleted(Box<RenderedDocument>),
}

/// Export messages
#[derive(Debug)]
pub enum ExportMsg {
    /// Copy the published HTML fragment to the clipboard
    CopyHtml,
    /// Clipboard write finished
    CopyCompleted(Result<(), ExportError>),
    /// Open the native save dialog for a download
    ChooseDownloadPath,
    /// Save dialog closed (None = cancelled)
    DownloadPathChosen(Option<PathBuf>),
    /// Write the published document to a known path
    DownloadTo(PathBuf),
    /// File write finished
    DownloadCompleted(Result<PathBuf, ExportError>),
}

/// Application-level messages
#[derive(Debug)]
pub enum AppMsg {
    /// Switch preview theme by id and persist it
    SetTheme(String),
    /// Toggle the highlighting pass and persist it
    SetHighlightCode(bool),
    /// Config write finished
    ConfigSaved(Result<(), String>),
    /// Clear all notifications
    DismissNotifications,
}

/// Top-level message type
#[derive(Debug)]
pub enum Msg {
    Source(SourceMsg),
    Pipeline(PipelineMsg),
    Export(ExportMsg),
    App(AppMsg),
}
