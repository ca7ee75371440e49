//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::config::PreviewConfig;
use crate::markdown::PreviewTheme;
use crate::pipeline::ConvertOptions;

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    /// Convert `source` off the update thread, tagged with `revision`
    RunConversion {
        revision: u64,
        source: String,
        options: ConvertOptions,
    },

    /// Write an HTML fragment to the clipboard
    CopyToClipboard { html: String },
    /// Show native save dialog for the export file
    ShowSaveExportDialog { file_name: String },
    /// Write a standalone HTML document to `path`
    WriteExport {
        path: PathBuf,
        html: String,
        theme: PreviewTheme,
    },

    /// Persist the configuration
    SaveConfig(PreviewConfig),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Whether this command spawns work that reports back with a message
    pub fn is_async(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_async),
            Cmd::RunConversion { .. }
            | Cmd::CopyToClipboard { .. }
            | Cmd::ShowSaveExportDialog { .. }
            | Cmd::WriteExport { .. }
            | Cmd::SaveConfig(_) => true,
        }
    }

    /// Convert Option<Cmd> with None to Cmd::None
    pub fn from_option(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
