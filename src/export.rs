//! HTML export: clipboard copy and standalone file download

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::markdown::PreviewTheme;

/// File name suggested for downloads
pub const DEFAULT_EXPORT_FILENAME: &str = "markview-export.html";

/// MIME type of exported documents
pub const EXPORT_MIME_TYPE: &str = "text/html";

/// Export failures, surfaced to the user as notifications
#[derive(Debug, Error)]
pub enum ExportError {
    /// The platform refused access to the clipboard
    #[error("clipboard access denied: {0}")]
    ClipboardDenied(String),
    /// No clipboard, or it failed for an unknown reason
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    #[error("failed to write {}: {source}", path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn is_permission_denied(&self) -> bool {
        match self {
            ExportError::ClipboardDenied(_) => true,
            ExportError::ClipboardUnavailable(_) => false,
            ExportError::ExportIo { source, .. } => {
                source.kind() == std::io::ErrorKind::PermissionDenied
            }
        }
    }
}

/// Destination for copied HTML
pub trait ClipboardSink: Send {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// The system clipboard via arboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        let mut clipboard = arboard::Clipboard::new().map_err(classify_clipboard_error)?;
        clipboard
            .set_text(text.to_owned())
            .map_err(classify_clipboard_error)
    }
}

fn classify_clipboard_error(err: arboard::Error) -> ExportError {
    match err {
        arboard::Error::Unknown { ref description }
            if description.to_lowercase().contains("denied")
                || description.to_lowercase().contains("permission") =>
        {
            ExportError::ClipboardDenied(err.to_string())
        }
        other => ExportError::ClipboardUnavailable(other.to_string()),
    }
}

/// Copy the HTML fragment to `sink`
pub fn copy_to_clipboard(sink: &mut dyn ClipboardSink, html: &str) -> Result<(), ExportError> {
    match sink.set_text(html) {
        Ok(()) => {
            tracing::info!("Copied {} bytes of HTML to clipboard", html.len());
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {}", e);
            Err(e)
        }
    }
}

/// Wrap an HTML fragment in a self-contained UTF-8 document with inline styles
pub fn standalone_document(html: &str, theme: &PreviewTheme) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>MarkView Export</title>
    <style>{}</style>
</head>
<body>
    <div id="content">
{}
    </div>
</body>
</html>
"#,
        theme.stylesheet(),
        html
    )
}

/// Write `html` as a standalone document to `path`, returning the path written
pub fn download_as_file(
    html: &str,
    theme: &PreviewTheme,
    path: &Path,
) -> Result<PathBuf, ExportError> {
    let document = standalone_document(html, theme);
    std::fs::write(path, document).map_err(|source| {
        tracing::warn!("Export to {} failed: {}", path.display(), source);
        ExportError::ExportIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::info!("Exported HTML to {}", path.display());
    Ok(path.to_path_buf())
}
