//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use markview::config::PreviewConfig;
use markview::export::{ClipboardSink, ExportError};
use markview::runtime::Runtime;

/// Generous upper bound for worker threads to report back
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Clipboard that records every payload it receives
#[derive(Clone, Default)]
pub struct RecordingClipboard {
    pub copied: Arc<Mutex<Vec<String>>>,
}

impl RecordingClipboard {
    pub fn last(&self) -> Option<String> {
        self.copied.lock().unwrap().last().cloned()
    }
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Clipboard that always fails with the given error kind
pub struct FailingClipboard {
    pub denied: bool,
}

impl ClipboardSink for FailingClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ExportError> {
        if self.denied {
            Err(ExportError::ClipboardDenied("blocked by test".to_string()))
        } else {
            Err(ExportError::ClipboardUnavailable("no display".to_string()))
        }
    }
}

/// Runtime with a recording clipboard and config writes kept inside `config_dir`
pub fn test_runtime(config_dir: &std::path::Path) -> (Runtime, RecordingClipboard) {
    let clipboard = RecordingClipboard::default();
    let runtime = Runtime::with_clipboard(PreviewConfig::default(), Box::new(clipboard.clone()))
        .with_config_path(config_dir.join("config.yaml"));
    (runtime, clipboard)
}

/// Runtime with `text` converted and published
pub fn published_runtime(config_dir: &std::path::Path, text: &str) -> (Runtime, RecordingClipboard) {
    let (mut runtime, clipboard) = test_runtime(config_dir);
    runtime.set_text(text);
    assert!(runtime.run_until_idle(IDLE_TIMEOUT), "conversion did not finish");
    (runtime, clipboard)
}
