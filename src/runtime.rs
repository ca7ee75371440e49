//! Headless runtime - executes commands and feeds results back through `update`
//!
//! Side effects run on short-lived worker threads. Each worker reports back with
//! exactly one message over an mpsc channel; messages are applied in arrival
//! order on the thread that owns the [`Runtime`].

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::config::PreviewConfig;
use crate::export::{self, ClipboardSink, SystemClipboard};
use crate::messages::{AppMsg, ExportMsg, Msg, PipelineMsg, SourceMsg};
use crate::model::AppModel;
use crate::pipeline::{self, SourceText};
use crate::update::update;

/// Upper bound on a single wait inside `run_until_idle`
const IDLE_POLL: Duration = Duration::from_millis(10);

type SharedClipboard = Arc<Mutex<Box<dyn ClipboardSink>>>;

pub struct Runtime {
    model: AppModel,
    clipboard: SharedClipboard,
    config_path: Option<PathBuf>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when a worker finishes, even by panicking
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Runtime {
    /// Runtime using the system clipboard and the default config file
    pub fn new(config: PreviewConfig) -> Self {
        Self::with_clipboard(config, Box::new(SystemClipboard))
    }

    pub fn with_clipboard(config: PreviewConfig, clipboard: Box<dyn ClipboardSink>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model: AppModel::new(config),
            clipboard: Arc::new(Mutex::new(clipboard)),
            config_path: crate::config_paths::config_file(),
            msg_tx,
            msg_rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Persist settings to `path` instead of the default config file
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn into_model(self) -> AppModel {
        self.model
    }

    /// Sender for messages produced outside the runtime
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Number of workers that have not reported back yet
    pub fn pending(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Apply a message and start whatever work it requests
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Replace the input text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::Source(SourceMsg::Changed(text.into())));
    }

    /// Convert the current text, e.g. the welcome document at startup
    pub fn refresh(&mut self) {
        self.dispatch(Msg::Source(SourceMsg::Refresh));
    }

    fn spawn_worker<F>(&self, work: F)
    where
        F: FnOnce() -> Msg + Send + 'static,
    {
        let tx = self.msg_tx.clone();
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        std::thread::spawn(move || {
            let _guard = guard;
            let msg = work();
            let _ = tx.send(msg);
        });
    }

    fn process_cmd(&self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            Cmd::RunConversion {
                revision,
                source,
                options,
            } => {
                self.spawn_worker(move || {
                    let document = pipeline::convert(&SourceText::new(revision, source), &options);
                    Msg::Pipeline(PipelineMsg::ConversionCompleted(Box::new(document)))
                });
            }

            Cmd::CopyToClipboard { html } => {
                let clipboard = Arc::clone(&self.clipboard);
                self.spawn_worker(move || {
                    let mut sink = clipboard.lock().unwrap_or_else(PoisonError::into_inner);
                    let result = export::copy_to_clipboard(&mut **sink, &html);
                    Msg::Export(ExportMsg::CopyCompleted(result))
                });
            }

            // =====================================================================
            // File Dialogs (using rfd)
            // =====================================================================
            Cmd::ShowSaveExportDialog { file_name } => {
                self.spawn_worker(move || {
                    let mut dlg = rfd::FileDialog::new()
                        .set_file_name(file_name)
                        .add_filter("HTML", &["html", "htm"]);
                    if let Some(dir) = crate::config_paths::default_export_dir() {
                        dlg = dlg.set_directory(dir);
                    }

                    let path = dlg.save_file();
                    Msg::Export(ExportMsg::DownloadPathChosen(path))
                });
            }

            Cmd::WriteExport { path, html, theme } => {
                self.spawn_worker(move || {
                    let result = export::download_as_file(&html, &theme, &path);
                    Msg::Export(ExportMsg::DownloadCompleted(result))
                });
            }

            Cmd::SaveConfig(config) => {
                let config_path = self.config_path.clone();
                self.spawn_worker(move || {
                    let result = match config_path {
                        Some(path) => config.save_to(&path),
                        None => Err("No config directory available".to_string()),
                    };
                    Msg::App(AppMsg::ConfigSaved(result))
                });
            }
        }
    }

    fn handle_async(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Apply every message that has arrived so far; returns whether any did
    pub fn process_async_messages(&mut self) -> bool {
        let mut processed = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.handle_async(msg);
            processed = true;
        }
        processed
    }

    /// Block until no worker is running and no message is queued.
    ///
    /// Returns false if `timeout` elapsed first.
    pub fn run_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_async_messages();
            if self.pending() == 0 {
                // Workers send before they count down, so their result is queued
                if !self.process_async_messages() && self.pending() == 0 {
                    return true;
                }
                continue;
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(
                    "Runtime still busy after {:?} ({} workers pending)",
                    timeout,
                    self.pending()
                );
                return false;
            }

            if let Ok(msg) = self.msg_rx.recv_timeout((deadline - now).min(IDLE_POLL)) {
                self.handle_async(msg);
            }
        }
    }
}
