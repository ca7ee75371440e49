//! Application model - the complete state of the live preview
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod notification;

pub use notification::{Notification, NotificationLevel, NOTIFICATION_DURATION};

use crate::config::PreviewConfig;
use crate::markdown::{PreviewTheme, DEFAULT_MARKDOWN};
use crate::pipeline::{ConvertOptions, PipelineState, RenderedDocument, SourceText};
use crate::stats::DocumentStats;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Current input; its revision tags all conversion work
    pub source: SourceText,
    /// Last published snapshot; only `update` assigns it
    pub document: Option<RenderedDocument>,
    pub pipeline: PipelineState,
    pub config: PreviewConfig,
    pub theme: PreviewTheme,
    pub notifications: Vec<Notification>,
}

impl AppModel {
    /// Create a model holding the welcome document at revision 0
    ///
    /// Nothing is converted yet; dispatch `SourceMsg::Refresh` to publish it.
    pub fn new(config: PreviewConfig) -> Self {
        let theme = PreviewTheme::from_id(&config.theme);
        Self {
            source: SourceText::new(0, DEFAULT_MARKDOWN),
            document: None,
            pipeline: PipelineState::Idle,
            config,
            theme,
            notifications: Vec::new(),
        }
    }

    /// Create a model with an explicit initial text
    pub fn with_text(config: PreviewConfig, text: impl Into<String>) -> Self {
        let mut model = Self::new(config);
        model.source.text = text.into();
        model
    }

    pub fn convert_options(&self) -> ConvertOptions {
        self.config.convert_options()
    }

    /// HTML of the published snapshot, empty before the first publication
    pub fn published_html(&self) -> &str {
        self.document.as_ref().map(|d| d.html.as_str()).unwrap_or("")
    }

    /// Statistics of the published snapshot
    pub fn published_stats(&self) -> DocumentStats {
        self.document
            .as_ref()
            .map(RenderedDocument::stats)
            .unwrap_or_default()
    }

    pub fn is_converting(&self) -> bool {
        matches!(self.pipeline, PipelineState::Converting { .. })
    }

    pub fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => tracing::info!("{}", notification.message),
            NotificationLevel::Error => tracing::warn!("{}", notification.message),
        }
        self.notifications.push(notification);
    }

    /// Drop expired notices
    pub fn prune_notifications(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(PreviewConfig::default())
    }
}
