//! Export message handlers (clipboard copy, file download)

use crate::commands::Cmd;
use crate::messages::ExportMsg;
use crate::model::{AppModel, Notification};

/// Handle export messages
pub fn update_export(model: &mut AppModel, msg: ExportMsg) -> Option<Cmd> {
    match msg {
        ExportMsg::CopyHtml => {
            let Some(document) = &model.document else {
                model.notify(Notification::error("Nothing to copy yet"));
                return None;
            };
            Some(Cmd::CopyToClipboard {
                html: document.html.clone(),
            })
        }

        ExportMsg::CopyCompleted(result) => {
            match result {
                Ok(()) => model.notify(Notification::info("HTML copied to clipboard")),
                Err(e) => model.notify(Notification::error(format!("Copy failed: {}", e))),
            }
            None
        }

        ExportMsg::ChooseDownloadPath => {
            if model.document.is_none() {
                model.notify(Notification::error("Nothing to export yet"));
                return None;
            }
            Some(Cmd::ShowSaveExportDialog {
                file_name: model.config.export_file_name.clone(),
            })
        }

        ExportMsg::DownloadPathChosen(None) => {
            tracing::debug!("Export dialog cancelled");
            None
        }

        ExportMsg::DownloadPathChosen(Some(path)) | ExportMsg::DownloadTo(path) => {
            let Some(document) = &model.document else {
                model.notify(Notification::error("Nothing to export yet"));
                return None;
            };
            Some(Cmd::WriteExport {
                path,
                html: document.html.clone(),
                theme: model.theme.clone(),
            })
        }

        ExportMsg::DownloadCompleted(result) => {
            match result {
                Ok(path) => {
                    model.notify(Notification::info(format!("Saved {}", path.display())))
                }
                Err(e) => model.notify(Notification::error(format!("Export failed: {}", e))),
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::PreviewConfig;
    use crate::export::ExportError;
    use crate::model::NotificationLevel;
    use crate::pipeline::{convert, ConvertOptions};

    fn published_model() -> AppModel {
        let mut model = AppModel::with_text(PreviewConfig::default(), "# Hi");
        let doc = convert(&model.source, &ConvertOptions::default());
        model.document = Some(doc);
        model
    }

    #[test]
    fn test_copy_without_document_notifies() {
        let mut model = AppModel::default();
        assert!(update_export(&mut model, ExportMsg::CopyHtml).is_none());
        assert_eq!(model.notifications.len(), 1);
        assert!(model.notifications[0].is_error());
    }

    #[test]
    fn test_copy_uses_published_html() {
        let mut model = published_model();
        match update_export(&mut model, ExportMsg::CopyHtml) {
            Some(Cmd::CopyToClipboard { html }) => assert!(html.contains("<h1>Hi</h1>")),
            other => panic!("expected CopyToClipboard, got {:?}", other),
        }
    }

    #[test]
    fn test_copy_failure_becomes_error_notification() {
        let mut model = published_model();
        update_export(
            &mut model,
            ExportMsg::CopyCompleted(Err(ExportError::ClipboardDenied("nope".to_string()))),
        );
        let n = &model.notifications[0];
        assert_eq!(n.level, NotificationLevel::Error);
        assert!(n.message.contains("denied"));
    }

    #[test]
    fn test_dialog_uses_configured_name() {
        let mut model = published_model();
        model.config.export_file_name = "notes.html".to_string();
        assert!(matches!(
            update_export(&mut model, ExportMsg::ChooseDownloadPath),
            Some(Cmd::ShowSaveExportDialog { ref file_name }) if file_name == "notes.html"
        ));
    }

    #[test]
    fn test_cancelled_dialog_does_nothing() {
        let mut model = published_model();
        assert!(update_export(&mut model, ExportMsg::DownloadPathChosen(None)).is_none());
        assert!(model.notifications.is_empty());
    }

    #[test]
    fn test_chosen_path_writes_export() {
        let mut model = published_model();
        let path = PathBuf::from("/tmp/out.html");
        match update_export(&mut model, ExportMsg::DownloadPathChosen(Some(path.clone()))) {
            Some(Cmd::WriteExport {
                path: target, html, ..
            }) => {
                assert_eq!(target, path);
                assert!(html.contains("<h1>Hi</h1>"));
            }
            other => panic!("expected WriteExport, got {:?}", other),
        }
    }

    #[test]
    fn test_download_success_notifies() {
        let mut model = published_model();
        update_export(
            &mut model,
            ExportMsg::DownloadCompleted(Ok(PathBuf::from("markview-export.html"))),
        );
        assert_eq!(model.notifications[0].level, NotificationLevel::Info);
        assert!(model.notifications[0]
            .message
            .contains("markview-export.html"));
    }
}
