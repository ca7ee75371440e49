//! App message handlers (theme, settings, notifications)

use crate::commands::Cmd;
use crate::markdown::PreviewTheme;
use crate::messages::AppMsg;
use crate::model::{AppModel, Notification};

use super::pipeline::schedule_conversion;

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::SetTheme(theme_id) => {
            let theme = PreviewTheme::from_id(&theme_id);
            tracing::info!("Switching preview theme to {}", theme.id);
            model.config.theme = theme.id.to_string();
            model.theme = theme;
            Some(Cmd::SaveConfig(model.config.clone()))
        }

        AppMsg::SetHighlightCode(enabled) => {
            if model.config.highlight_code == enabled {
                return None;
            }
            model.config.highlight_code = enabled;
            Some(Cmd::batch(vec![
                Cmd::SaveConfig(model.config.clone()),
                schedule_conversion(model),
            ]))
        }

        AppMsg::ConfigSaved(result) => {
            if let Err(e) = result {
                model.notify(Notification::error(format!(
                    "Failed to save settings: {}",
                    e
                )));
            }
            None
        }

        AppMsg::DismissNotifications => {
            model.notifications.clear();
            None
        }
    }
}
