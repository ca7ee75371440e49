//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod export;
mod pipeline;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

pub use app::update_app;
pub use export::update_export;
pub use pipeline::{schedule_conversion, update_pipeline, update_source};

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Source(m) => update_source(model, m),
        Msg::Pipeline(m) => update_pipeline(model, m),
        Msg::Export(m) => update_export(model, m),
        Msg::App(m) => update_app(model, m),
    };

    model.prune_notifications();

    result
}
