//! Source and conversion update handlers
//!
//! Every input change bumps the model's revision. Conversions run off the
//! update thread and report back tagged with the revision they started from;
//! only a result matching the current revision is published.

use crate::commands::Cmd;
use crate::messages::{PipelineMsg, SourceMsg};
use crate::model::AppModel;
use crate::pipeline::{PipelineState, RenderedDocument};

/// Handle input text messages
pub fn update_source(model: &mut AppModel, msg: SourceMsg) -> Option<Cmd> {
    match msg {
        SourceMsg::Changed(text) => {
            model.source.text = text;
            Some(schedule_conversion(model))
        }
        SourceMsg::Refresh => Some(schedule_conversion(model)),
    }
}

/// Bump the revision and start converting the current text
pub fn schedule_conversion(model: &mut AppModel) -> Cmd {
    model.source.revision += 1;
    let revision = model.source.revision;
    model.pipeline = PipelineState::Converting { revision };

    tracing::debug!(
        "Scheduling conversion for revision {} ({} bytes)",
        revision,
        model.source.text.len()
    );

    Cmd::RunConversion {
        revision,
        source: model.source.text.clone(),
        options: model.convert_options(),
    }
}

/// Handle conversion results
pub fn update_pipeline(model: &mut AppModel, msg: PipelineMsg) -> Option<Cmd> {
    match msg {
        PipelineMsg::ConversionCompleted(document) => {
            publish(model, *document);
            None
        }
    }
}

fn publish(model: &mut AppModel, document: RenderedDocument) {
    // Skip if the input has changed since this conversion started
    if document.revision != model.source.revision {
        tracing::debug!(
            "Discarding stale conversion: source revision {} != result revision {}",
            model.source.revision,
            document.revision
        );
        return;
    }

    if document.is_degraded() {
        tracing::warn!(
            "Publishing fallback output for revision {}",
            document.revision
        );
    }

    tracing::debug!(
        "Published revision {} ({} chars, {} words)",
        document.revision,
        document.char_count,
        document.word_count
    );

    model.pipeline = PipelineState::Published {
        revision: document.revision,
    };
    model.document = Some(document);
}
