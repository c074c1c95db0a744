use thiserror::Error;

use crate::classifier::ClassifyError;
use crate::dispatch::DispatchError;
use crate::intent::IntentKind;
use crate::kernel::event::RequestSeq;

/// Typed failure surfaced to the presentation layer, which decides whether
/// to show it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("command not understood")]
    NotUnderstood,
}

/// Change notifications from the pipeline to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Full history, most recent first.
    History(Vec<String>),
    Info { seq: RequestSeq, text: String },
    Dispatched { seq: RequestSeq, intent: IntentKind },
    Failed { seq: RequestSeq, error: PipelineError },
}
