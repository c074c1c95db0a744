use serde::{Deserialize, Serialize};

use crate::classifier::ClassifyError;
use crate::dispatch::DispatchError;
use crate::intent::IntentKind;
use crate::kernel::event::RequestSeq;
use crate::outputs::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    CacheHit { seq: RequestSeq },
    CacheMiss { seq: RequestSeq },
    ClassificationFailed { seq: RequestSeq, kind: FailureKind },
    /// A result arrived for a superseded request and was dropped.
    StaleDiscarded { seq: RequestSeq },
    Dispatched { seq: RequestSeq, intent: IntentKind },
    DispatchFailed { seq: RequestSeq, kind: FailureKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Transport,
    MalformedResponse,
    NotUnderstood,
    TargetNotFound,
    AutomationFailure,
    Unsupported,
}

impl From<&ClassifyError> for FailureKind {
    fn from(err: &ClassifyError) -> Self {
        match err {
            ClassifyError::Transport(_) => FailureKind::Transport,
            ClassifyError::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }
}

impl From<&DispatchError> for FailureKind {
    fn from(err: &DispatchError) -> Self {
        match err {
            DispatchError::TargetNotFound(_) => FailureKind::TargetNotFound,
            DispatchError::AutomationFailure(_) => FailureKind::AutomationFailure,
            DispatchError::Unsupported(_) => FailureKind::Unsupported,
        }
    }
}

impl From<&PipelineError> for FailureKind {
    fn from(err: &PipelineError) -> Self {
        match err {
            PipelineError::Classify(e) => e.into(),
            PipelineError::Dispatch(e) => e.into(),
            PipelineError::NotUnderstood => FailureKind::NotUnderstood,
        }
    }
}
