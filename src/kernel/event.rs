use crate::classifier::ClassifyError;
use crate::dispatch::DispatchError;
use crate::intent::{ClassificationOutcome, IntentKind};
use serde::{Deserialize, Serialize};

/// Monotonic submission counter. Every accepted input gets the next value;
/// only results tagged with the latest value may touch the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RequestSeq(pub u64);

impl RequestSeq {
    pub fn next(&self) -> Self {
        RequestSeq(self.0 + 1)
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    /// Raw text from the presentation layer.
    Input(InputEvent),
    /// Re-submit the history entry at this index.
    Rerun(usize),
    Classified {
        ticket: ClassifyTicket,
        result: Result<ClassificationOutcome, ClassifyError>,
    },
    Dispatched {
        seq: RequestSeq,
        intent: IntentKind,
        result: Result<Option<String>, DispatchError>,
    },
}

#[derive(Debug, Clone)]
pub struct InputEvent {
    pub source: String,
    pub content: String,
}

impl InputEvent {
    pub fn text(source: &str, text: &str) -> Self {
        Self {
            source: source.to_string(),
            content: text.to_string(),
        }
    }
}

/// Identifies one in-flight classification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyTicket {
    pub seq: RequestSeq,
    /// Sent to the backend as-is.
    pub raw: String,
    /// Cache key the result is stored under.
    pub normalized: String,
}
