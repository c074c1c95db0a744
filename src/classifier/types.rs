use crate::intent::ClassificationOutcome;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Network failure, non-success status or timeout.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Body did not decode into the expected schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Turns raw user text into a classification outcome.
///
/// Implementations are expected to be deterministic for identical input so
/// the session cache can memoize their results.
pub trait Classifier: Send + Sync + 'static {
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<ClassificationOutcome, ClassifyError>> + Send;
}
