use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::classifier::types::{Classifier, ClassifyError};
use crate::kernel::event::{ClassifyTicket, Event};

pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Runs classifications off the control context and posts the results back
/// as `Event::Classified`.
pub struct AsyncClassifier<C: Classifier> {
    classifier: Arc<C>,
    tx: mpsc::Sender<Event>,
    timeout: Duration,
}

impl<C: Classifier> AsyncClassifier<C> {
    pub fn new(classifier: Arc<C>, tx: mpsc::Sender<Event>, timeout: Duration) -> Self {
        Self {
            classifier,
            tx,
            timeout,
        }
    }

    /// Spawns the request. A cancelled request never reports back.
    pub fn dispatch(&self, ticket: ClassifyTicket, token: CancellationToken) {
        let classifier = self.classifier.clone();
        let tx = self.tx.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            let request = tokio::time::timeout(timeout, classifier.classify(&ticket.raw));

            let result = tokio::select! {
                _ = token.cancelled() => {
                    debug!("Classification {:?} cancelled", ticket.seq);
                    return;
                }
                outcome = request => match outcome {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("Classification {:?} timed out after {:?}", ticket.seq, timeout);
                        Err(ClassifyError::Transport(format!("timed out after {:?}", timeout)))
                    }
                },
            };

            if let Err(e) = tx.send(Event::Classified { ticket, result }).await {
                debug!("Control loop gone, dropping classification: {}", e);
            }
        });
    }
}
