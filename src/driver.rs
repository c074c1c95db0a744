//! Effect layer around the reactor.
//!
//! The driver owns the control context: it is the only task that touches the
//! reactor. Classifications run as spawned tasks, dispatches on the blocking
//! pool, and both report back through the completion channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::classifier::{AsyncClassifier, Classifier};
use crate::dispatch::{DispatchError, Dispatcher};
use crate::kernel::cancel::CancellationRegistry;
use crate::kernel::event::{Event, InputEvent};
use crate::kernel::reactor::Reactor;
use crate::kernel::scheduler::SideEffect;
use crate::kernel::state::SessionSnapshot;
use crate::kernel::telemetry::metrics::TelemetrySnapshot;
use crate::outputs::Notice;

const CHANNEL_CAPACITY: usize = 100;

/// Handle used by the presentation layer to submit work.
#[derive(Clone)]
pub struct InputHandle {
    tx: mpsc::Sender<Event>,
}

impl InputHandle {
    pub async fn submit(&self, raw: &str) -> bool {
        self.tx
            .send(Event::Input(InputEvent::text("console", raw)))
            .await
            .is_ok()
    }

    pub async fn rerun(&self, index: usize) -> bool {
        self.tx.send(Event::Rerun(index)).await.is_ok()
    }
}

/// Final state handed back when the driver stops.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub session: SessionSnapshot,
    pub telemetry: TelemetrySnapshot,
}

pub struct Driver<C: Classifier> {
    reactor: Reactor,
    classifier: AsyncClassifier<C>,
    dispatcher: Dispatcher,
    cancels: CancellationRegistry,
    pending_dispatches: usize,
    inputs: mpsc::Receiver<Event>,
    completions_tx: mpsc::Sender<Event>,
    completions: mpsc::Receiver<Event>,
    notices: mpsc::Sender<Notice>,
}

impl<C: Classifier> Driver<C> {
    pub fn new(
        classifier: Arc<C>,
        dispatcher: Dispatcher,
        timeout: Duration,
        notices: mpsc::Sender<Notice>,
    ) -> (Self, InputHandle) {
        let (input_tx, inputs) = mpsc::channel(CHANNEL_CAPACITY);
        let (completions_tx, completions) = mpsc::channel(CHANNEL_CAPACITY);

        let driver = Self {
            reactor: Reactor::new(),
            classifier: AsyncClassifier::new(classifier, completions_tx.clone(), timeout),
            dispatcher,
            cancels: CancellationRegistry::new(),
            pending_dispatches: 0,
            inputs,
            completions_tx,
            completions,
            notices,
        };
        (driver, InputHandle { tx: input_tx })
    }

    /// Runs until every input handle is dropped and all in-flight work has
    /// reported back.
    pub async fn run(mut self) -> SessionReport {
        info!("Command pipeline started");
        let mut inputs_open = true;

        loop {
            if !inputs_open && self.cancels.is_empty() && self.pending_dispatches == 0 {
                break;
            }

            let event = tokio::select! {
                biased;
                Some(event) = self.completions.recv() => event,
                event = self.inputs.recv(), if inputs_open => match event {
                    Some(event) => event,
                    None => {
                        debug!("Input closed, draining in-flight work");
                        inputs_open = false;
                        continue;
                    }
                },
                else => break,
            };

            match &event {
                Event::Classified { ticket, .. } => self.cancels.complete(ticket.seq),
                Event::Dispatched { .. } => {
                    self.pending_dispatches = self.pending_dispatches.saturating_sub(1)
                }
                _ => {}
            }

            let effects = self.reactor.step(vec![event]);
            for effect in effects {
                self.execute(effect).await;
            }
        }

        info!("Command pipeline stopped");
        SessionReport {
            session: self.reactor.state.snapshot(),
            telemetry: self.reactor.telemetry.snapshot(),
        }
    }

    async fn execute(&mut self, effect: SideEffect) {
        match effect {
            SideEffect::CancelBefore(seq) => {
                let cancelled = self.cancels.cancel_before(seq);
                if cancelled > 0 {
                    debug!("Cancelled {} superseded classification(s)", cancelled);
                }
            }
            SideEffect::Classify(ticket) => {
                let token = self.cancels.issue(ticket.seq);
                self.classifier.dispatch(ticket, token);
            }
            SideEffect::Dispatch { seq, command } => {
                let dispatcher = self.dispatcher.clone();
                let tx = self.completions_tx.clone();
                self.pending_dispatches += 1;

                tokio::spawn(async move {
                    let intent = command.intent();
                    let result =
                        match tokio::task::spawn_blocking(move || dispatcher.dispatch(&command)).await {
                            Ok(result) => result,
                            Err(e) => Err(DispatchError::AutomationFailure(format!(
                                "dispatch task failed: {}",
                                e
                            ))),
                        };
                    if tx.send(Event::Dispatched { seq, intent, result }).await.is_err() {
                        debug!("Control loop gone, dropping dispatch result");
                    }
                });
            }
            SideEffect::Notify(notice) => {
                if self.notices.send(notice).await.is_err() {
                    warn!("Presentation layer dropped its notice receiver");
                }
            }
        }
    }
}
