use tracing::{debug, info, warn};

use super::event::{ClassifyTicket, Event, RequestSeq};
use super::normalize::normalize;
use super::scheduler::{Scheduler, SideEffect};
use super::state::{SessionState, StateDelta};
use super::telemetry::event::{FailureKind, TelemetryEvent};
use super::telemetry::recorder::TelemetryRecorder;
use crate::classifier::ClassifyError;
use crate::dispatch::DispatchError;
use crate::intent::{ClassificationOutcome, IntentKind};
use crate::memory::CommandCache;
use crate::outputs::{Notice, PipelineError};

/// Single owner of the session state.
///
/// Every method is synchronous and performs no I/O: inputs and completions
/// go in, side effects come out for the driver to execute.
pub struct Reactor {
    pub state: SessionState,
    pub scheduler: Scheduler,
    pub telemetry: TelemetryRecorder,
}

impl Default for Reactor {
    fn default() -> Self {
        Self::new()
    }
}

impl Reactor {
    pub fn new() -> Self {
        Self {
            state: SessionState::new(),
            scheduler: Scheduler,
            telemetry: TelemetryRecorder::new(),
        }
    }

    /// Processes a batch of events in arrival order.
    pub fn step(&mut self, events: Vec<Event>) -> Vec<SideEffect> {
        let mut effects = Vec::new();
        for event in events {
            let produced = match event {
                Event::Input(input) => {
                    debug!("Input from {}", input.source);
                    self.handle_input(&input.content)
                }
                Event::Rerun(index) => self.rerun(index),
                Event::Classified { ticket, result } => self.on_classified(ticket, result),
                Event::Dispatched { seq, intent, result } => self.on_dispatched(seq, intent, result),
            };
            effects.extend(produced);
        }
        effects
    }

    /// Entry point for a submitted command.
    ///
    /// History is updated before classification, so the raw text stays
    /// recorded whether or not classification succeeds.
    pub fn handle_input(&mut self, raw: &str) -> Vec<SideEffect> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Vec::new();
        }

        let seq = self.state.latest_seq().next();
        self.state.reduce(StateDelta::RequestIssued(seq));
        self.state.reduce(StateDelta::InfoCleared);
        self.state.reduce(StateDelta::InputRecorded { raw: raw.to_string() });

        let mut effects = vec![
            SideEffect::CancelBefore(seq),
            SideEffect::Notify(Notice::History(self.state.history().to_vec())),
        ];

        match self.state.cache().lookup(&normalized) {
            Some(command) => {
                debug!("Cache hit for {:?}", seq);
                self.telemetry.record(TelemetryEvent::CacheHit { seq });
                effects.push(SideEffect::Dispatch {
                    seq,
                    command: command.clone(),
                });
            }
            None => {
                debug!("Cache miss for {:?}, classifying", seq);
                self.telemetry.record(TelemetryEvent::CacheMiss { seq });
                effects.push(SideEffect::Classify(ClassifyTicket {
                    seq,
                    raw: raw.to_string(),
                    normalized,
                }));
            }
        }

        effects
    }

    /// Re-submits a history entry (0 = most recent).
    pub fn rerun(&mut self, index: usize) -> Vec<SideEffect> {
        match self.state.history().get(index).map(str::to_string) {
            Some(raw) => self.handle_input(&raw),
            None => {
                debug!("No history entry at {}", index);
                Vec::new()
            }
        }
    }

    pub fn on_classified(
        &mut self,
        ticket: ClassifyTicket,
        result: Result<ClassificationOutcome, ClassifyError>,
    ) -> Vec<SideEffect> {
        if !self.state.is_current(ticket.seq) {
            info!(
                "Discarded stale classification {:?} (latest {:?})",
                ticket.seq,
                self.state.latest_seq()
            );
            self.telemetry.record(TelemetryEvent::StaleDiscarded { seq: ticket.seq });
            return Vec::new();
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Classification {:?} failed: {}", ticket.seq, e);
                self.telemetry.record(TelemetryEvent::ClassificationFailed {
                    seq: ticket.seq,
                    kind: FailureKind::from(&e),
                });
                return vec![SideEffect::Notify(Notice::Failed {
                    seq: ticket.seq,
                    error: e.into(),
                })];
            }
        };

        let (deltas, effects) = self.scheduler.schedule(&ticket, outcome);
        for delta in deltas {
            self.state.reduce(delta);
        }
        for effect in &effects {
            if let SideEffect::Notify(Notice::Failed { error, .. }) = effect {
                self.telemetry.record(TelemetryEvent::ClassificationFailed {
                    seq: ticket.seq,
                    kind: FailureKind::from(error),
                });
            }
        }
        effects
    }

    pub fn on_dispatched(
        &mut self,
        seq: RequestSeq,
        intent: IntentKind,
        result: Result<Option<String>, DispatchError>,
    ) -> Vec<SideEffect> {
        match &result {
            Ok(_) => self.telemetry.record(TelemetryEvent::Dispatched { seq, intent }),
            Err(e) => self.telemetry.record(TelemetryEvent::DispatchFailed {
                seq,
                kind: FailureKind::from(e),
            }),
        }

        if !self.state.is_current(seq) {
            info!("Suppressing result of superseded dispatch {:?}", seq);
            self.telemetry.record(TelemetryEvent::StaleDiscarded { seq });
            return Vec::new();
        }

        let notice = match result {
            Ok(Some(text)) => {
                self.state.reduce(StateDelta::InfoShown {
                    seq,
                    text: text.clone(),
                });
                Notice::Info { seq, text }
            }
            Ok(None) => Notice::Dispatched { seq, intent },
            Err(e) => Notice::Failed {
                seq,
                error: PipelineError::Dispatch(e),
            },
        };
        vec![SideEffect::Notify(notice)]
    }
}
