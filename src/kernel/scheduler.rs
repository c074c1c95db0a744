use tracing::debug;

use super::event::{ClassifyTicket, RequestSeq};
use super::state::StateDelta;
use crate::intent::{ClassificationOutcome, ParsedCommand};
use crate::outputs::notice::{Notice, PipelineError};

pub struct Scheduler;

/// Work the reactor hands to the effect layer. The reactor never performs
/// I/O itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    /// Cancel every in-flight classification older than this sequence.
    CancelBefore(RequestSeq),
    Classify(ClassifyTicket),
    Dispatch { seq: RequestSeq, command: ParsedCommand },
    Notify(Notice),
}

impl Scheduler {
    /// Pure projection: classification outcome -> (deltas, effects).
    ///
    /// Only the first action is memoized and dispatched; answers are shown
    /// and never cached.
    pub fn schedule(
        &self,
        ticket: &ClassifyTicket,
        outcome: ClassificationOutcome,
    ) -> (Vec<StateDelta>, Vec<SideEffect>) {
        match outcome {
            ClassificationOutcome::Answer(text) => (
                vec![StateDelta::InfoShown {
                    seq: ticket.seq,
                    text: text.clone(),
                }],
                vec![SideEffect::Notify(Notice::Info {
                    seq: ticket.seq,
                    text,
                })],
            ),
            ClassificationOutcome::Actions(list) => {
                let mut list = list.into_iter();
                let command = match list.next() {
                    Some(command) => command,
                    None => {
                        return (
                            Vec::new(),
                            vec![SideEffect::Notify(Notice::Failed {
                                seq: ticket.seq,
                                error: PipelineError::NotUnderstood,
                            })],
                        )
                    }
                };
                let skipped = list.count();
                if skipped > 0 {
                    debug!("Ignoring {} additional action(s) for {:?}", skipped, ticket.seq);
                }

                (
                    vec![StateDelta::Memoized {
                        normalized: ticket.normalized.clone(),
                        command: command.clone(),
                    }],
                    vec![SideEffect::Dispatch {
                        seq: ticket.seq,
                        command,
                    }],
                )
            }
        }
    }
}
