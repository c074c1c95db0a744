use crate::intent::ParsedCommand;
use crate::kernel::event::RequestSeq;
use crate::memory::{CommandCache, CommandHistory, InMemoryCommandCache};

/// Strict state delta. This is the ONLY way session state mutates.
#[derive(Debug, Clone)]
pub enum StateDelta {
    /// A new submission was accepted under this sequence number.
    RequestIssued(RequestSeq),
    InputRecorded { raw: String },
    Memoized { normalized: String, command: ParsedCommand },
    InfoShown { seq: RequestSeq, text: String },
    InfoCleared,
}

/// Process-wide session state, owned by the reactor. Discarded at exit.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    history: CommandHistory,
    cache: InMemoryCommandCache,
    info: Option<String>,
    latest: RequestSeq,
    version: u64,
}

/// Owned read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub history: Vec<String>,
    pub info: Option<String>,
    pub cached_keys: Vec<String>,
    pub latest: RequestSeq,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&mut self, delta: StateDelta) {
        self.version += 1;

        match delta {
            StateDelta::RequestIssued(seq) => {
                debug_assert!(seq > self.latest, "sequence numbers must increase");
                self.latest = seq;
            }
            StateDelta::InputRecorded { raw } => {
                self.history.record_raw(&raw);
            }
            StateDelta::Memoized { normalized, command } => {
                self.cache.store(&normalized, command);
            }
            StateDelta::InfoShown { seq, text } => {
                // Stale results never reach the display.
                if seq == self.latest {
                    self.info = Some(text);
                }
            }
            StateDelta::InfoCleared => {
                self.info = None;
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            history: self.history.to_vec(),
            info: self.info.clone(),
            cached_keys: self.cache.keys(),
            latest: self.latest,
        }
    }

    /// Bumped on every reduction.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_current(&self, seq: RequestSeq) -> bool {
        seq == self.latest
    }

    pub fn latest_seq(&self) -> RequestSeq {
        self.latest
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn cache(&self) -> &InMemoryCommandCache {
        &self.cache
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }
}
