use super::event::RequestSeq;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;

/// Tokens for in-flight classifications, keyed by request sequence.
///
/// Lives in the effect layer; the reactor only decides *when* to cancel.
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    in_flight: BTreeMap<RequestSeq, CancellationToken>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, seq: RequestSeq) -> CancellationToken {
        let token = CancellationToken::new();
        self.in_flight.insert(seq, token.clone());
        token
    }

    /// Cancels and forgets every request older than `seq`. Returns how many
    /// were cancelled.
    pub fn cancel_before(&mut self, seq: RequestSeq) -> usize {
        let newer = self.in_flight.split_off(&seq);
        let stale = std::mem::replace(&mut self.in_flight, newer);
        for token in stale.values() {
            token.cancel();
        }
        stale.len()
    }

    pub fn complete(&mut self, seq: RequestSeq) {
        self.in_flight.remove(&seq);
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}
