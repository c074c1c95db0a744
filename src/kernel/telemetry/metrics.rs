use std::collections::VecDeque;

use super::event::{FailureKind, TelemetryEvent};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub cache_stats: CacheStats,
    pub classification_stats: ClassificationStats,
    pub dispatch_stats: DispatchStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationStats {
    pub transport_failures: u64,
    pub malformed_responses: u64,
    pub not_understood: u64,
    pub stale_discarded: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchStats {
    pub dispatched: u64,
    pub target_not_found: u64,
    pub automation_failures: u64,
    pub unsupported: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::CacheHit { .. } => snap.cache_stats.hits += 1,
            TelemetryEvent::CacheMiss { .. } => snap.cache_stats.misses += 1,
            TelemetryEvent::StaleDiscarded { .. } => snap.classification_stats.stale_discarded += 1,
            TelemetryEvent::Dispatched { .. } => snap.dispatch_stats.dispatched += 1,
            TelemetryEvent::ClassificationFailed { kind, .. }
            | TelemetryEvent::DispatchFailed { kind, .. } => match kind {
                FailureKind::Transport => snap.classification_stats.transport_failures += 1,
                FailureKind::MalformedResponse => snap.classification_stats.malformed_responses += 1,
                FailureKind::NotUnderstood => snap.classification_stats.not_understood += 1,
                FailureKind::TargetNotFound => snap.dispatch_stats.target_not_found += 1,
                FailureKind::AutomationFailure => snap.dispatch_stats.automation_failures += 1,
                FailureKind::Unsupported => snap.dispatch_stats.unsupported += 1,
            },
        }
    }

    let lookups = snap.cache_stats.hits + snap.cache_stats.misses;
    if lookups > 0 {
        snap.cache_stats.hit_ratio = snap.cache_stats.hits as f64 / lookups as f64;
    }

    snap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentKind;
    use crate::kernel::event::RequestSeq;

    #[test]
    fn snapshot_counts_by_kind() {
        let events: VecDeque<TelemetryEvent> = vec![
            TelemetryEvent::CacheMiss { seq: RequestSeq(1) },
            TelemetryEvent::ClassificationFailed { seq: RequestSeq(1), kind: FailureKind::Transport },
            TelemetryEvent::CacheMiss { seq: RequestSeq(2) },
            TelemetryEvent::Dispatched { seq: RequestSeq(2), intent: IntentKind::OpenApp },
            TelemetryEvent::CacheHit { seq: RequestSeq(3) },
            TelemetryEvent::DispatchFailed { seq: RequestSeq(3), kind: FailureKind::TargetNotFound },
            TelemetryEvent::StaleDiscarded { seq: RequestSeq(4) },
        ]
        .into();

        let snap = compute_snapshot(&events);
        assert_eq!(snap.cache_stats.hits, 1);
        assert_eq!(snap.cache_stats.misses, 2);
        assert!((snap.cache_stats.hit_ratio - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(snap.classification_stats.transport_failures, 1);
        assert_eq!(snap.classification_stats.stale_discarded, 1);
        assert_eq!(snap.dispatch_stats.dispatched, 1);
        assert_eq!(snap.dispatch_stats.target_not_found, 1);
    }
}
