//! Pipeline telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer. It is never read inside
//! decision logic (reactor, scheduler or dispatcher).
//!
//! # PRIVACY INVARIANT
//! Events never contain user text. Only sequence numbers, intent kinds and
//! failure kinds are recorded.

pub mod event;
pub mod metrics;
pub mod recorder;
