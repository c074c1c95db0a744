/// Canonical cache-key form of a raw command: trimmed, lowercased.
///
/// Pure and idempotent. History keeps the raw display form; only the cache
/// is keyed by this projection.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
