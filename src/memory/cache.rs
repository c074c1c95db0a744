use crate::intent::ParsedCommand;
use std::collections::HashMap;

/// Memoized classifications keyed by normalized command text.
///
/// Entries are never evicted for the lifetime of the session.
pub trait CommandCache {
    fn lookup(&self, normalized: &str) -> Option<&ParsedCommand>;
    fn store(&mut self, normalized: &str, parsed: ParsedCommand);
    fn len(&self) -> usize;
    fn keys(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandCache {
    entries: HashMap<String, ParsedCommand>,
}

impl InMemoryCommandCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandCache for InMemoryCommandCache {
    fn lookup(&self, normalized: &str) -> Option<&ParsedCommand> {
        self.entries.get(normalized)
    }

    fn store(&mut self, normalized: &str, parsed: ParsedCommand) {
        self.entries.insert(normalized.to_string(), parsed);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_miss_is_none() {
        let cache = InMemoryCommandCache::new();
        assert!(cache.lookup("open spotify").is_none());
    }

    #[test]
    fn store_overwrites_existing_entry() {
        let mut cache = InMemoryCommandCache::new();
        cache.store("open spotify", ParsedCommand::unknown("open spotify"));
        let parsed = ParsedCommand::open_app("spotify").unwrap();
        cache.store("open spotify", parsed.clone());

        assert_eq!(cache.lookup("open spotify"), Some(&parsed));
        assert_eq!(cache.len(), 1);
    }
}
