use std::collections::VecDeque;

/// Most-recently-used list of raw commands in display form.
///
/// Entries are unique by exact string match; resubmitting an entry moves it
/// to the front instead of duplicating it.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: VecDeque<String>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_raw(&mut self, raw: &str) {
        if let Some(idx) = self.entries.iter().position(|e| e == raw) {
            self.entries.remove(idx);
        }
        self.entries.push_front(raw.to_string());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn front(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
