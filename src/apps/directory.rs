use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const APP_SUFFIX: &str = ".app";

/// Scans each search path (non-recursively) for application bundles.
///
/// Keys are lowercased bundle names without the suffix. Unreadable
/// directories are skipped. Later paths win on name collisions.
pub fn list_apps(search_paths: &[PathBuf]) -> HashMap<String, PathBuf> {
    let mut apps = HashMap::new();

    for dir in search_paths {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping app directory {}: {}", dir.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(APP_SUFFIX) {
                if stem.is_empty() {
                    continue;
                }
                apps.insert(stem.to_lowercase(), dir.join(&file_name));
            }
        }
    }

    debug!("Found {} applications", apps.len());
    apps
}

/// Immutable name -> path snapshot taken once at startup.
#[derive(Debug, Clone, Default)]
pub struct AppDirectory {
    apps: HashMap<String, PathBuf>,
}

impl AppDirectory {
    pub fn scan(search_paths: &[PathBuf]) -> Self {
        Self {
            apps: list_apps(search_paths),
        }
    }

    pub fn from_entries<I, K, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<PathBuf>,
    {
        Self {
            apps: entries
                .into_iter()
                .map(|(k, p)| (k.as_ref().to_lowercase(), p.into()))
                .collect(),
        }
    }

    /// `name` must already be lowercased.
    pub fn lookup(&self, name: &str) -> Option<&Path> {
        self.apps.get(name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// "Open <Name>" suggestions for every app whose key contains `partial`.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        let partial = partial.trim().to_lowercase();
        if partial.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<String> = self
            .apps
            .keys()
            .filter(|name| name.contains(&partial))
            .map(|name| format!("Open {}", capitalize_words(name)))
            .collect();
        matches.sort();
        matches
    }
}

fn capitalize_words(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
