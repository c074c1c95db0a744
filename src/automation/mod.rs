//! OS automation collaborator: media transport verbs, launching bundles and
//! opening web searches.

pub mod system;

use std::path::Path;
use thiserror::Error;

use crate::intent::MediaVerb;

pub use system::SystemAutomation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomationError {
    #[error("could not run automation script: {0}")]
    Spawn(String),
    #[error("automation script failed: {0}")]
    Script(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not open '{target}': {reason}")]
pub struct OpenError {
    pub target: String,
    pub reason: String,
}

/// Side effects the dispatcher may trigger. Calls block; callers keep them
/// off latency-sensitive threads.
pub trait Automation: Send + Sync {
    fn run(&self, verb: MediaVerb, app: &str) -> Result<(), AutomationError>;
    fn open(&self, path: &Path) -> Result<(), OpenError>;
    fn search(&self, query: &str) -> Result<(), OpenError>;
}

/// AppleScript for a media verb against `app`.
pub fn media_script(verb: MediaVerb, app: &str) -> String {
    let command = match verb {
        MediaVerb::Play => "play",
        MediaVerb::Pause => "pause",
        MediaVerb::Next => "next track",
    };
    format!(
        "tell application \"{}\" to {}",
        app.replace('\\', "\\\\").replace('"', "\\\""),
        command
    )
}
