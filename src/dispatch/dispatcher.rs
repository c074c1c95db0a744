use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::apps::AppDirectory;
use crate::automation::Automation;
use crate::intent::{IntentKind, ParsedCommand};
use crate::kernel::normalize::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no application named '{0}'")]
    TargetNotFound(String),
    #[error("automation failed: {0}")]
    AutomationFailure(String),
    #[error("unsupported command: {0}")]
    Unsupported(String),
}

/// Maps a parsed command to its side effect. Stateless; never touches the
/// session cache or history.
#[derive(Clone)]
pub struct Dispatcher {
    apps: Arc<AppDirectory>,
    automation: Arc<dyn Automation>,
}

impl Dispatcher {
    pub fn new(apps: Arc<AppDirectory>, automation: Arc<dyn Automation>) -> Self {
        Self { apps, automation }
    }

    /// Returns informational text for `info` commands, `None` otherwise.
    /// Failures are logged here and returned typed; nothing panics.
    pub fn dispatch(&self, parsed: &ParsedCommand) -> Result<Option<String>, DispatchError> {
        match parsed.intent() {
            IntentKind::OpenApp => {
                let key = normalize(parsed.target());
                let path = match self.apps.lookup(&key) {
                    Some(path) => path,
                    None => {
                        warn!("App '{}' not found in directory", parsed.target());
                        return Err(DispatchError::TargetNotFound(parsed.target().to_string()));
                    }
                };
                self.automation.open(path).map_err(|e| {
                    warn!("{}", e);
                    DispatchError::AutomationFailure(e.to_string())
                })?;
                Ok(None)
            }
            IntentKind::MediaControl(verb) => {
                self.automation.run(verb, parsed.target()).map_err(|e| {
                    warn!("Media control '{}' failed: {}", verb, e);
                    DispatchError::AutomationFailure(e.to_string())
                })?;
                Ok(None)
            }
            IntentKind::Search => {
                self.automation.search(parsed.target()).map_err(|e| {
                    warn!("{}", e);
                    DispatchError::AutomationFailure(e.to_string())
                })?;
                Ok(None)
            }
            IntentKind::Info => Ok(Some(parsed.target().to_string())),
            IntentKind::Unknown => {
                info!("No action for unknown command");
                Err(DispatchError::Unsupported(parsed.target().to_string()))
            }
        }
    }
}
