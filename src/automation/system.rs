use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use super::{media_script, Automation, AutomationError, OpenError};
use crate::intent::MediaVerb;

/// Real automation: `osascript` for media verbs, the platform opener for
/// bundles and URLs.
#[derive(Debug, Clone)]
pub struct SystemAutomation {
    search_url: String,
}

impl SystemAutomation {
    pub fn new(search_url: &str) -> Self {
        Self {
            search_url: search_url.to_string(),
        }
    }

    pub fn search_link(&self, query: &str) -> Result<String, OpenError> {
        reqwest::Url::parse_with_params(&self.search_url, &[("q", query)])
            .map(String::from)
            .map_err(|e| OpenError {
                target: self.search_url.clone(),
                reason: e.to_string(),
            })
    }
}

impl Automation for SystemAutomation {
    fn run(&self, verb: MediaVerb, app: &str) -> Result<(), AutomationError> {
        let script = media_script(verb, app);
        debug!("osascript -e '{}'", script);

        let output = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output()
            .map_err(|e| AutomationError::Spawn(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AutomationError::Script(if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            }));
        }
        info!("Sent {} to {}", verb, app);
        Ok(())
    }

    fn open(&self, path: &Path) -> Result<(), OpenError> {
        open::that(path).map_err(|e| OpenError {
            target: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!("Opened {}", path.display());
        Ok(())
    }

    fn search(&self, query: &str) -> Result<(), OpenError> {
        let link = self.search_link(query)?;
        open::that(&link).map_err(|e| OpenError {
            target: link.clone(),
            reason: e.to_string(),
        })?;
        info!("Opened web search");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_link_encodes_query() {
        let automation = SystemAutomation::new("https://www.google.com/search");
        assert_eq!(
            automation.search_link("rust & tokio").unwrap(),
            "https://www.google.com/search?q=rust+%26+tokio"
        );
    }

    #[test]
    fn bad_search_base_is_an_open_error() {
        let automation = SystemAutomation::new("not a url");
        assert!(automation.search_link("x").is_err());
    }
}
