#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use spotlight::apps::AppDirectory;
use spotlight::automation::{Automation, AutomationError, OpenError};
use spotlight::classifier::{Classifier, ClassifyError};
use spotlight::dispatch::Dispatcher;
use spotlight::intent::{ClassificationOutcome, MediaVerb};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationCall {
    Run(MediaVerb, String),
    Open(PathBuf),
    Search(String),
}

/// Records every call; media verbs fail when `fail_media` is set.
#[derive(Default)]
pub struct RecordingAutomation {
    calls: Mutex<Vec<AutomationCall>>,
    fail_media: bool,
}

impl RecordingAutomation {
    pub fn failing_media() -> Self {
        Self {
            fail_media: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<AutomationCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Automation for RecordingAutomation {
    fn run(&self, verb: MediaVerb, app: &str) -> Result<(), AutomationError> {
        self.calls.lock().unwrap().push(AutomationCall::Run(verb, app.to_string()));
        if self.fail_media {
            return Err(AutomationError::Script("application isn't running".into()));
        }
        Ok(())
    }

    fn open(&self, path: &Path) -> Result<(), OpenError> {
        self.calls.lock().unwrap().push(AutomationCall::Open(path.to_path_buf()));
        Ok(())
    }

    fn search(&self, query: &str) -> Result<(), OpenError> {
        self.calls.lock().unwrap().push(AutomationCall::Search(query.to_string()));
        Ok(())
    }
}

/// Canned responses keyed by the exact raw text, with optional latency.
#[derive(Default)]
pub struct ScriptedClassifier {
    responses: HashMap<String, Result<ClassificationOutcome, ClassifyError>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        mut self,
        raw: &str,
        result: Result<ClassificationOutcome, ClassifyError>,
    ) -> Self {
        self.responses.insert(raw.to_string(), result);
        self
    }

    pub fn delay(mut self, raw: &str, delay: Duration) -> Self {
        self.delays.insert(raw.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<ClassificationOutcome, ClassifyError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self
            .responses
            .get(text)
            .cloned()
            .unwrap_or_else(|| Err(ClassifyError::MalformedResponse("unscripted input".into())));
        let delay = self.delays.get(text).copied();

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            response
        }
    }
}

pub fn spotify_directory() -> Arc<AppDirectory> {
    Arc::new(AppDirectory::from_entries([
        ("spotify", "/Applications/Spotify.app"),
        ("safari", "/Applications/Safari.app"),
    ]))
}

pub fn dispatcher_with(automation: Arc<RecordingAutomation>) -> Dispatcher {
    Dispatcher::new(spotify_directory(), automation)
}
