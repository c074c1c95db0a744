use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Media transport verbs understood by the automation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaVerb {
    Play,
    Pause,
    Next,
}

impl MediaVerb {
    /// Lenient tag parsing for model output ("next track", "Skip", "PLAY").
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "play" | "resume" => Some(MediaVerb::Play),
            "pause" | "stop" => Some(MediaVerb::Pause),
            "next" | "next track" | "next_track" | "skip" => Some(MediaVerb::Next),
            _ => None,
        }
    }
}

impl fmt::Display for MediaVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaVerb::Play => write!(f, "play"),
            MediaVerb::Pause => write!(f, "pause"),
            MediaVerb::Next => write!(f, "next"),
        }
    }
}

/// Closed set of recognised actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    OpenApp,
    MediaControl(MediaVerb),
    Search,
    Info,
    Unknown,
}

impl IntentKind {
    /// Actionable intents must carry a non-empty target.
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            IntentKind::OpenApp | IntentKind::MediaControl(_) | IntentKind::Search
        )
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentKind::OpenApp => write!(f, "open_app"),
            IntentKind::MediaControl(verb) => write!(f, "media_control({})", verb),
            IntentKind::Search => write!(f, "search"),
            IntentKind::Info => write!(f, "info"),
            IntentKind::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("intent {0} requires a non-empty target")]
pub struct InvalidCommand(pub IntentKind);

/// A classified command. Immutable once built.
///
/// For `Info` the target slot carries the answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParsedCommand")]
pub struct ParsedCommand {
    intent: IntentKind,
    target: String,
}

/// Wire shape; every decoded command goes through `ParsedCommand::new`.
#[derive(Deserialize)]
struct RawParsedCommand {
    intent: IntentKind,
    target: String,
}

impl TryFrom<RawParsedCommand> for ParsedCommand {
    type Error = InvalidCommand;

    fn try_from(raw: RawParsedCommand) -> Result<Self, Self::Error> {
        ParsedCommand::new(raw.intent, raw.target)
    }
}

impl ParsedCommand {
    pub fn new(intent: IntentKind, target: impl Into<String>) -> Result<Self, InvalidCommand> {
        let target = target.into().trim().to_string();
        if intent.is_actionable() && target.is_empty() {
            return Err(InvalidCommand(intent));
        }
        Ok(Self { intent, target })
    }

    pub fn open_app(name: &str) -> Result<Self, InvalidCommand> {
        Self::new(IntentKind::OpenApp, name)
    }

    pub fn media(verb: MediaVerb, app: &str) -> Result<Self, InvalidCommand> {
        Self::new(IntentKind::MediaControl(verb), app)
    }

    pub fn search(query: &str) -> Result<Self, InvalidCommand> {
        Self::new(IntentKind::Search, query)
    }

    pub fn info(text: &str) -> Self {
        Self {
            intent: IntentKind::Info,
            target: text.to_string(),
        }
    }

    pub fn unknown(raw: &str) -> Self {
        Self {
            intent: IntentKind::Unknown,
            target: raw.trim().to_string(),
        }
    }

    pub fn intent(&self) -> IntentKind {
        self.intent
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Result of one classification round trip. Exactly one variant per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    Actions(Vec<ParsedCommand>),
    Answer(String),
}
