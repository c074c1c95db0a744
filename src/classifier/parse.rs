//! Interpretation of the completion text returned by the backend.
//!
//! The model is asked for a JSON action payload but may answer in plain
//! prose. Anything that does not decode as an action payload is surfaced
//! verbatim as an informational answer.

use crate::intent::{ClassificationOutcome, MediaVerb, ParsedCommand};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActionPayload {
    Many(Vec<ActionSpec>),
    Tasks { tasks: Vec<ActionSpec> },
    One(ActionSpec),
}

#[derive(Debug, Deserialize)]
struct ActionSpec {
    #[serde(alias = "intent_type", alias = "action_type")]
    intent: String,
    #[serde(default)]
    target: Option<String>,
    #[serde(default, alias = "verb")]
    action: Option<String>,
    #[serde(default, alias = "text")]
    answer: Option<String>,
}

enum Resolved {
    Command(ParsedCommand),
    Answer(String),
}

/// Parses completion content into exactly one outcome.
///
/// `media_app` fills the target of media commands that do not name one.
pub fn parse_content(content: &str, media_app: &str) -> ClassificationOutcome {
    let body = strip_code_fence(content);

    let payload: ActionPayload = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(_) => return ClassificationOutcome::Answer(content.trim().to_string()),
    };

    let specs = match payload {
        ActionPayload::Many(specs) | ActionPayload::Tasks { tasks: specs } => specs,
        ActionPayload::One(spec) => vec![spec],
    };

    let mut resolved = specs.into_iter().map(|spec| resolve(spec, media_app));
    let first = match resolved.next() {
        Some(first) => first,
        None => return ClassificationOutcome::Actions(Vec::new()),
    };

    match first {
        Resolved::Answer(text) => ClassificationOutcome::Answer(text),
        Resolved::Command(cmd) => {
            let mut commands = vec![cmd];
            for rest in resolved {
                match rest {
                    Resolved::Command(cmd) => commands.push(cmd),
                    Resolved::Answer(_) => debug!("Dropping trailing info entry from action list"),
                }
            }
            ClassificationOutcome::Actions(commands)
        }
    }
}

fn resolve(spec: ActionSpec, media_app: &str) -> Resolved {
    let target = spec.target.as_deref().map(str::trim).unwrap_or_default();

    let parsed = match spec.intent.trim().to_lowercase().as_str() {
        "open_app" | "open" | "launch_app" => ParsedCommand::open_app(target),
        "media_control" | "media" | "spotify" => {
            let verb = spec
                .action
                .as_deref()
                .and_then(MediaVerb::parse)
                .or_else(|| MediaVerb::parse(target));
            match verb {
                Some(verb) => {
                    let app = if target.is_empty() || MediaVerb::parse(target).is_some() {
                        media_app
                    } else {
                        target
                    };
                    ParsedCommand::media(verb, app)
                }
                None => Ok(ParsedCommand::unknown(target)),
            }
        }
        "search" | "web_search" => ParsedCommand::search(target),
        "info" | "answer" => {
            let text = spec.answer.as_deref().unwrap_or(target);
            return Resolved::Answer(text.trim().to_string());
        }
        other => {
            debug!("Unrecognised intent tag '{}'", other);
            Ok(ParsedCommand::unknown(target))
        }
    };

    Resolved::Command(parsed.unwrap_or_else(|e| {
        debug!("Demoting invalid command to unknown: {}", e);
        ParsedCommand::unknown(target)
    }))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = match rest.get(..4) {
                Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
                _ => rest,
            };
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}
