use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, warn};

use crate::classifier::{parse_content, Classifier, ClassifyError};
use crate::config::LlmConfig;
use crate::intent::ClassificationOutcome;

const SYSTEM_PROMPT: &str = r#"You classify commands typed into a desktop launcher.
Supported tasks: open or close applications, media playback control (play, pause, next track), web search, opening or summarising files, creating calendar events, changing volume or brightness, and answering informational questions.

If the command asks for a task, reply ONLY with JSON (no prose, no markdown fences):
{"intent": "open_app" | "media_control" | "search" | "unknown", "target": "...", "action": "play" | "pause" | "next"}
"action" is only used with "media_control". For several tasks reply {"tasks": [ ... ]}.

If the command is a question, reply with a short plain-text answer."#;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[allow(dead_code)]
    role: String,
    content: Option<String>,
}

/// Chat-completions backed classifier.
#[derive(Clone)]
pub struct LlmClassifier {
    client: Client,
    config: LlmConfig,
    media_app: String,
}

impl LlmClassifier {
    pub fn new(config: LlmConfig, media_app: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            config,
            media_app: media_app.to_string(),
        }
    }

    async fn complete(&self, text: &str) -> Result<String, ClassifyError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            // Deterministic sampling keeps repeated inputs memoizable.
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Classification backend returned {}", status);
            debug!("Error body: {}", body);
            return Err(ClassifyError::Transport(format!("backend returned {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        decode_content(&body)
    }
}

impl Classifier for LlmClassifier {
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<ClassificationOutcome, ClassifyError>> + Send {
        async move {
            let content = self.complete(text).await?;
            Ok(parse_content(&content, &self.media_app))
        }
    }
}

/// Extracts `choices[0].message.content` from a response body.
fn decode_content(body: &str) -> Result<String, ClassifyError> {
    let decoded: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;

    let content = decoded
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ClassifyError::MalformedResponse("no choices".into()))?
        .message
        .content
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(ClassifyError::MalformedResponse("empty content".into()));
    }
    Ok(content)
}
