//! Hosted-API extraction via OpenAI chat completions.
//!
//! Unlike the local backend there is no health probe: the API either answers
//! or it does not, and a failed request already carries a useful status. The
//! request asks for strict JSON mode (`response_format: json_object`), so the
//! reply body is parsed directly — no fence stripping needed. The credential
//! is resolved once, at construction, never here.

use crate::error::ResumeError;
use crate::extractor::ResumeExtractor;
use crate::prompts::{extraction_prompt, EXTRACTION_SYSTEM_PROMPT};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Extractor backed by the OpenAI API.
pub struct OpenAiExtractor {
    model: String,
    api_key: String,
    temperature: f32,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

impl OpenAiExtractor {
    /// Create an extractor for the given model with a resolved credential.
    pub fn new(model: String, api_key: String, temperature: f32) -> Self {
        Self {
            model,
            api_key,
            temperature,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ResumeExtractor for OpenAiExtractor {
    async fn extract(&self, resume_text: &str) -> Result<Value, ResumeError> {
        let prompt = extraction_prompt(resume_text);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: EXTRACTION_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            response_format: ResponseFormat { kind: "json_object" },
            temperature: self.temperature,
        };

        debug!("OpenAI extraction request: model={}", self.model);

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ResumeError::ExtractionFailed {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResumeError::ExtractionFailed {
                detail: format!("OpenAI returned HTTP {status}: {body}"),
            });
        }

        let body: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| ResumeError::ExtractionFailed {
                    detail: format!("Unreadable OpenAI response: {e}"),
                })?;

        let content = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(ResumeError::ExtractionFailed {
                detail: "OpenAI returned no choices".to_string(),
            });
        }

        serde_json::from_str(content).map_err(|e| ResumeError::InvalidJson {
            detail: e.to_string(),
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}
