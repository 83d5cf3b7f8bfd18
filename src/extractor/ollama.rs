//! Local-model extraction via an Ollama inference server.
//!
//! ## Why a health probe?
//!
//! A dead local server and a model that produced garbage are very different
//! failures: one is fixed by `ollama serve`, the other by changing model or
//! prompt. Listing the server's models (`GET /api/tags`) before the real
//! request lets us map connectivity problems to
//! [`ResumeError::ServiceUnavailable`] instead of the generic extraction
//! error the chat call would produce.

use crate::error::ResumeError;
use crate::extractor::{recover_json_payload, ResumeExtractor};
use crate::prompts::{extraction_prompt, EXTRACTION_SYSTEM_PROMPT};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Extractor backed by an Ollama server.
pub struct OllamaExtractor {
    model: String,
    base_url: String,
    temperature: f32,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    /// Ollama's structured-output mode: constrains generation to valid JSON.
    format: &'a str,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ResponseMessage>,
    /// Older server versions answer on the generate-style field instead.
    #[serde(default)]
    response: Option<String>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

impl OllamaExtractor {
    /// Create an extractor for the given model and server address.
    pub fn new(model: String, base_url: String, temperature: f32) -> Self {
        Self {
            model,
            base_url,
            temperature,
            client: reqwest::Client::new(),
        }
    }

    /// Verify the server is up by listing its models.
    async fn check_server_health(&self) -> Result<(), ResumeError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            ResumeError::ServiceUnavailable {
                base_url: self.base_url.clone(),
                detail: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(ResumeError::ServiceUnavailable {
                base_url: self.base_url.clone(),
                detail: format!("HTTP {}", response.status()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ResumeExtractor for OllamaExtractor {
    async fn extract(&self, resume_text: &str) -> Result<Value, ResumeError> {
        self.check_server_health().await?;

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
            stream: false,
            format: "json",
            options: ChatOptions {
                temperature: self.temperature,
            },
        };

        let url = format!("{}/api/chat", self.base_url);
        debug!("Ollama extraction request: model={}", self.model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ResumeError::ExtractionFailed {
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ResumeError::ExtractionFailed {
                detail: format!("Ollama returned HTTP {}", response.status()),
            });
        }

        let body: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| ResumeError::ExtractionFailed {
                    detail: format!("Unreadable Ollama response: {e}"),
                })?;

        let response_text = body
            .message
            .map(|m| m.content)
            .filter(|c| !c.is_empty())
            .or(body.response)
            .unwrap_or_default();

        if response_text.is_empty() {
            return Err(ResumeError::ExtractionFailed {
                detail: "Ollama returned an empty response".to_string(),
            });
        }

        let payload = recover_json_payload(&response_text);
        serde_json::from_str(payload).map_err(|e| ResumeError::InvalidJson {
            detail: e.to_string(),
        })
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serialises_json_mode() {
        let request = ChatRequest {
            model: "llama3",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            stream: false,
            format: "json",
            options: ChatOptions { temperature: 0.1 },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["format"], "json");
        assert_eq!(value["stream"], false);
        let t = value["options"]["temperature"].as_f64().unwrap();
        assert!((t - 0.1).abs() < 1e-6);
    }

    #[test]
    fn response_falls_back_to_generate_field() {
        let body: ChatResponse =
            serde_json::from_str(r#"{"response": "{\"a\": 1}"}"#).unwrap();
        assert!(body.message.is_none());
        assert_eq!(body.response.as_deref(), Some("{\"a\": 1}"));
    }

    #[tokio::test]
    async fn unreachable_server_is_service_unavailable() {
        // Port 9 (discard) is a safe "nothing is listening here" target.
        let extractor =
            OllamaExtractor::new("llama3".into(), "http://127.0.0.1:9".into(), 0.1);
        let result = extractor.extract("some resume text").await;
        assert!(matches!(
            result,
            Err(ResumeError::ServiceUnavailable { .. })
        ));
    }
}
