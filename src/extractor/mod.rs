//! Provider abstraction: pluggable LLM backends for structured extraction.
//!
//! The seam is a single-method trait, [`ResumeExtractor`], held behind an
//! `Arc<dyn ...>` so the orchestrator and the CLI never know which backend
//! they are talking to. Two implementations exist:
//!
//! * [`ollama::OllamaExtractor`] — a locally-hosted inference server.
//!   Health-probed before each extraction; connectivity failures surface as
//!   a distinct [`ResumeError::ServiceUnavailable`].
//! * [`openai::OpenAiExtractor`] — the hosted commercial API. Requires a
//!   credential and fails fast at construction when none is available.
//!
//! Backend selection goes through [`create_extractor`], a small string-keyed
//! factory. Environment reads (`OPENAI_API_KEY`, `OLLAMA_BASE_URL`) happen
//! only here, at construction time, so the rest of the pipeline stays
//! testable with injected configuration.

pub mod ollama;
pub mod openai;

use crate::config::ParseConfig;
use crate::error::ResumeError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Default model when the ollama provider is selected without an override.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";
/// Default model when the openai provider is selected without an override.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Default Ollama server address.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// A backend that turns raw resume text into a structured JSON guess.
///
/// The returned [`Value`] is whatever the model produced — callers must
/// treat it as untrusted and run it through
/// [`crate::pipeline::normalize::normalize`].
#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    /// Extract structured information from resume text.
    async fn extract(&self, resume_text: &str) -> Result<Value, ResumeError>;

    /// Short backend name for logging ("ollama", "openai", "stub", ...).
    fn name(&self) -> &str;
}

/// Create an extractor for the given provider key.
///
/// Keys are matched case-insensitively. Unknown keys are a configuration
/// error, not a fallback to some default backend.
pub fn create_extractor(
    provider: &str,
    config: &ParseConfig,
) -> Result<Arc<dyn ResumeExtractor>, ResumeError> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let model = config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());
            let base_url = resolve_base_url(
                config.ollama_base_url.clone(),
                std::env::var("OLLAMA_BASE_URL").ok(),
            );
            Ok(Arc::new(ollama::OllamaExtractor::new(
                model,
                base_url,
                config.temperature,
            )))
        }
        "openai" => {
            let model = config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
            let api_key = resolve_api_key(
                config.api_key.clone(),
                std::env::var("OPENAI_API_KEY").ok(),
            )?;
            Ok(Arc::new(openai::OpenAiExtractor::new(
                model,
                api_key,
                config.temperature,
            )))
        }
        other => Err(ResumeError::UnknownProvider {
            name: other.to_string(),
        }),
    }
}

/// Pick the Ollama base URL: explicit override, then environment, then the
/// local default. Trailing slashes are stripped so path joins stay clean.
fn resolve_base_url(explicit: Option<String>, env: Option<String>) -> String {
    explicit
        .or(env)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Pick the OpenAI credential: explicit override, then environment.
/// Absence is a hard configuration error — there is no anonymous mode.
fn resolve_api_key(
    explicit: Option<String>,
    env: Option<String>,
) -> Result<String, ResumeError> {
    explicit
        .or(env)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ResumeError::MissingApiKey)
}

// ── Response payload recovery ────────────────────────────────────────────

/// Recover the JSON payload from a model reply.
///
/// Models asked for "JSON only" still wrap their answer in markdown fences
/// or surround it with prose often enough that decoding the raw reply
/// directly would fail on perfectly usable output. Recovery runs three
/// rules, most-specific first:
///
/// 1. A leading ```` ``` ````/```` ```json ```` fence with a closing fence:
///    take the fenced body.
/// 2. An outermost `{...}` span anywhere in the text: take the span.
/// 3. Otherwise: the trimmed reply as-is (the subsequent JSON parse decides
///    whether it was usable).
pub fn recover_json_payload(response_text: &str) -> &str {
    if let Some(fenced) = strip_code_fence(response_text) {
        return fenced;
    }
    if let Some(span) = outer_brace_span(response_text) {
        return span;
    }
    response_text.trim()
}

/// Strip a markdown code fence, optionally tagged `json`.
fn strip_code_fence(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let rest = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))?;
    let end = rest.rfind("```")?;
    Some(rest[..end].trim())
}

/// Locate the outermost `{...}` span.
fn outer_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_rejects_unknown_provider() {
        let config = ParseConfig::default();
        let result = create_extractor("gemini", &config);
        assert!(matches!(
            result,
            Err(ResumeError::UnknownProvider { name }) if name == "gemini"
        ));
    }

    #[test]
    fn factory_is_case_insensitive() {
        let config = ParseConfig::default();
        let extractor = create_extractor("OLLAMA", &config).unwrap();
        assert_eq!(extractor.name(), "ollama");
    }

    #[test]
    fn openai_requires_explicit_key() {
        // Explicit key avoids reading the test environment.
        assert_eq!(
            resolve_api_key(Some("sk-test".into()), None).unwrap(),
            "sk-test"
        );
        assert!(matches!(
            resolve_api_key(None, None),
            Err(ResumeError::MissingApiKey)
        ));
        assert!(matches!(
            resolve_api_key(Some("  ".into()), None),
            Err(ResumeError::MissingApiKey)
        ));
    }

    #[test]
    fn base_url_fallback_chain() {
        assert_eq!(
            resolve_base_url(Some("http://gpu-box:11434/".into()), None),
            "http://gpu-box:11434"
        );
        assert_eq!(
            resolve_base_url(None, Some("http://env:11434".into())),
            "http://env:11434"
        );
        assert_eq!(resolve_base_url(None, None), DEFAULT_OLLAMA_BASE_URL);
    }

    #[test]
    fn recover_fenced_json() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(recover_json_payload(text), "{\"a\": 1}");
    }

    #[test]
    fn recover_fenced_no_tag() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(recover_json_payload(text), "{\"a\": 1}");
    }

    #[test]
    fn recover_brace_span_with_prose() {
        let text = "Here is the result:\n{\"name\": \"x\"}\nHope that helps!";
        assert_eq!(recover_json_payload(text), "{\"name\": \"x\"}");
    }

    #[test]
    fn recover_raw_when_no_braces() {
        assert_eq!(recover_json_payload("  null  "), "null");
    }

    #[test]
    fn unclosed_fence_falls_back_to_brace_span() {
        let text = "```json\n{\"a\": 1}";
        assert_eq!(recover_json_payload(text), "{\"a\": 1}");
    }
}
