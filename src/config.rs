//! Configuration types for resume parsing.
//!
//! All parsing behaviour is controlled through [`ParseConfig`], built via its
//! [`ParseConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to reuse a config across a whole batch run and to inject a stub extractor
//! in tests without touching environment variables.
//!
//! Environment fallbacks (`OPENAI_API_KEY`, `OLLAMA_BASE_URL`) are *not* read
//! here — they are resolved once, at extractor construction time, inside
//! [`crate::extractor::create_extractor`]. The config only carries explicit
//! overrides.

use crate::error::ResumeError;
use crate::extractor::ResumeExtractor;
use std::fmt;
use std::sync::Arc;

/// Configuration for a resume parse.
///
/// Built via [`ParseConfig::builder()`] or [`ParseConfig::default()`].
///
/// # Example
/// ```rust
/// use resume2json::ParseConfig;
///
/// let config = ParseConfig::builder()
///     .provider("ollama")
///     .model("llama3.2")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ParseConfig {
    /// Provider key: "ollama" or "openai" (case-insensitive). Default: "ollama".
    pub provider: String,

    /// Model identifier override. If None, uses the provider default
    /// (`llama3` for ollama, `gpt-4o-mini` for openai).
    pub model: Option<String>,

    /// Explicit OpenAI API key. If None, `OPENAI_API_KEY` is consulted at
    /// extractor construction.
    pub api_key: Option<String>,

    /// Explicit Ollama base URL. If None, `OLLAMA_BASE_URL` is consulted at
    /// extractor construction, falling back to `http://localhost:11434`.
    pub ollama_base_url: Option<String>,

    /// Sampling temperature for the extraction call. Default: 0.1.
    ///
    /// Low temperature keeps the model near-deterministic, which matters when
    /// the output must be machine-parseable JSON rather than prose.
    pub temperature: f32,

    /// Pre-constructed extractor. Takes precedence over `provider`.
    ///
    /// This is the seam tests use to stub out the network entirely.
    pub extractor: Option<Arc<dyn ResumeExtractor>>,

    /// Minimum cleaned-text length considered a usable resume. Default: 10.
    ///
    /// Anything shorter is almost certainly a scanned or empty document;
    /// sending it to a model would only produce hallucinated fields.
    pub min_text_len: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: None,
            api_key: None,
            ollama_base_url: None,
            temperature: 0.1,
            extractor: None,
            min_text_len: 10,
        }
    }
}

impl fmt::Debug for ParseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("ollama_base_url", &self.ollama_base_url)
            .field("temperature", &self.temperature)
            .field(
                "extractor",
                &self.extractor.as_ref().map(|_| "<dyn ResumeExtractor>"),
            )
            .field("min_text_len", &self.min_text_len)
            .finish()
    }
}

impl ParseConfig {
    /// Create a new builder for `ParseConfig`.
    pub fn builder() -> ParseConfigBuilder {
        ParseConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ParseConfig`].
#[derive(Debug)]
pub struct ParseConfigBuilder {
    config: ParseConfig,
}

impl ParseConfigBuilder {
    pub fn provider(mut self, name: impl Into<String>) -> Self {
        self.config.provider = name.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn ollama_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.ollama_base_url = Some(url.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn extractor(mut self, extractor: Arc<dyn ResumeExtractor>) -> Self {
        self.config.extractor = Some(extractor);
        self
    }

    pub fn min_text_len(mut self, n: usize) -> Self {
        self.config.min_text_len = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ParseConfig, ResumeError> {
        let c = &self.config;
        if c.provider.trim().is_empty() && c.extractor.is_none() {
            return Err(ResumeError::UnknownProvider {
                name: String::new(),
            });
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ParseConfig::default();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.min_text_len, 10);
        assert!(config.model.is_none());
    }

    #[test]
    fn builder_clamps_temperature() {
        let config = ParseConfig::builder().temperature(5.0).build().unwrap();
        assert_eq!(config.temperature, 2.0);
    }

    #[test]
    fn empty_provider_rejected() {
        let result = ParseConfig::builder().provider("  ").build();
        assert!(matches!(
            result,
            Err(ResumeError::UnknownProvider { .. })
        ));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ParseConfig::builder().api_key("sk-secret").build().unwrap();
        let dump = format!("{config:?}");
        assert!(!dump.contains("sk-secret"));
        assert!(dump.contains("<redacted>"));
    }
}
