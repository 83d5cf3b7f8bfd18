//! Parsing entry points: orchestrate extraction, AI interpretation, and
//! normalization for a single document.
//!
//! The three stages compose sequentially with no feedback loops; the only
//! state shared between calls is the extractor's HTTP client. Per-document
//! work is strictly sequential — the Ollama health probe and the extraction
//! call are two blocking round-trips in a row.

use crate::batch::output_path_for;
use crate::config::ParseConfig;
use crate::error::ResumeError;
use crate::extractor::{create_extractor, ResumeExtractor};
use crate::pipeline::{normalize, text};
use crate::schema::Resume;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Parse a resume PDF into a structured record.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Fails on input problems (missing file, not a PDF, encrypted, no text)
/// and on provider problems (unreachable backend, bad credential,
/// undecodable reply). Normalization itself never fails.
pub async fn parse(path: impl AsRef<Path>, config: &ParseConfig) -> Result<Resume, ResumeError> {
    let path = path.as_ref();
    let start = Instant::now();
    info!("Parsing resume: {}", path.display());

    // ── Step 1: Extract and clean text ───────────────────────────────────
    let resume_text = text::extract_text(path).await?;
    if resume_text.len() < config.min_text_len {
        return Err(ResumeError::NoText {
            path: path.to_path_buf(),
        });
    }
    debug!("Cleaned text: {} chars", resume_text.len());

    // ── Steps 2–3: AI extraction + normalization ─────────────────────────
    let resume = parse_text(&resume_text, config).await?;

    info!(
        "Parsed {} in {}ms",
        path.display(),
        start.elapsed().as_millis()
    );
    Ok(resume)
}

/// Run the AI-extraction and normalization stages on already-extracted text.
///
/// Useful when the text came from somewhere other than a PDF on disk, and
/// as the seam integration tests use with a stubbed extractor.
pub async fn parse_text(resume_text: &str, config: &ParseConfig) -> Result<Resume, ResumeError> {
    let extractor = resolve_extractor(config)?;
    debug!("Using extractor: {}", extractor.name());

    let raw = extractor.extract(resume_text).await?;
    Ok(normalize::normalize(&raw))
}

/// Parse a resume PDF held in memory.
pub async fn parse_bytes(bytes: Vec<u8>, config: &ParseConfig) -> Result<Resume, ResumeError> {
    let resume_text = text::extract_text_from_bytes(bytes, PathBuf::from("<memory>.pdf")).await?;
    if resume_text.len() < config.min_text_len {
        return Err(ResumeError::NoText {
            path: PathBuf::from("<memory>.pdf"),
        });
    }
    parse_text(&resume_text, config).await
}

/// Parse a resume PDF and write the record as pretty-printed JSON.
///
/// When `output` is `None` the file lands beside the input as
/// `<input stem>.json`. Uses atomic write (temp file + rename) so readers
/// never observe a partial file.
///
/// Returns the path the record was written to.
pub async fn parse_to_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    config: &ParseConfig,
) -> Result<PathBuf, ResumeError> {
    let input = input.as_ref();
    let resume = parse(input, config).await?;

    let out_path = match output {
        Some(p) => p.to_path_buf(),
        None => output_path_for(input, None),
    };
    write_record(&resume, &out_path).await?;
    Ok(out_path)
}

/// Serialize a record to `path` atomically.
pub(crate) async fn write_record(resume: &Resume, path: &Path) -> Result<(), ResumeError> {
    let json = serde_json::to_string_pretty(resume)
        .map_err(|e| ResumeError::Internal(format!("Serialisation failed: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ResumeError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &json)
        .await
        .map_err(|e| ResumeError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| ResumeError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Synchronous wrapper around [`parse`].
///
/// Creates a temporary tokio runtime internally.
pub fn parse_sync(path: impl AsRef<Path>, config: &ParseConfig) -> Result<Resume, ResumeError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ResumeError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(parse(path, config))
}

/// Resolve the extractor, most-specific first.
///
/// 1. **Pre-built extractor** (`config.extractor`) — the caller constructed
///    it entirely; used as-is. This is what tests inject.
/// 2. **Provider key** (`config.provider`) — the factory builds the backend,
///    reading credential/URL environment fallbacks at this boundary.
pub(crate) fn resolve_extractor(
    config: &ParseConfig,
) -> Result<Arc<dyn ResumeExtractor>, ResumeError> {
    if let Some(ref extractor) = config.extractor {
        return Ok(Arc::clone(extractor));
    }
    create_extractor(&config.provider, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_extractor_takes_precedence() {
        struct Never;
        #[async_trait::async_trait]
        impl ResumeExtractor for Never {
            async fn extract(&self, _: &str) -> Result<serde_json::Value, ResumeError> {
                unreachable!("not called in this test")
            }
            fn name(&self) -> &str {
                "stub"
            }
        }

        let config = ParseConfig::builder()
            .provider("definitely-not-a-provider")
            .extractor(Arc::new(Never))
            .build()
            .unwrap();
        let extractor = resolve_extractor(&config).unwrap();
        assert_eq!(extractor.name(), "stub");
    }

    #[tokio::test]
    async fn parse_missing_file_fails_fast() {
        let config = ParseConfig::default();
        let result = parse("/no/such/resume.pdf", &config).await;
        assert!(matches!(result, Err(ResumeError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn write_record_is_pretty_and_complete() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cv.json");
        write_record(&Resume::default(), &out).await.unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains('\n'), "expected indented output");
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert!(value.get("user_info").is_some());
        assert!(value.get("skills").is_some());
        // No leftover temp file
        assert!(!dir.path().join("cv.json.tmp").exists());
    }
}
