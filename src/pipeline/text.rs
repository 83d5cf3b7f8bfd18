//! PDF text extraction and whitespace cleaning.
//!
//! ## Why spawn_blocking?
//!
//! `pdf-extract` is a synchronous, CPU-bound parser. Running it on a Tokio
//! worker thread would stall every other task sharing that thread, so the
//! extraction is moved onto the blocking pool.
//!
//! ## Why the "password" heuristic?
//!
//! The underlying parser reports encrypted documents through its generic
//! error string rather than a dedicated variant. Matching
//! "password"/"encrypted" in the message is the only signal available;
//! the resulting [`ResumeError::PasswordProtected`] is explicitly a
//! best-effort classification.

use crate::error::ResumeError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extract cleaned text from a PDF file.
///
/// Validates the path and extension, parses the document, and applies the
/// whitespace-cleaning rules. The returned string is the immutable
/// "raw document text" every later stage works from.
pub async fn extract_text(path: &Path) -> Result<String, ResumeError> {
    let path = path.to_path_buf();
    validate_path(&path)?;

    let result = tokio::task::spawn_blocking(move || extract_text_blocking(&path))
        .await
        .map_err(|e| ResumeError::Internal(format!("Extraction task panicked: {e}")))?;

    result
}

/// Extract cleaned text from in-memory PDF bytes.
///
/// `origin` is only used in error messages; no file is touched.
pub async fn extract_text_from_bytes(
    bytes: Vec<u8>,
    origin: PathBuf,
) -> Result<String, ResumeError> {
    let result = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| classify_extract_error(&origin, &e.to_string()))
            .and_then(|raw| finish(&origin, &raw))
    })
    .await
    .map_err(|e| ResumeError::Internal(format!("Extraction task panicked: {e}")))?;

    result
}

fn validate_path(path: &Path) -> Result<(), ResumeError> {
    if !path.exists() {
        return Err(ResumeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(ResumeError::NotAPdf {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn extract_text_blocking(path: &Path) -> Result<String, ResumeError> {
    let raw = pdf_extract::extract_text(path)
        .map_err(|e| classify_extract_error(path, &e.to_string()))?;
    finish(path, &raw)
}

fn finish(path: &Path, raw: &str) -> Result<String, ResumeError> {
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        return Err(ResumeError::NoText {
            path: path.to_path_buf(),
        });
    }
    debug!("Extracted {} chars from {}", cleaned.len(), path.display());
    Ok(cleaned)
}

/// Map a parser error message onto the error taxonomy.
fn classify_extract_error(path: &Path, detail: &str) -> ResumeError {
    let lower = detail.to_lowercase();
    if lower.contains("password") || lower.contains("encrypted") {
        ResumeError::PasswordProtected {
            path: path.to_path_buf(),
        }
    } else {
        ResumeError::InvalidPdf {
            path: path.to_path_buf(),
            detail: detail.to_string(),
        }
    }
}

// ── Cleaning rules ───────────────────────────────────────────────────────
//
// Applied in a fixed order: newline collapsing must run before line
// trimming (trimming can create fresh blank lines), and blank-line
// deduplication runs last over the trimmed lines.

static RE_EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Clean extracted text while preserving paragraph structure.
///
/// Rules (applied in order):
/// 1. Collapse 3+ consecutive newlines down to exactly 2
/// 2. Collapse runs of spaces/tabs to a single space (newlines untouched)
/// 3. Trim leading/trailing whitespace from each line
/// 4. Collapse consecutive blank lines to at most one
pub fn clean_text(text: &str) -> String {
    let s = RE_EXCESS_NEWLINES.replace_all(text, "\n\n");
    let s = RE_SPACE_RUNS.replace_all(&s, " ");

    let mut cleaned_lines: Vec<&str> = Vec::new();
    let mut prev_empty = false;
    for line in s.lines().map(str::trim) {
        if !line.is_empty() {
            cleaned_lines.push(line);
            prev_empty = false;
        } else if !prev_empty {
            cleaned_lines.push("");
            prev_empty = true;
        }
    }

    cleaned_lines.join("\n").trim().to_string()
}
