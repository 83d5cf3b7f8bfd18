//! Error types for the resume2json library.
//!
//! One enum covers the whole taxonomy:
//!
//! * **Input errors** — the PDF is missing, unreadable, or empty. Raised by
//!   [`crate::pipeline::text`] before any network traffic happens.
//! * **Provider errors** — the backend is unreachable, misconfigured, or
//!   returned something that is not JSON. Raised by [`crate::extractor`].
//! * **Output errors** — the result could not be written to disk.
//!
//! Normalization is deliberately absent from this list: it is total and can
//! never fail, no matter how malformed the provider output is. The batch
//! driver ([`crate::batch`]) is the only place where errors are caught and
//! recorded instead of propagated — one bad resume must never abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the resume2json library.
#[derive(Debug, Error)]
pub enum ResumeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The file exists but does not carry a `.pdf` extension.
    #[error("File is not a PDF: '{path}'")]
    NotAPdf { path: PathBuf },

    /// The file could not be parsed as a PDF.
    #[error("Error reading PDF file '{path}': {detail}")]
    InvalidPdf { path: PathBuf, detail: String },

    /// The PDF appears to be encrypted or password-protected.
    ///
    /// Detected by matching "password"/"encrypted" in the underlying error
    /// text — a heuristic, not an authoritative signal.
    #[error("PDF is password-protected: '{path}'")]
    PasswordProtected { path: PathBuf },

    /// The PDF parsed fine but yielded no usable text (likely scanned images).
    #[error("Insufficient text extracted from PDF: '{path}'\nScanned documents need OCR, which resume2json does not perform.")]
    NoText { path: PathBuf },

    /// The directory given to batch mode contains no PDF files.
    #[error("No PDF files found in directory: '{path}'")]
    NoPdfsFound { path: PathBuf },

    // ── Provider errors ───────────────────────────────────────────────────
    /// The local inference server did not answer the health probe.
    #[error("Ollama server not available at {base_url}: {detail}\nStart it with: ollama serve")]
    ServiceUnavailable { base_url: String, detail: String },

    /// No API key was supplied for a hosted provider.
    #[error("OpenAI API key is required.\nSet OPENAI_API_KEY or pass --api-key.")]
    MissingApiKey,

    /// The provider key is not one of the supported backends.
    #[error("Unsupported provider: '{name}'. Supported providers: ollama, openai")]
    UnknownProvider { name: String },

    /// The provider's reply could not be decoded as JSON.
    #[error("Failed to parse JSON from provider response: {detail}")]
    InvalidJson { detail: String },

    /// The extraction request itself failed (HTTP error, empty reply, ...).
    #[error("AI extraction failed: {detail}")]
    ExtractionFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = ResumeError::FileNotFound {
            path: PathBuf::from("/tmp/cv.pdf"),
        };
        assert!(e.to_string().contains("/tmp/cv.pdf"));
    }

    #[test]
    fn service_unavailable_display() {
        let e = ResumeError::ServiceUnavailable {
            base_url: "http://localhost:11434".into(),
            detail: "connection refused".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("localhost:11434"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn unknown_provider_display() {
        let e = ResumeError::UnknownProvider {
            name: "gemini".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("gemini"));
        assert!(msg.contains("ollama, openai"));
    }

    #[test]
    fn missing_api_key_display() {
        let msg = ResumeError::MissingApiKey.to_string();
        assert!(msg.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn invalid_json_display() {
        let e = ResumeError::InvalidJson {
            detail: "expected value at line 1".into(),
        };
        assert!(e.to_string().contains("expected value"));
    }
}
