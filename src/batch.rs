//! Batch driver: parse every PDF in a directory, isolating failures.
//!
//! The loop is deliberately plain and sequential. Each file is parsed
//! start-to-finish before the next begins; a failure is recorded in its
//! [`FileOutcome`] and the run continues. Nothing a bad document can do —
//! encryption, garbage bytes, a provider hiccup mid-run — affects any other
//! document's result. The extractor (and its HTTP client) is resolved once
//! and reused across the whole run.

use crate::config::ParseConfig;
use crate::error::ResumeError;
use crate::parse::{resolve_extractor, write_record};
use crate::pipeline::{normalize, text};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of one file in a batch run.
#[derive(Debug, Serialize)]
pub struct FileOutcome {
    /// The input PDF.
    pub input: PathBuf,
    /// Where the JSON record was written, when parsing succeeded.
    pub output: Option<PathBuf>,
    /// The failure message, when it did not.
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate result of a batch run.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<FileOutcome>,
}

/// Parse every `*.pdf` in `dir`, writing one JSON file per success.
///
/// Output files are named `<input stem>.json`, placed in `output_dir` when
/// given, else beside their inputs. Files are processed in name order so
/// runs are reproducible.
///
/// # Errors
/// Only setup failures abort: a directory with no PDFs
/// ([`ResumeError::NoPdfsFound`]) or an extractor that cannot be
/// constructed at all (unknown provider, missing credential). Per-file
/// failures never do.
pub async fn parse_dir(
    dir: impl AsRef<Path>,
    output_dir: Option<&Path>,
    config: &ParseConfig,
) -> Result<BatchSummary, ResumeError> {
    parse_dir_with_progress(dir, output_dir, config, |_, _, _| {}).await
}

/// [`parse_dir`] with a per-file progress hook.
///
/// `progress(index, total, outcome)` fires after each file completes; the
/// CLI uses it to drive its progress bar without the library depending on
/// any terminal crate.
pub async fn parse_dir_with_progress(
    dir: impl AsRef<Path>,
    output_dir: Option<&Path>,
    config: &ParseConfig,
    mut progress: impl FnMut(usize, usize, &FileOutcome),
) -> Result<BatchSummary, ResumeError> {
    let dir = dir.as_ref();
    let pdf_files = collect_pdfs(dir)?;
    let total = pdf_files.len();
    info!("Batch run: {} PDF files in {}", total, dir.display());

    // Fail fast on configuration problems before touching any file.
    let extractor = resolve_extractor(config)?;

    if let Some(out) = output_dir {
        tokio::fs::create_dir_all(out)
            .await
            .map_err(|e| ResumeError::OutputWriteFailed {
                path: out.to_path_buf(),
                source: e,
            })?;
    }

    let mut outcomes = Vec::with_capacity(total);
    for (i, pdf_file) in pdf_files.into_iter().enumerate() {
        let outcome = parse_one(&pdf_file, output_dir, config, &extractor).await;
        if let Some(ref err) = outcome.error {
            warn!("Failed: {} — {}", pdf_file.display(), err);
        }
        progress(i + 1, total, &outcome);
        outcomes.push(outcome);
    }

    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    let summary = BatchSummary {
        total,
        succeeded,
        failed: total - succeeded,
        outcomes,
    };
    info!(
        "Batch complete: {}/{} succeeded",
        summary.succeeded, summary.total
    );
    Ok(summary)
}

/// Parse one file with an already-resolved extractor, absorbing any error.
async fn parse_one(
    pdf_file: &Path,
    output_dir: Option<&Path>,
    config: &ParseConfig,
    extractor: &std::sync::Arc<dyn crate::extractor::ResumeExtractor>,
) -> FileOutcome {
    let result = async {
        let resume_text = text::extract_text(pdf_file).await?;
        if resume_text.len() < config.min_text_len {
            return Err(ResumeError::NoText {
                path: pdf_file.to_path_buf(),
            });
        }
        let raw = extractor.extract(&resume_text).await?;
        let resume = normalize::normalize(&raw);

        let out_path = output_path_for(pdf_file, output_dir);
        write_record(&resume, &out_path).await?;
        Ok::<PathBuf, ResumeError>(out_path)
    }
    .await;

    match result {
        Ok(out_path) => FileOutcome {
            input: pdf_file.to_path_buf(),
            output: Some(out_path),
            error: None,
        },
        Err(e) => FileOutcome {
            input: pdf_file.to_path_buf(),
            output: None,
            error: Some(e.to_string()),
        },
    }
}

/// Compute the output path for an input PDF: `<stem>.json`, beside the
/// input or under `output_dir`.
pub(crate) fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "output".into());
    let mut name = stem;
    name.push(".json");
    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// List the PDF files in `dir`, sorted by name.
fn collect_pdfs(dir: &Path) -> Result<Vec<PathBuf>, ResumeError> {
    let entries = std::fs::read_dir(dir).map_err(|_| ResumeError::FileNotFound {
        path: dir.to_path_buf(),
    })?;

    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
        })
        .collect();
    pdfs.sort();

    if pdfs.is_empty() {
        return Err(ResumeError::NoPdfsFound {
            path: dir.to_path_buf(),
        });
    }
    Ok(pdfs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_beside_input() {
        assert_eq!(
            output_path_for(Path::new("/data/cv/jane.pdf"), None),
            Path::new("/data/cv/jane.json")
        );
    }

    #[test]
    fn output_path_in_output_dir() {
        assert_eq!(
            output_path_for(Path::new("/data/cv/jane.pdf"), Some(Path::new("/out"))),
            Path::new("/out/jane.json")
        );
    }

    #[test]
    fn collect_pdfs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        let pdfs = collect_pdfs(dir.path()).unwrap();
        let names: Vec<_> = pdfs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.PDF", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn empty_dir_is_no_pdfs_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_pdfs(dir.path());
        assert!(matches!(result, Err(ResumeError::NoPdfsFound { .. })));
    }

    #[test]
    fn missing_dir_is_not_found() {
        let result = collect_pdfs(Path::new("/no/such/dir"));
        assert!(matches!(result, Err(ResumeError::FileNotFound { .. })));
    }
}
