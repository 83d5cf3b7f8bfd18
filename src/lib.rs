//! # resume2json
//!
//! Extract structured JSON records from PDF resumes using LLM backends.
//!
//! ## Why this crate?
//!
//! Rule-based resume parsers fall apart on real-world documents — layouts,
//! section names, and date formats vary endlessly. This crate extracts the
//! raw text and lets a language model do the interpretation, then runs the
//! model's loosely-typed reply through a strict normalization layer so
//! downstream code always sees the same fixed shape, no matter how the
//! model mis-formatted its answer.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Text       extract per-page text, clean whitespace
//!  ├─ 2. Extract    pluggable LLM backend (ollama / openai) returns JSON
//!  └─ 3. Normalize  total coercion into the fixed Resume record
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume2json::{parse, ParseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ParseConfig::builder()
//!         .provider("ollama")
//!         .model("llama3")
//!         .build()?;
//!     let resume = parse("resume.pdf", &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&resume)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume2json` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! resume2json = { version = "0.1", default-features = false }
//! ```
//!
//! ## Choosing a Backend
//!
//! | Provider | Default model | Needs | Notes |
//! |----------|---------------|-------|-------|
//! | `ollama` | `llama3`      | a local `ollama serve` | free, private, health-probed |
//! | `openai` | `gpt-4o-mini` | `OPENAI_API_KEY`       | strict JSON mode |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod error;
pub mod extractor;
pub mod parse;
pub mod pipeline;
pub mod prompts;
pub mod schema;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{parse_dir, parse_dir_with_progress, BatchSummary, FileOutcome};
pub use config::{ParseConfig, ParseConfigBuilder};
pub use error::ResumeError;
pub use extractor::{create_extractor, ResumeExtractor};
pub use parse::{parse, parse_bytes, parse_sync, parse_text, parse_to_file};
pub use schema::{Address, Education, Employment, Resume, UserInfo};
