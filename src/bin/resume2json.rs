//! CLI binary for resume2json.
//!
//! A thin shim over the library crate that maps CLI flags to `ParseConfig`
//! and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use resume2json::{parse_dir_with_progress, parse_to_file, ParseConfig};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Parse a single resume with a local model (default)
  resume2json parse resume.pdf

  # Choose the output location
  resume2json parse resume.pdf -o parsed/resume.json

  # Use OpenAI instead of Ollama
  resume2json parse --provider openai --api-key sk-... resume.pdf

  # Point at a remote Ollama server with a different model
  resume2json parse --ollama-base-url http://gpu-box:11434 --model llama3.2 resume.pdf

  # Parse a whole directory, one JSON per resume
  resume2json batch ./resumes -o ./parsed

SUPPORTED PROVIDERS:
  Provider   Default model   Requires
  ────────   ─────────────   ─────────────────────────────
  ollama     llama3          a running `ollama serve`
  openai     gpt-4o-mini     OPENAI_API_KEY

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY     OpenAI API key (overridden by --api-key)
  OLLAMA_BASE_URL    Ollama server URL (overridden by --ollama-base-url;
                     default http://localhost:11434)
"#;

/// Extract structured JSON from PDF resumes using LLM backends.
#[derive(Parser, Debug)]
#[command(
    name = "resume2json",
    version,
    about = "Extract structured JSON from PDF resumes using LLM backends",
    long_about = "Extract structured information (identity, addresses, education, employment, \
skills) from PDF resumes. Text is extracted locally; interpretation is delegated to a \
pluggable LLM backend (Ollama or OpenAI) and the reply is normalized into a fixed schema.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "RESUME2JSON_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "RESUME2JSON_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a single resume PDF file.
    Parse {
        /// Path to the resume PDF.
        pdf_file: PathBuf,

        /// Output file path (default: <input stem>.json beside the input).
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// Parse every resume PDF in a directory.
    Batch {
        /// Directory containing resume PDFs.
        directory: PathBuf,

        /// Output directory (default: same as the input directory).
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        provider: ProviderArgs,
    },
}

/// Provider flags shared by both subcommands.
#[derive(clap::Args, Debug)]
struct ProviderArgs {
    /// AI provider: ollama or openai.
    #[arg(long, default_value = "ollama")]
    provider: String,

    /// Model name (default: llama3 for ollama, gpt-4o-mini for openai).
    #[arg(long)]
    model: Option<String>,

    /// OpenAI API key (overrides the environment variable).
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Ollama server URL (default: http://localhost:11434).
    #[arg(long, env = "OLLAMA_BASE_URL")]
    ollama_base_url: Option<String>,
}

impl ProviderArgs {
    fn into_config(self) -> Result<ParseConfig> {
        let mut builder = ParseConfig::builder().provider(self.provider);
        if let Some(model) = self.model {
            builder = builder.model(model);
        }
        if let Some(key) = self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(url) = self.ollama_base_url {
            builder = builder.ollama_base_url(url);
        }
        builder.build().context("Invalid configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Parse {
            pdf_file,
            output,
            provider,
        } => {
            let config = provider.into_config()?;
            let out_path = parse_to_file(&pdf_file, output.as_deref(), &config)
                .await
                .with_context(|| format!("Failed to parse '{}'", pdf_file.display()))?;

            if !cli.quiet {
                eprintln!(
                    "{} Results saved to: {}",
                    green("✔"),
                    bold(&out_path.display().to_string())
                );
            }
        }
        Command::Batch {
            directory,
            output,
            provider,
        } => {
            let config = provider.into_config()?;
            run_batch(&directory, output.as_deref(), &config, cli.quiet).await?;
        }
    }

    Ok(())
}

/// Drive a batch run with a progress bar and per-file log lines.
///
/// Individual file failures are reported and tallied but never abort the
/// run or change the exit status.
async fn run_batch(
    directory: &std::path::Path,
    output: Option<&std::path::Path>,
    config: &ParseConfig,
    quiet: bool,
) -> Result<()> {
    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Parsing");
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    };

    let summary = {
        let bar = &bar;
        parse_dir_with_progress(directory, output, config, move |i, total, outcome| {
            if bar.length().unwrap_or(0) != total as u64 {
                bar.set_length(total as u64);
            }
            let name = outcome
                .input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match (&outcome.output, &outcome.error) {
                (Some(out), _) => bar.println(format!(
                    "  {} [{i}/{total}] {name}  {}",
                    green("✓"),
                    dim(&format!("→ {}", out.display()))
                )),
                (None, Some(err)) => bar.println(format!(
                    "  {} [{i}/{total}] {name}  {}",
                    red("✗"),
                    red(err.lines().next().unwrap_or(err.as_str()))
                )),
                (None, None) => {}
            }
            bar.inc(1);
        })
        .await
        .with_context(|| format!("Batch run failed for '{}'", directory.display()))?
    };

    bar.finish_and_clear();

    if !quiet {
        eprintln!("\nProcessed {} files:", summary.total);
        eprintln!("  Successful: {}", green(&summary.succeeded.to_string()));
        eprintln!("  Failed: {}", red(&summary.failed.to_string()));
    }

    Ok(())
}
