//! CLI binary for pdfsum.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SummarizeConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfsum::{
    default_output_path, summarize, summarize_to_file, PipelineObserver, Stage, SummarizeConfig,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress observer using indicatif ────────────────────────────────────

/// Terminal spinner that tracks the pipeline's stages.
struct SpinnerObserver {
    bar: ProgressBar,
}

impl SpinnerObserver {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl PipelineObserver for SpinnerObserver {
    fn on_stage_start(&self, stage: Stage) {
        self.bar.set_message(format!("{}…", stage.as_str()));
    }

    fn on_stage_complete(&self, stage: Stage) {
        self.bar
            .println(format!("  {} {}", green("✓"), stage.as_str()));
    }

    fn on_stage_skipped(&self, stage: Stage, reason: &str) {
        self.bar
            .println(format!("  {} {} ({})", dim("–"), stage.as_str(), dim(reason)));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarize to paper.pdf.md
  pdfsum paper.pdf

  # Choose the destination
  pdfsum paper.pdf -o summary.md

  # Print to stdout instead of writing a file
  pdfsum --stdout paper.pdf

  # Pin a model instead of auto-discovering one
  pdfsum --model gemini-2.0-flash paper.pdf

  # Skip the Crossref lookup
  pdfsum --no-citation paper.pdf

  # Structured JSON result (summary, citation, stats)
  pdfsum --json paper.pdf

CREDENTIALS:
  The Gemini API key is read from, in order:
    1. the GOOGLE_API_KEY environment variable
    2. ~/.config/gemini.token (plain text, whitespace trimmed)

ENVIRONMENT VARIABLES:
  GOOGLE_API_KEY     Gemini API key
  PDFSUM_OUTPUT      Default for --output
  PDFSUM_MODEL       Default for --model
  PDFSUM_MAILTO      Default for --mailto

CITATION LOOKUP:
  The summary's title and first author are queried against Crossref for
  the single most relevant match. Supplying --mailto routes requests to
  Crossref's polite pool, which is faster and more generous with limits.
  A failed or empty lookup never fails the run; the Reference section is
  simply omitted.
"#;

/// Summarize PDF documents with Google Gemini.
#[derive(Parser, Debug)]
#[command(
    name = "pdfsum",
    version,
    about = "Summarize PDF documents with Google Gemini",
    long_about = "Extract the text of a PDF, generate a structured summary (title, authors, \
synopsis) with Google Gemini, resolve the formal citation from Crossref, and write the result \
as Markdown.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file to summarize.
    input: PathBuf,

    /// Write Markdown to this file (default: input path + ".md").
    #[arg(short, long, env = "PDFSUM_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the Markdown to stdout instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Gemini model ID (e.g. gemini-2.0-flash).
    #[arg(
        long,
        env = "PDFSUM_MODEL",
        long_help = "Gemini model to use. When omitted, the model list is fetched and the \
first model supporting generateContent is used; the choice is logged."
    )]
    model: Option<String>,

    /// Skip the Crossref citation lookup.
    #[arg(long, env = "PDFSUM_NO_CITATION")]
    no_citation: bool,

    /// Contact e-mail sent to Crossref (polite pool).
    #[arg(long, env = "PDFSUM_MAILTO")]
    mailto: Option<String>,

    /// Output the structured result as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Per-request API timeout in seconds.
    #[arg(long, env = "PDFSUM_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Disable the progress spinner.
    #[arg(long, env = "PDFSUM_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFSUM_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the result.
    #[arg(short, long, env = "PDFSUM_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner provides the user-facing feedback; suppress INFO-level
    // library logs while it is active so the two don't interleave.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let spinner = if show_progress {
        Some(SpinnerObserver::new())
    } else {
        None
    };

    let mut builder = SummarizeConfig::builder()
        .lookup_citation(!cli.no_citation)
        .api_timeout_secs(cli.api_timeout);
    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref mailto) = cli.mailto {
        builder = builder.mailto(mailto);
    }
    if let Some(ref s) = spinner {
        builder = builder.observer(Arc::clone(s) as Arc<dyn PipelineObserver>);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run the pipeline ─────────────────────────────────────────────────
    let output_path = (!cli.stdout && !cli.json).then(|| {
        cli.output
            .clone()
            .unwrap_or_else(|| default_output_path(&cli.input))
    });
    let result = match output_path {
        Some(ref path) => summarize_to_file(&cli.input, path, &config).await,
        None => summarize(&cli.input, &config).await,
    };

    if let Some(ref s) = spinner {
        s.finish();
    }
    let output = result.context("Summarization failed")?;

    // ── Print results ────────────────────────────────────────────────────
    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if cli.stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(output.markdown.as_bytes())
            .context("Failed to write to stdout")?;
    } else if !cli.quiet {
        let output_path = output_path.expect("file mode always has a destination");
        eprintln!(
            "{}  {}  {}ms  →  {}",
            green("✔"),
            dim(&format!("{} chars extracted", output.stats.extracted_chars)),
            output.stats.total_duration_ms,
            bold(&output_path.display().to_string()),
        );
        if output.citation.is_none() && !cli.no_citation {
            eprintln!("   {}", dim("no citation found"));
        }
    }

    Ok(())
}
