//! # pdfsum
//!
//! Summarize PDF documents with Google Gemini.
//!
//! ## What it does
//!
//! Extracts the text of a PDF, asks a generative model for a structured
//! summary (title, authors, synopsis), optionally resolves the formal
//! citation from Crossref, and renders everything as a small Markdown
//! document.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Extract   per-page text via lopdf (CPU-bound, spawn_blocking)
//!  ├─ 2. Resolve   API key (env var / token file) + model discovery
//!  ├─ 3. Generate  Gemini generateContent, JSON response mode
//!  ├─ 4. Citation  Crossref best-match lookup (best-effort)
//!  └─ 5. Output    rendered Markdown, atomic file write
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfsum::{summarize, SummarizeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Key read from GOOGLE_API_KEY or ~/.config/gemini.token
//!     let config = SummarizeConfig::default();
//!     let output = summarize("paper.pdf", &config).await?;
//!     println!("{}", output.markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfsum` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! pdfsum = { version = "0.4", default-features = false }
//! ```
//!
//! ## Testing against stand-ins
//!
//! Both remote services sit behind narrow traits
//! ([`backend::TextGenerator`], [`backend::CitationSource`]) that can be
//! injected through [`SummarizeConfig`], so the whole pipeline runs
//! deterministically without a network.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod summarize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SummarizeConfig, SummarizeConfigBuilder};
pub use error::{LookupError, SummarizeError};
pub use output::{Citation, CitationAuthor, PipelineStats, SummaryOutput, SummaryRecord};
pub use progress::{NoopObserver, Observer, PipelineObserver, Stage};
pub use summarize::{default_output_path, summarize, summarize_sync, summarize_to_file};
