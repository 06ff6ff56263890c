//! Pipeline driver: the top-level `summarize*` entry points.
//!
//! The pipeline is strictly linear — extract, resolve the backend,
//! generate, look up the citation, render — with each stage awaited to
//! completion before the next begins. Extraction runs first so a missing
//! or unreadable input fails before any credential is read or any network
//! call is attempted.
//!
//! Failure policy: extraction, backend resolution, and generation are
//! fatal; the citation stage degrades to "no citation"; file writes are
//! atomic (temp file + rename) so the destination either holds the full
//! document or nothing.

use crate::backend::crossref::CrossRefClient;
use crate::backend::gemini::GeminiClient;
use crate::backend::{CitationSource, TextGenerator};
use crate::config::SummarizeConfig;
use crate::error::SummarizeError;
use crate::output::{PipelineStats, SummaryOutput};
use crate::pipeline::{citation, extract, generate, render};
use crate::progress::Stage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Summarize a PDF document.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `pdf_path` — path to a local PDF file
/// * `config`   — pipeline configuration
///
/// # Errors
/// Returns `Err(SummarizeError)` for any fatal failure: unreadable input,
/// no credential, a failed or malformed generation. A failed citation
/// lookup is not an error; the output simply has `citation: None`.
pub async fn summarize(
    pdf_path: impl AsRef<Path>,
    config: &SummarizeConfig,
) -> Result<SummaryOutput, SummarizeError> {
    let total_start = Instant::now();
    let path = pdf_path.as_ref();
    info!("Starting summarization: {}", path.display());

    let observer = config.observer.clone();
    let stage_start = |s: Stage| {
        if let Some(ref obs) = observer {
            obs.on_stage_start(s);
        }
    };
    let stage_done = |s: Stage| {
        if let Some(ref obs) = observer {
            obs.on_stage_complete(s);
        }
    };

    // ── Stage 1: Extract text ────────────────────────────────────────────
    stage_start(Stage::Extract);
    let extract_started = Instant::now();
    let text = extract::extract_text(path).await?;
    let extract_duration_ms = extract_started.elapsed().as_millis() as u64;
    stage_done(Stage::Extract);
    info!("Extracted {} chars in {}ms", text.len(), extract_duration_ms);

    // ── Stage 2: Resolve the generative backend ──────────────────────────
    stage_start(Stage::ResolveBackend);
    let generator = resolve_generator(config).await?;
    stage_done(Stage::ResolveBackend);

    // ── Stage 3: Generate the summary ────────────────────────────────────
    stage_start(Stage::Generate);
    let generate_started = Instant::now();
    let (summary, _raw) = generate::generate_summary(generator.as_ref(), &text).await?;
    let generate_duration_ms = generate_started.elapsed().as_millis() as u64;
    stage_done(Stage::Generate);
    info!(
        "Summary generated in {}ms (title: {:?})",
        generate_duration_ms, summary.title
    );

    // ── Stage 4: Citation lookup (best-effort) ───────────────────────────
    let lookup_started = Instant::now();
    let found = if config.lookup_citation {
        stage_start(Stage::Citation);
        let found = match resolve_citation_source(config) {
            Ok(source) => citation::lookup_citation(source.as_ref(), &summary).await,
            Err(e) => {
                warn!("citation backend unavailable, continuing without: {e}");
                None
            }
        };
        match found {
            Some(_) => stage_done(Stage::Citation),
            None => {
                if let Some(ref obs) = observer {
                    obs.on_stage_skipped(Stage::Citation, "no citation found");
                }
            }
        }
        found
    } else {
        if let Some(ref obs) = observer {
            obs.on_stage_skipped(Stage::Citation, "lookup disabled");
        }
        None
    };
    let lookup_duration_ms = lookup_started.elapsed().as_millis() as u64;

    // ── Stage 5: Render ──────────────────────────────────────────────────
    stage_start(Stage::Render);
    let markdown = render::render_markdown(&summary, found.as_ref());
    stage_done(Stage::Render);

    let stats = PipelineStats {
        extracted_chars: text.len(),
        extract_duration_ms,
        generate_duration_ms,
        lookup_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!("Summarization complete in {}ms", stats.total_duration_ms);

    Ok(SummaryOutput {
        markdown,
        summary,
        citation: found,
        stats,
    })
}

/// Summarize a PDF and write the Markdown to a file.
///
/// Uses an atomic write (temp file + rename) so a failure part-way never
/// leaves a truncated document at the destination.
pub async fn summarize_to_file(
    pdf_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &SummarizeConfig,
) -> Result<SummaryOutput, SummarizeError> {
    let output = summarize(pdf_path, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                SummarizeError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = tmp_write_path(path);
    tokio::fs::write(&tmp_path, &output.markdown)
        .await
        .map_err(|e| SummarizeError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| SummarizeError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(output)
}

/// Synchronous wrapper around [`summarize`].
///
/// Creates a temporary tokio runtime internally.
pub fn summarize_sync(
    pdf_path: impl AsRef<Path>,
    config: &SummarizeConfig,
) -> Result<SummaryOutput, SummarizeError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| SummarizeError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(summarize(pdf_path, config))
}

/// Default output destination: the input path with `.md` appended
/// (`paper.pdf` → `paper.pdf.md`).
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut os = input.as_os_str().to_os_string();
    os.push(".md");
    PathBuf::from(os)
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Resolve the generative backend, most-specific first: a pre-built
/// generator from the config (tests, custom middleware), else a live
/// Gemini client — which is the only path that reads the credential.
async fn resolve_generator(
    config: &SummarizeConfig,
) -> Result<Arc<dyn TextGenerator>, SummarizeError> {
    if let Some(ref generator) = config.generator {
        return Ok(Arc::clone(generator));
    }
    let client = GeminiClient::from_config(config).await?;
    Ok(Arc::new(client))
}

/// Resolve the citation backend: config override, else a Crossref client.
fn resolve_citation_source(
    config: &SummarizeConfig,
) -> Result<Arc<dyn CitationSource>, SummarizeError> {
    if let Some(ref citations) = config.citations {
        return Ok(Arc::clone(citations));
    }
    let client = CrossRefClient::new(config)?;
    Ok(Arc::new(client))
}

/// Scratch path next to the destination, so the final rename stays on one
/// filesystem.
fn tmp_write_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_appends_md() {
        assert_eq!(
            default_output_path(Path::new("paper.pdf")),
            PathBuf::from("paper.pdf.md")
        );
        assert_eq!(
            default_output_path(Path::new("/docs/a.b.pdf")),
            PathBuf::from("/docs/a.b.pdf.md")
        );
    }

    #[test]
    fn tmp_path_sits_next_to_destination() {
        assert_eq!(
            tmp_write_path(Path::new("/out/paper.pdf.md")),
            PathBuf::from("/out/paper.pdf.md.tmp")
        );
    }
}
