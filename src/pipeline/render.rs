//! Markdown rendering: the pipeline's only output format.
//!
//! Pure string assembly — no I/O, no failure modes. The section order and
//! whitespace convention are fixed and covered byte-for-byte by tests, so
//! downstream consumers (and diffs of regenerated summaries) stay stable.

use crate::output::{Citation, SummaryRecord};

/// Render the summary (and citation, when present) as a Markdown document.
///
/// Structure, in order: title heading, Authors, Synopsis, an empty
/// Significance section left for the reader's own notes, and — only when a
/// citation was found — a Reference section.
pub fn render_markdown(summary: &SummaryRecord, citation: Option<&Citation>) -> String {
    let title = if summary.title.is_empty() {
        "N/A"
    } else {
        summary.title.as_str()
    };
    let authors = summary.authors.join(", ");

    let mut markdown = format!(
        "## {title}\n\n### Authors\n{authors}\n\n### Synopsis\n{synopsis}\n\n### Significance\n\n",
        synopsis = summary.synopsis,
    );

    if let Some(citation) = citation {
        markdown.push_str("### Reference\n");
        markdown.push_str(&reference_line(citation));
        markdown.push('\n');
    }

    markdown
}

/// One-line reference: `authors, "title," container, year`, with the
/// optional parts simply omitted when absent.
fn reference_line(citation: &Citation) -> String {
    let mut line = String::new();

    let authors = citation
        .authors
        .iter()
        .map(|a| a.display_name())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !authors.is_empty() {
        line.push_str(&authors);
        line.push_str(", ");
    }

    line.push_str(&format!("\"{},\"", citation.title));

    match (citation.container_title.as_deref(), citation.year) {
        (Some(container), Some(year)) => line.push_str(&format!(" {container}, {year}")),
        (Some(container), None) => line.push_str(&format!(" {container}")),
        (None, Some(year)) => line.push_str(&format!(" {year}")),
        (None, None) => {}
    }

    line
}
