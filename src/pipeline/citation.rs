//! Citation lookup: best-effort, never fatal.
//!
//! The lookup runs only when the summary produced both a title and a
//! first author — there is nothing sensible to query otherwise. A backend
//! error and an empty result set are deliberately collapsed into the same
//! outcome: no citation, and the rendered document simply omits its
//! Reference section.

use crate::backend::CitationSource;
use crate::output::{Citation, SummaryRecord};
use tracing::{debug, warn};

/// Look up the best-matching bibliographic record for a summary.
///
/// Returns `None` when the summary lacks a title or first author, when the
/// service finds nothing, or when the lookup fails (logged at `warn!`).
pub async fn lookup_citation(
    source: &dyn CitationSource,
    summary: &SummaryRecord,
) -> Option<Citation> {
    if summary.title.is_empty() {
        debug!("skipping citation lookup: summary has no title");
        return None;
    }
    let Some(first_author) = summary.first_author() else {
        debug!("skipping citation lookup: summary has no first author");
        return None;
    };

    match source.lookup(&summary.title, first_author).await {
        Ok(Some(citation)) => {
            debug!("{}: matched '{}'", source.name(), citation.title);
            Some(citation)
        }
        Ok(None) => {
            debug!("{}: no match for '{}'", source.name(), summary.title);
            None
        }
        Err(e) => {
            warn!("{}: lookup failed, continuing without citation: {e}", source.name());
            None
        }
    }
}
