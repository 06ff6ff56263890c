//! Output types: the structured summary, the optional citation, and
//! per-run statistics.
//!
//! Everything here derives `Serialize` so the CLI's `--json` mode can emit
//! the whole [`SummaryOutput`] without a separate view type.

use serde::{Deserialize, Serialize};

/// The structured result extracted from a document by the generative model.
///
/// Deserialized directly from the model's JSON reply. Every field carries
/// `#[serde(default)]`: a key the model could not determine (or omitted
/// entirely) decays to an empty value instead of failing the parse. Only a
/// reply whose top level is not a JSON object is treated as malformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Document title, empty if the model could not determine it.
    #[serde(default)]
    pub title: String,

    /// Author names in the order they appear on the document.
    #[serde(default)]
    pub authors: Vec<String>,

    /// A short synopsis of the document's content.
    #[serde(default)]
    pub synopsis: String,
}

impl SummaryRecord {
    /// First listed author, if any and non-empty.
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str).filter(|a| !a.is_empty())
    }
}

/// One author of a bibliographic record, split the way Crossref reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationAuthor {
    /// Given name(s), may be empty.
    #[serde(default)]
    pub given: String,
    /// Family name, may be empty.
    #[serde(default)]
    pub family: String,
}

impl CitationAuthor {
    /// "Given Family" with whatever parts are present.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given, self.family).trim().to_string()
    }
}

/// The best-matching bibliographic record for a summarized document.
///
/// Produced only when the summary yielded both a title and a first author;
/// absent otherwise, and absent whenever the lookup fails or matches
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// All listed authors, order preserved, duplicates dropped.
    pub authors: Vec<CitationAuthor>,
    /// The record's title.
    pub title: String,
    /// Journal or venue, when the record carries one.
    pub container_title: Option<String>,
    /// Publication year, when the record carries one.
    pub year: Option<i32>,
}

/// Timing and size statistics for one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Characters of text extracted from the document.
    pub extracted_chars: usize,
    /// Wall-clock time spent extracting text.
    pub extract_duration_ms: u64,
    /// Wall-clock time spent in the generative-model call.
    pub generate_duration_ms: u64,
    /// Wall-clock time spent in the citation lookup (0 when skipped).
    pub lookup_duration_ms: u64,
    /// Total pipeline wall-clock time.
    pub total_duration_ms: u64,
}

/// Complete result of a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutput {
    /// The rendered Markdown document.
    pub markdown: String,
    /// The structured summary the Markdown was rendered from.
    pub summary: SummaryRecord,
    /// The citation, when one was found.
    pub citation: Option<Citation>,
    /// Per-stage statistics.
    pub stats: PipelineStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_record_defaults_missing_keys() {
        let rec: SummaryRecord = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert_eq!(rec.title, "T");
        assert!(rec.authors.is_empty());
        assert!(rec.synopsis.is_empty());
    }

    #[test]
    fn summary_record_rejects_non_object() {
        assert!(serde_json::from_str::<SummaryRecord>(r#""just a string""#).is_err());
        assert!(serde_json::from_str::<SummaryRecord>("[1,2,3]").is_err());
    }

    #[test]
    fn first_author_skips_empty() {
        let rec = SummaryRecord {
            authors: vec![String::new(), "B".into()],
            ..Default::default()
        };
        assert_eq!(rec.first_author(), None);

        let rec = SummaryRecord {
            authors: vec!["A".into()],
            ..Default::default()
        };
        assert_eq!(rec.first_author(), Some("A"));
    }

    #[test]
    fn citation_author_display_name() {
        let a = CitationAuthor {
            given: "Ada".into(),
            family: "Lovelace".into(),
        };
        assert_eq!(a.display_name(), "Ada Lovelace");

        let family_only = CitationAuthor {
            given: String::new(),
            family: "Euler".into(),
        };
        assert_eq!(family_only.display_name(), "Euler");
    }
}
