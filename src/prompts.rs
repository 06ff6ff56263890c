//! Prompt templates for the summary-generation call.
//!
//! Centralising the prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tightening an instruction (e.g. how
//!    author names should be split) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the assembled prompt
//!    without calling a live model, so prompt regressions are caught by
//!    string assertions.

/// Instructions preceding the document text in the generation request.
///
/// The model is asked for a bare JSON object with exactly three keys and
/// told to leave values empty rather than invent them. Combined with the
/// API-level JSON response mode this is what lets the reply be parsed
/// strictly, with missing keys defaulting instead of failing.
pub const SUMMARY_INSTRUCTIONS: &str = r#"You will be given the extracted text of a document. Respond with a single JSON object and nothing else — no prose, no markdown fences.

The object must have exactly these three keys:

  "title"    — the document's title as a string
  "authors"  — the document's authors as an array of strings, in the order listed
  "synopsis" — a concise summary of the document's content, one to three paragraphs, as a string

If a value cannot be determined from the text, use an empty string (or an empty array for "authors"). Do not guess and do not add keys."#;

/// Assemble the full prompt for a document's extracted text.
pub fn build_summary_prompt(document_text: &str) -> String {
    format!(
        "{SUMMARY_INSTRUCTIONS}\n\nDocument text:\n\"\"\"\n{document_text}\n\"\"\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_document_text() {
        let prompt = build_summary_prompt("the quick brown fox");
        assert!(prompt.contains("the quick brown fox"));
        assert!(prompt.starts_with(SUMMARY_INSTRUCTIONS));
    }

    #[test]
    fn instructions_name_all_three_keys() {
        for key in ["\"title\"", "\"authors\"", "\"synopsis\""] {
            assert!(SUMMARY_INSTRUCTIONS.contains(key), "missing {key}");
        }
    }
}
