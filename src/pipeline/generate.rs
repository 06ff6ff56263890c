//! Summary generation: prompt the backend and parse its JSON reply.
//!
//! This stage is intentionally thin — all prompt wording lives in
//! [`crate::prompts`] and all transport concerns live behind
//! [`TextGenerator`], so what remains here is exactly the parsing
//! contract: the reply must be a JSON object; keys the model left out
//! default to empty values; anything else is a
//! [`SummarizeError::MalformedResponse`] that carries the raw text for
//! diagnosis instead of discarding it.

use crate::backend::TextGenerator;
use crate::error::SummarizeError;
use crate::output::SummaryRecord;
use crate::prompts::build_summary_prompt;
use tracing::debug;

/// Generate a structured summary of the extracted document text.
///
/// Returns the parsed record together with the backend's raw reply (useful
/// for `--json` output and debugging).
pub async fn generate_summary(
    generator: &dyn TextGenerator,
    document_text: &str,
) -> Result<(SummaryRecord, String), SummarizeError> {
    let prompt = build_summary_prompt(document_text);
    debug!(
        "requesting summary from {} ({} prompt chars)",
        generator.name(),
        prompt.len()
    );

    let raw = generator.generate(&prompt).await?;
    let summary = parse_summary(&raw)?;
    Ok((summary, raw))
}

/// Parse the model's reply strictly as a JSON object.
fn parse_summary(raw: &str) -> Result<SummaryRecord, SummarizeError> {
    serde_json::from_str::<SummaryRecord>(raw).map_err(|e| SummarizeError::MalformedResponse {
        detail: e.to_string(),
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedReply(&'static str);

    #[async_trait]
    impl TextGenerator for FixedReply {
        fn name(&self) -> &str {
            "fixed"
        }
        async fn generate(&self, _prompt: &str) -> Result<String, SummarizeError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn well_formed_reply_parses() {
        let backend = FixedReply(r#"{"title":"X","authors":["Y"],"synopsis":"Z"}"#);
        let (summary, raw) = generate_summary(&backend, "text").await.unwrap();
        assert_eq!(summary.title, "X");
        assert_eq!(summary.authors, vec!["Y"]);
        assert_eq!(summary.synopsis, "Z");
        assert!(raw.contains("\"title\""));
    }

    #[tokio::test]
    async fn missing_keys_default_to_empty() {
        let backend = FixedReply(r#"{"synopsis":"only this"}"#);
        let (summary, _) = generate_summary(&backend, "text").await.unwrap();
        assert!(summary.title.is_empty());
        assert!(summary.authors.is_empty());
        assert_eq!(summary.synopsis, "only this");
    }

    #[tokio::test]
    async fn non_json_reply_is_malformed_with_raw() {
        let backend = FixedReply("I'm sorry, I can't produce JSON today.");
        let err = generate_summary(&backend, "text").await.unwrap_err();
        assert_eq!(
            err.raw_response(),
            Some("I'm sorry, I can't produce JSON today.")
        );
    }

    #[tokio::test]
    async fn non_object_json_is_malformed() {
        let backend = FixedReply(r#"["not","an","object"]"#);
        let err = generate_summary(&backend, "text").await.unwrap_err();
        assert!(matches!(err, SummarizeError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        struct Failing;

        #[async_trait]
        impl TextGenerator for Failing {
            fn name(&self) -> &str {
                "failing"
            }
            async fn generate(&self, _prompt: &str) -> Result<String, SummarizeError> {
                Err(SummarizeError::GenerationFailed {
                    detail: "HTTP 503".into(),
                })
            }
        }

        let err = generate_summary(&Failing, "text").await.unwrap_err();
        assert!(matches!(err, SummarizeError::GenerationFailed { .. }));
    }
}
