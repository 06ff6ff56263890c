//! Error types for the pdfsum library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`SummarizeError`] — **Fatal**: the pipeline cannot produce an output
//!   file at all (missing input, no credential, generation failed). Returned
//!   as `Err(SummarizeError)` from the top-level `summarize*` functions.
//!
//! * [`LookupError`] — **Non-fatal**: the bibliographic lookup failed
//!   (Crossref unreachable, rate-limited, malformed reply). The citation
//!   stage logs it and degrades to "no citation"; the summary itself is
//!   unaffected and the Reference section is simply omitted.
//!
//! The separation keeps the driver honest: nothing in the citation path can
//! accidentally abort a run that already has a perfectly good summary.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdfsum library.
///
/// Citation-lookup failures use [`LookupError`] and never surface here.
#[derive(Debug, Error)]
pub enum SummarizeError {
    // ── Credential errors ─────────────────────────────────────────────────
    /// No API key in the environment and no token file on disk.
    #[error(
        "No API key found.\nSet the {env_var} environment variable, or write the key to '{token_file}'."
    )]
    CredentialNotFound { env_var: String, token_file: PathBuf },

    /// The token file exists but could not be read.
    ///
    /// Deliberately distinct from [`Self::CredentialNotFound`]: a permission
    /// problem or disk error must surface verbatim, not masquerade as
    /// "not configured".
    #[error("Failed to read credential file '{path}': {source}")]
    CredentialIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The document could not be parsed or its text could not be extracted.
    #[error("Failed to extract text from '{path}': {detail}")]
    ExtractionFailed { path: PathBuf, detail: String },

    // ── Generation errors ─────────────────────────────────────────────────
    /// The generative backend call failed (network, quota, empty reply).
    #[error("Summary generation failed: {detail}")]
    GenerationFailed { detail: String },

    /// The backend rejected the API key (401/403) — retry is pointless.
    #[error("Authentication failed: {detail}\nCheck that your API key is valid.")]
    AuthFailed { detail: String },

    /// The backend answered, but not with the JSON object we asked for.
    ///
    /// `raw` carries the full response text so the user can see what the
    /// model actually said instead of guessing.
    #[error("Model response was not the expected JSON object: {detail}\n--- raw response ---\n{raw}")]
    MalformedResponse { detail: String, raw: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SummarizeError {
    /// The raw backend response attached to a [`Self::MalformedResponse`].
    ///
    /// Returns `None` for every other variant.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            SummarizeError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// A non-fatal error from the citation backend.
///
/// The citation stage converts any of these into "no citation" after
/// logging; they exist as a type so tests and callers embedding the
/// [`crate::backend::CitationSource`] trait directly can still discriminate.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The service asked us to back off (HTTP 429).
    #[error("citation service rate limited the request (HTTP 429)")]
    RateLimited,

    /// Any other non-success HTTP status.
    #[error("citation service returned HTTP {status}")]
    Http { status: u16 },

    /// The request never completed (DNS, TLS, timeout).
    #[error("citation request failed: {0}")]
    Transport(String),

    /// The reply was not the JSON shape the service documents.
    #[error("citation response could not be decoded: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_not_found_names_both_sources() {
        let e = SummarizeError::CredentialNotFound {
            env_var: "GOOGLE_API_KEY".into(),
            token_file: PathBuf::from("/home/u/.config/gemini.token"),
        };
        let msg = e.to_string();
        assert!(msg.contains("GOOGLE_API_KEY"), "got: {msg}");
        assert!(msg.contains("gemini.token"), "got: {msg}");
    }

    #[test]
    fn malformed_response_keeps_raw_text() {
        let e = SummarizeError::MalformedResponse {
            detail: "expected object, got string".into(),
            raw: "Sorry, I cannot help with that.".into(),
        };
        assert_eq!(e.raw_response(), Some("Sorry, I cannot help with that."));
        assert!(e.to_string().contains("Sorry, I cannot help with that."));
    }

    #[test]
    fn raw_response_absent_on_other_variants() {
        let e = SummarizeError::GenerationFailed {
            detail: "HTTP 500".into(),
        };
        assert!(e.raw_response().is_none());
    }

    #[test]
    fn lookup_error_display() {
        assert!(LookupError::Http { status: 503 }.to_string().contains("503"));
        assert!(LookupError::RateLimited.to_string().contains("429"));
    }
}
