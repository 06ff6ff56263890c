//! Remote-service backends and the traits that abstract them.
//!
//! The pipeline never talks to a concrete service directly; it goes
//! through two narrow seams:
//!
//! * [`TextGenerator`] — turns a prompt into text. Implemented by
//!   [`gemini::GeminiClient`] for the real thing, and by trivial stubs in
//!   the test suite.
//! * [`CitationSource`] — looks up a bibliographic record by title and
//!   first author. Implemented by [`crossref::CrossRefClient`].
//!
//! Keeping the traits this small is the point: the driver's logic can be
//! exercised deterministically without any network, and swapping a backend
//! touches exactly one file.

pub mod crossref;
pub mod gemini;

use crate::error::{LookupError, SummarizeError};
use crate::output::Citation;
use async_trait::async_trait;

/// A generative-model backend: prompt in, text out.
///
/// Implementations are expected to request JSON-shaped output from their
/// service; the caller parses whatever text comes back.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Send the prompt and return the model's raw text reply.
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError>;
}

/// A bibliographic-metadata backend.
#[async_trait]
pub trait CitationSource: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Return the best-matching record for the given title and first
    /// author, or `None` when the service finds nothing.
    async fn lookup(&self, title: &str, author: &str) -> Result<Option<Citation>, LookupError>;
}
