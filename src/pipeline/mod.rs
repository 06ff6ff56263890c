//! Pipeline stages for document summarization.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. a different extraction backend) without touching
//! the others.
//!
//! ## Data Flow
//!
//! ```text
//! path ──▶ extract ──▶ generate ──▶ citation ──▶ render
//!          (lopdf)     (Gemini)     (Crossref)   (pure)
//! ```
//!
//! 1. [`extract`]  — validate the input file and pull the text of every
//!    page, in order; runs in `spawn_blocking` because lopdf is CPU-bound
//! 2. [`generate`] — build the prompt, call the generative backend, parse
//!    its JSON reply into a [`crate::output::SummaryRecord`]
//! 3. [`citation`] — best-effort bibliographic lookup; never fails the run
//! 4. [`render`]   — pure Markdown assembly of the final document

pub mod citation;
pub mod extract;
pub mod generate;
pub mod render;
