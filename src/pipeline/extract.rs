//! Text extraction: validate the input file and concatenate per-page text.
//!
//! ## Why spawn_blocking?
//!
//! lopdf parses the whole document synchronously and text extraction is
//! CPU-bound. `tokio::task::spawn_blocking` moves the work onto the
//! blocking thread pool so the async driver isn't stalled — the same
//! treatment the rest of the pipeline gives its blocking work.
//!
//! ## Page failures are not document failures
//!
//! An image-only or operator-less page has no text to give; lopdf reports
//! that as a per-page error. Those pages contribute the empty string and a
//! `warn!`, matching the contract that only an unloadable document fails
//! the run.

use crate::error::SummarizeError;
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

/// Extract the full text of a PDF: every page in page order, concatenated
/// with no separator.
///
/// Fails with [`SummarizeError::FileNotFound`] / `PermissionDenied` /
/// `NotAPdf` before parsing, and [`SummarizeError::ExtractionFailed`] when
/// the document itself cannot be loaded. Performs no network I/O.
pub async fn extract_text(pdf_path: &Path) -> Result<String, SummarizeError> {
    validate_input(pdf_path)?;

    let path = pdf_path.to_path_buf();
    tokio::task::spawn_blocking(move || extract_text_blocking(&path))
        .await
        .map_err(|e| SummarizeError::Internal(format!("Extraction task panicked: {e}")))?
}

/// Validate existence, readability, and the `%PDF` magic bytes.
fn validate_input(path: &Path) -> Result<(), SummarizeError> {
    if !path.exists() {
        return Err(SummarizeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(SummarizeError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(SummarizeError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(SummarizeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Blocking implementation of the extraction.
fn extract_text_blocking(path: &Path) -> Result<String, SummarizeError> {
    let doc = Document::load(path).map_err(|e| SummarizeError::ExtractionFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let pages = doc.get_pages();
    debug!("PDF loaded: {} pages", pages.len());

    let mut text = String::new();
    for (&page_num, _) in pages.iter() {
        match doc.extract_text(&[page_num]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                // No text operators on this page (image-only, blank).
                warn!("page {page_num}: no extractable text ({e})");
            }
        }
    }

    if text.is_empty() {
        warn!("document yielded no text at all: {}", path.display());
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn missing_file_is_file_not_found() {
        let err = extract_text(Path::new("/no/such/file.pdf")).await.unwrap_err();
        assert!(matches!(err, SummarizeError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn wrong_magic_is_not_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"this is not a pdf at all").unwrap();

        let err = extract_text(&path).await.unwrap_err();
        match err {
            SummarizeError::NotAPdf { magic, .. } => assert_eq!(&magic, b"this"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn truncated_pdf_is_extraction_failed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4\ngarbage").unwrap();

        let err = extract_text(&path).await.unwrap_err();
        assert!(matches!(err, SummarizeError::ExtractionFailed { .. }), "got {err:?}");
    }
}
