use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to read page {page}: {message}")]
    PageError { page: usize, message: String },
}

/// An opened document.
///
/// Implementors own whatever engine handles the document needs and release
/// them on drop, so callers can bail out early without leaking pages.
pub trait Document {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Raw text of the page at 0-based `index`, lines separated by `\n`.
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}

/// Trait for document loading backends.
///
/// Implementors provide the low-level open/extract step; the page-to-node
/// pipeline (title heuristic, sanitization, stop-word filtering) lives in
/// `pagegraph_parsing::NodeExtractor`.
pub trait DocumentBackend: Send + Sync {
    /// Open the document at `path`.
    fn open(&self, path: &Path) -> Result<Box<dyn Document>, BackendError>;
}
