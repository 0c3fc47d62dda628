use std::path::Path;

use thiserror::Error;

pub mod config;
pub mod extractor;
pub mod stopwords;
pub mod text_processing;
pub mod title;

pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::{BuiltNode, NodeExtractor};
pub use stopwords::{IgnoreSet, load_ignore_words};
// Re-export domain types from core (canonical definitions live there)
pub use pagegraph_core::{
    BackendError, Document, DocumentBackend, ExtractionResult, ExtractionStats, Node,
    NodeCollection, ProgressEvent,
};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("backend error: {0}")]
    Backend(#[from] pagegraph_core::BackendError),
}

/// Build the node graph of a PDF using the given backend for page access.
///
/// Pipeline, per page in index order:
/// 1. Fetch raw page text via `backend`
/// 2. Guess the title from the line layout (skip header, skip blanks)
/// 3. Sanitize, lowercase and tokenize the text
/// 4. Drop ignored words and noise-length tokens
/// 5. Emit `Node { id: title, page, connections }`
pub fn extract_nodes(
    pdf_path: &Path,
    ignore: IgnoreSet,
    backend: &dyn DocumentBackend,
) -> Result<ExtractionResult, ParsingError> {
    NodeExtractor::new(ignore).extract_nodes(pdf_path, backend, |_| {})
}
