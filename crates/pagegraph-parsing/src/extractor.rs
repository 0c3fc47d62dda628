use std::path::Path;

use crate::config::ParsingConfig;
use crate::stopwords::{self, IgnoreSet};
use crate::{ParsingError, text_processing, title};
use crate::{
    Document, DocumentBackend, ExtractionResult, ExtractionStats, Node, NodeCollection,
    ProgressEvent,
};

/// A configurable page-to-node pipeline.
///
/// Holds a [`ParsingConfig`] and the run's [`IgnoreSet`], and exposes each
/// step as a method. The ignore set is applied read-only to every page.
pub struct NodeExtractor {
    config: ParsingConfig,
    ignore: IgnoreSet,
}

/// A node together with per-page bookkeeping for stats and progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltNode {
    pub node: Node,
    /// False when the title heuristic ran out of lines.
    pub title_found: bool,
    /// Tokens removed by the stop-word filter.
    pub dropped: usize,
}

impl NodeExtractor {
    /// Create an extractor with default configuration.
    pub fn new(ignore: IgnoreSet) -> Self {
        Self::with_config(ParsingConfig::default(), ignore)
    }

    /// Create an extractor with a custom configuration. The config's
    /// ignore-word override is applied to `ignore` here, once.
    pub fn with_config(config: ParsingConfig, ignore: IgnoreSet) -> Self {
        let ignore = ignore.with_override(config.ignore_words());
        Self { config, ignore }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Locate the title line of a raw page.
    pub fn extract_title(&self, page_text: &str) -> Option<String> {
        title::extract_title_with_header(page_text, self.config.header_lines)
    }

    /// Sanitize, tokenize and filter a raw page into its content words.
    pub fn content_words(&self, page_text: &str) -> Vec<String> {
        self.content_words_counted(page_text).0
    }

    fn content_words_counted(&self, page_text: &str) -> (Vec<String>, usize) {
        let tokens = text_processing::content_words(page_text);
        let total = tokens.len();
        let kept = stopwords::filter_with_len(tokens, &self.ignore, self.config.noise_token_len);
        let dropped = total - kept.len();
        (kept, dropped)
    }

    /// Build the node for one page. `page` is 1-based.
    pub fn build_node(&self, page: usize, page_text: &str) -> BuiltNode {
        let title = self.extract_title(page_text);
        let title_found = title.is_some();
        let (connections, dropped) = self.content_words_counted(page_text);
        BuiltNode {
            node: Node {
                id: title.unwrap_or_default(),
                page,
                connections,
            },
            title_found,
            dropped,
        }
    }

    /// Open `path` through `backend` and build one node per page.
    ///
    /// Only a failure to open the document is an error. Unreadable pages
    /// become placeholder nodes.
    pub fn extract_nodes(
        &self,
        path: &Path,
        backend: &dyn DocumentBackend,
        progress: impl FnMut(ProgressEvent),
    ) -> Result<ExtractionResult, ParsingError> {
        let document = backend.open(path)?;
        tracing::debug!(path = %path.display(), pages = document.page_count(), "opened document");
        Ok(self.extract_from_document(document.as_ref(), progress))
    }

    /// Walk every page of an opened document in index order.
    pub fn extract_from_document(
        &self,
        document: &dyn Document,
        mut progress: impl FnMut(ProgressEvent),
    ) -> ExtractionResult {
        let total = document.page_count();
        let mut nodes = NodeCollection::with_capacity(total);
        let mut stats = ExtractionStats {
            pages: total,
            ..Default::default()
        };

        for index in 0..total {
            let page = index + 1;
            progress(ProgressEvent::PageStarted { page, total });

            let page_text = match document.page_text(index) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(page, error = %e, "unable to access page, emitting placeholder");
                    stats.failed += 1;
                    stats.untitled += 1;
                    progress(ProgressEvent::PageFailed {
                        page,
                        message: e.to_string(),
                    });
                    nodes.push(Node::placeholder(page));
                    continue;
                }
            };

            let built = self.build_node(page, &page_text);
            if built.title_found {
                stats.titled += 1;
            } else {
                stats.untitled += 1;
                tracing::debug!(page, "no title found");
                progress(ProgressEvent::NoTitle { page });
            }
            stats.words_kept += built.node.connections.len();
            stats.words_dropped += built.dropped;

            progress(ProgressEvent::NodeBuilt {
                page,
                total,
                title: built.node.id.clone(),
                words: built.node.connections.len(),
            });
            nodes.push(built.node);
        }

        tracing::info!(
            pages = stats.pages,
            titled = stats.titled,
            failed = stats.failed,
            words = stats.words_kept,
            "extraction complete"
        );

        ExtractionResult { nodes, stats }
    }
}
