use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config_file;

pub use backend::{BackendError, Document, DocumentBackend};

/// Default JSON indent, matching the historical `output.json` layout.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// One page of a document, reduced to its heuristic title and content words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Derived title. Empty when the title heuristic found nothing.
    pub id: String,
    /// 1-based page number.
    pub page: usize,
    /// Filtered content words, in reading order (duplicates kept).
    pub connections: Vec<String>,
}

impl Node {
    /// Node emitted for a page the backend could not materialize.
    pub fn placeholder(page: usize) -> Self {
        Self {
            id: String::new(),
            page,
            connections: Vec::new(),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Ordered node list; insertion order is page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCollection {
    pub nodes: Vec<Node>,
}

impl NodeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Serialize as `{"nodes": [...]}` with `indent` spaces per level.
    pub fn to_json_pretty(&self, indent: usize) -> Result<String, serde_json::Error> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| {
            serde_json::Error::io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<'a> IntoIterator for &'a NodeCollection {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Statistics about a single extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub pages: usize,
    pub titled: usize,
    pub untitled: usize,
    /// Pages the backend failed to materialize (emitted as placeholders).
    pub failed: usize,
    pub words_kept: usize,
    pub words_dropped: usize,
}

/// Result of extracting nodes from a document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub nodes: NodeCollection,
    pub stats: ExtractionStats,
}

/// Progress events emitted while walking a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    PageStarted {
        page: usize,
        total: usize,
    },
    NodeBuilt {
        page: usize,
        total: usize,
        title: String,
        words: usize,
    },
    /// The title heuristic ran out of lines. The node is still emitted.
    NoTitle {
        page: usize,
    },
    /// The page could not be read; a placeholder node was emitted.
    PageFailed {
        page: usize,
        message: String,
    },
}
