use std::path::Path;

use mupdf::{Document as MuDocument, TextPageFlags};

use pagegraph_core::{BackendError, Document, DocumentBackend};

/// MuPDF-based implementation of [`DocumentBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (AGPL-3.0) so the pipeline crates do not transitively depend on it.
///
/// Page text is produced block by block, one `\n` per text line, so the
/// running header a page prints at the top shows up as its first lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBackend for MupdfBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn Document>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            MuDocument::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;
        let page_count = document
            .page_count()
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        tracing::debug!(path = path_str, page_count, "mupdf document opened");

        Ok(Box::new(MupdfDocument {
            document,
            page_count: usize::try_from(page_count).unwrap_or(0),
        }))
    }
}

/// An open MuPDF document. Dropping it releases the MuPDF handle.
pub struct MupdfDocument {
    document: MuDocument,
    page_count: usize,
}

impl Document for MupdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        let page_err = |message: String| BackendError::PageError {
            page: index + 1,
            message,
        };

        let page_no = i32::try_from(index).map_err(|e| page_err(e.to_string()))?;
        // The page and its text page are dropped at the end of this call.
        let page = self
            .document
            .load_page(page_no)
            .map_err(|e| page_err(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| page_err(e.to_string()))?;

        let mut page_text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                page_text.push_str(&line_text);
                page_text.push('\n');
            }
        }

        // Expand typographic ligatures (ﬁ → fi, ﬂ → fl, etc.)
        Ok(expand_ligatures(&page_text))
    }
}

/// Expand common typographic ligatures found in PDFs.
///
/// Word sanitization keeps ASCII letters only, so an unexpanded `ﬁ` would
/// split "ﬁnding" into "nding".
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_ligatures() {
        assert_eq!(expand_ligatures("ﬁgure ﬂoor"), "figure floor");
        assert_eq!(expand_ligatures("traﬃc baﬄe"), "traffic baffle");
        assert_eq!(expand_ligatures("plain text"), "plain text");
    }

    #[test]
    fn test_missing_file_fails_to_open() {
        let backend = MupdfBackend::new();
        let result = backend.open(Path::new("/definitely/not/here.pdf"));
        assert!(matches!(result, Err(BackendError::OpenError(_))));
    }
}
