use crate::config::DEFAULT_HEADER_LINES;
use crate::text_processing::trim_whitespace;

/// Scanner state for the positional title heuristic.
///
/// `HeaderSkip(n)` drops `n` more lines unconditionally, `BlankSkip` drops
/// empty lines, and the first non-empty line moves the scan to `Found`.
/// Running out of lines in either skip state ends in `Exhausted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleScan {
    HeaderSkip(usize),
    BlankSkip,
    Found(String),
    Exhausted,
}

impl TitleScan {
    pub fn new(header_lines: usize) -> Self {
        if header_lines == 0 {
            TitleScan::BlankSkip
        } else {
            TitleScan::HeaderSkip(header_lines)
        }
    }

    /// Feed the next line. Terminal states ignore further input.
    pub fn feed(self, line: &str) -> Self {
        match self {
            TitleScan::HeaderSkip(0) => TitleScan::BlankSkip.feed(line),
            TitleScan::HeaderSkip(1) => TitleScan::BlankSkip,
            TitleScan::HeaderSkip(n) => TitleScan::HeaderSkip(n - 1),
            TitleScan::BlankSkip if line.is_empty() => TitleScan::BlankSkip,
            TitleScan::BlankSkip => TitleScan::Found(trim_whitespace(line).to_string()),
            done => done,
        }
    }

    /// Signal end of input.
    pub fn finish(self) -> Self {
        match self {
            TitleScan::Found(title) => TitleScan::Found(title),
            _ => TitleScan::Exhausted,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TitleScan::Found(_) | TitleScan::Exhausted)
    }

    pub fn into_title(self) -> Option<String> {
        match self {
            TitleScan::Found(title) => Some(title),
            _ => None,
        }
    }
}

/// Guess a page title from raw page text.
///
/// Skips the first `header_lines` lines (running header: page number,
/// document name, date), then any empty lines, and returns the next line
/// trimmed. `None` means the page ran out of lines first. `Some("")` is
/// possible when the candidate line is whitespace only.
pub fn extract_title_with_header(page_text: &str, header_lines: usize) -> Option<String> {
    let mut scan = TitleScan::new(header_lines);
    for line in page_text.lines() {
        scan = scan.feed(line);
        if scan.is_done() {
            break;
        }
    }
    scan.finish().into_title()
}

/// [`extract_title_with_header`] with the default 3-line header.
pub fn extract_title(page_text: &str) -> Option<String> {
    extract_title_with_header(page_text, DEFAULT_HEADER_LINES)
}
