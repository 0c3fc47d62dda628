use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use pagegraph_core::{ExtractionStats, NodeCollection, ProgressEvent};

/// Number of connection words shown per node in a dry run.
const PREVIEW_WORDS: usize = 12;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print a per-page progress event worth surfacing to the user.
///
/// Only pages without a title and pages that failed are reported; the
/// rest is left to the progress bar and `RUST_LOG=debug`.
pub fn print_progress(
    w: &mut dyn Write,
    event: &ProgressEvent,
    color: ColorMode,
) -> std::io::Result<()> {
    match event {
        ProgressEvent::NoTitle { page } => {
            writeln!(w, "Page {}: No title found", page)?;
        }
        ProgressEvent::PageFailed { page, message } => {
            let line = format!("Page {}: unable to access page ({})", page, message);
            if color.enabled() {
                writeln!(w, "{}", line.red())?;
            } else {
                writeln!(w, "{}", line)?;
            }
        }
        ProgressEvent::PageStarted { .. } | ProgressEvent::NodeBuilt { .. } => {}
    }
    Ok(())
}

/// Print the raw text of one page, as extracted by the backend.
pub fn print_page_text(
    w: &mut dyn Write,
    page: usize,
    text: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", format!("Page {}:", page).bold().cyan())?;
    } else {
        writeln!(w, "Page {}:", page)?;
    }
    writeln!(w, "{}", text)?;
    Ok(())
}

/// Print every node without writing the output file.
pub fn print_dry_run(
    w: &mut dyn Write,
    file_name: &str,
    nodes: &NodeCollection,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "{} {} ({} pages)\n",
            "DRY RUN:".bold().cyan(),
            file_name.bold(),
            nodes.len()
        )?;
    } else {
        writeln!(w, "DRY RUN: {} ({} pages)\n", file_name, nodes.len())?;
    }

    for node in nodes {
        if color.enabled() {
            writeln!(w, "{}", format!("[page {}]", node.page).bold().yellow())?;
        } else {
            writeln!(w, "[page {}]", node.page)?;
        }

        if node.has_title() {
            writeln!(w, "  Title: {}", node.id)?;
        } else if color.enabled() {
            writeln!(w, "  Title: {}", "(none)".dimmed())?;
        } else {
            writeln!(w, "  Title: (none)")?;
        }

        let preview: Vec<&str> = node
            .connections
            .iter()
            .take(PREVIEW_WORDS)
            .map(String::as_str)
            .collect();
        let more = node.connections.len().saturating_sub(PREVIEW_WORDS);
        let mut words = preview.join(" ");
        if more > 0 {
            words.push_str(&format!(" ... (+{} more)", more));
        }
        writeln!(w, "  Words: {} {}", node.connections.len(), words)?;
        writeln!(w)?;
    }
    Ok(())
}

/// Print the end-of-run summary.
pub fn print_summary(
    w: &mut dyn Write,
    stats: &ExtractionStats,
    output: Option<&Path>,
    color: ColorMode,
) -> std::io::Result<()> {
    let summary = format!(
        "{} pages: {} titled, {} untitled, {} unreadable; {} words kept, {} dropped",
        stats.pages,
        stats.titled,
        stats.untitled,
        stats.failed,
        stats.words_kept,
        stats.words_dropped
    );
    if color.enabled() {
        writeln!(w, "{}", summary.dimmed())?;
    } else {
        writeln!(w, "{}", summary)?;
    }

    if let Some(path) = output {
        if color.enabled() {
            writeln!(w, "JSON output written to {}", path.display().green())?;
        } else {
            writeln!(w, "JSON output written to {}", path.display())?;
        }
    }
    Ok(())
}
