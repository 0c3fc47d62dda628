use std::ffi::OsString;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use indicatif::{ProgressBar, ProgressStyle};

use pagegraph_core::config_file::{self, ConfigFile};
use pagegraph_core::{DEFAULT_JSON_INDENT, DocumentBackend, ProgressEvent};
use pagegraph_parsing::{NodeExtractor, ParsingConfig, ParsingConfigBuilder, load_ignore_words};
use pagegraph_pdf_mupdf::MupdfBackend;

mod output;

use output::ColorMode;

/// PDF page graph builder - one node per page with a guessed title and its content words
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PDF to read
    pdf_path: PathBuf,

    /// Stop-word list, one word per line (a missing file means no stop words)
    ignore_words_path: PathBuf,

    /// Where to write the JSON node graph
    output_path: PathBuf,

    /// Lines skipped at the top of each page before looking for a title
    #[arg(long)]
    header_lines: Option<usize>,

    /// Drop tokens of exactly this length
    #[arg(long)]
    noise_token_len: Option<usize>,

    /// JSON indent width
    #[arg(long)]
    indent: Option<usize>,

    /// Config file to use instead of the platform/CWD cascade
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print each page's raw text before building nodes
    #[arg(long)]
    dump_text: bool,

    /// Print the nodes instead of writing the output file
    #[arg(long)]
    dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}

/// Parse arguments, mapping usage errors to exit status 1.
fn parse_args() -> Cli {
    match parse_args_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let code = usage_exit_code(&e);
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

fn parse_args_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// `--help` and `--version` succeed; every other parse failure is a usage error.
fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => config_file::load_from_path(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?,
        None => config_file::load_config(),
    };
    let parsing_config = resolve_parsing_config(&cli, &file_config)?;
    let indent = cli
        .indent
        .or_else(|| file_config.output.as_ref().and_then(|o| o.indent))
        .unwrap_or(DEFAULT_JSON_INDENT);

    let color = ColorMode(!cli.no_color && std::io::stdout().is_terminal());
    let mut stdout = std::io::stdout();

    if !cli.pdf_path.exists() {
        anyhow::bail!("File not found: {}", cli.pdf_path.display());
    }

    let ignore = load_ignore_words(&cli.ignore_words_path);
    let extractor = NodeExtractor::with_config(parsing_config, ignore);

    let backend = MupdfBackend::new();
    let document = backend
        .open(&cli.pdf_path)
        .with_context(|| format!("Unable to open PDF file: {}", cli.pdf_path.display()))?;

    if cli.dump_text {
        for index in 0..document.page_count() {
            match document.page_text(index) {
                Ok(text) => output::print_page_text(&mut stdout, index + 1, &text, color)?,
                Err(e) => tracing::warn!(page = index + 1, error = %e, "skipping page text"),
            }
        }
    }

    let bar = ProgressBar::new(document.page_count() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} Reading pages [{bar:40.green/dim}] {pos}/{len}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> "),
    );

    let result = extractor.extract_from_document(document.as_ref(), |event| {
        if let ProgressEvent::NodeBuilt { .. } | ProgressEvent::PageFailed { .. } = event {
            bar.inc(1);
        }
        let mut line = Vec::new();
        if output::print_progress(&mut line, &event, color).is_ok() && !line.is_empty() {
            bar.suspend(|| {
                let _ = stdout.write_all(&line);
            });
        }
    });
    bar.finish_and_clear();
    // Release the document before writing output.
    drop(document);

    let file_name = cli
        .pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.pdf_path.display().to_string());

    if cli.dry_run {
        output::print_dry_run(&mut stdout, &file_name, &result.nodes, color)?;
        output::print_summary(&mut stdout, &result.stats, None, color)?;
        return Ok(());
    }

    write_output(&cli.output_path, &result.nodes, indent)?;
    output::print_summary(&mut stdout, &result.stats, Some(&cli.output_path), color)?;
    Ok(())
}

fn write_output(
    path: &Path,
    nodes: &pagegraph_core::NodeCollection,
    indent: usize,
) -> anyhow::Result<()> {
    let json = nodes.to_json_pretty(indent)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;
    Ok(())
}

/// Resolve extraction settings: CLI flags > env vars > config file > defaults.
fn resolve_parsing_config(cli: &Cli, file: &ConfigFile) -> anyhow::Result<ParsingConfig> {
    let extraction = file.extraction.clone().unwrap_or_default();

    let header_lines = cli
        .header_lines
        .or_else(|| env_usize("PAGEGRAPH_HEADER_LINES"))
        .or(extraction.header_lines);
    let noise_token_len = cli
        .noise_token_len
        .or_else(|| env_usize("PAGEGRAPH_NOISE_TOKEN_LEN"))
        .or(extraction.noise_token_len);

    let mut builder = ParsingConfigBuilder::new();
    if let Some(n) = header_lines {
        builder = builder.header_lines(n);
    }
    if let Some(n) = noise_token_len {
        builder = builder.noise_token_len(n);
    }
    for word in extraction.extra_ignore_words.unwrap_or_default() {
        builder = builder.add_ignore_word(word);
    }
    Ok(builder.build()?)
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagegraph_core::config_file::ExtractionConfig;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["pagegraph", "in.pdf", "ignore.txt", "out.json"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn requires_three_positionals() {
        let err = parse_args_from(["pagegraph", "in.pdf", "ignore.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(usage_exit_code(&err), 1);

        let err = parse_args_from(["pagegraph", "a", "b", "c", "d"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1);
    }

    #[test]
    fn bad_flag_value_is_a_usage_error() {
        let err = parse_args_from(["pagegraph", "a", "b", "c", "--indent", "wide"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1);
    }

    #[test]
    fn help_and_version_exit_cleanly() {
        let err = parse_args_from(["pagegraph", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(usage_exit_code(&err), 0);

        let err = parse_args_from(["pagegraph", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert_eq!(usage_exit_code(&err), 0);
    }

    #[test]
    fn defaults_without_flags_or_config() {
        let config = resolve_parsing_config(&cli(&[]), &ConfigFile::default()).unwrap();
        assert_eq!(config, ParsingConfig::default());
    }

    #[test]
    fn flag_beats_config_file() {
        let file = ConfigFile {
            extraction: Some(ExtractionConfig {
                header_lines: Some(5),
                noise_token_len: Some(3),
                extra_ignore_words: Some(vec!["figure".into()]),
            }),
            ..Default::default()
        };
        let config = resolve_parsing_config(&cli(&["--header-lines", "1"]), &file).unwrap();
        assert_eq!(config.header_lines(), 1);
        assert_eq!(config.noise_token_len(), 3);
        assert_eq!(
            config.ignore_words(),
            &pagegraph_parsing::ListOverride::Extend(vec!["figure".into()])
        );
    }

    #[test]
    fn zero_noise_length_is_rejected() {
        let result =
            resolve_parsing_config(&cli(&["--noise-token-len", "0"]), &ConfigFile::default());
        assert!(result.is_err());
    }

    #[test]
    fn write_output_creates_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let nodes = pagegraph_core::NodeCollection {
            nodes: vec![pagegraph_core::Node::placeholder(1)],
        };
        write_output(&path, &nodes, 4).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            pagegraph_core::NodeCollection::from_json(&written).unwrap(),
            nodes
        );
    }
}
