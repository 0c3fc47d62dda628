use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub extraction: Option<ExtractionConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Lines skipped unconditionally at the top of each page.
    pub header_lines: Option<usize>,
    /// Tokens of exactly this length are dropped as noise.
    pub noise_token_len: Option<usize>,
    /// Words appended to the ignore list loaded from disk.
    pub extra_ignore_words: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON indent width in spaces.
    pub indent: Option<usize>,
}

/// Platform config directory path: `<config_dir>/pagegraph/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pagegraph").join("config.toml"))
}

/// Load config by cascading CWD `.pagegraph.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pagegraph.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_ex = base.extraction.unwrap_or_default();
    let over_ex = overlay.extraction.unwrap_or_default();
    let base_out = base.output.unwrap_or_default();
    let over_out = overlay.output.unwrap_or_default();

    ConfigFile {
        extraction: Some(ExtractionConfig {
            header_lines: over_ex.header_lines.or(base_ex.header_lines),
            noise_token_len: over_ex.noise_token_len.or(base_ex.noise_token_len),
            extra_ignore_words: over_ex.extra_ignore_words.or(base_ex.extra_ignore_words),
        }),
        output: Some(OutputConfig {
            indent: over_out.indent.or(base_out.indent),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lines_round_trip_toml() {
        let config = ConfigFile {
            extraction: Some(ExtractionConfig {
                header_lines: Some(5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.extraction.unwrap().header_lines, Some(5));
    }

    #[test]
    fn absent_fields_deserialize_as_none() {
        let toml_str = "[output]\nindent = 2\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert!(parsed.extraction.is_none());
        assert_eq!(parsed.output.unwrap().indent, Some(2));
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            extraction: Some(ExtractionConfig {
                header_lines: Some(3),
                noise_token_len: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            extraction: Some(ExtractionConfig {
                header_lines: Some(1),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).extraction.unwrap();
        assert_eq!(merged.header_lines, Some(1));
        assert_eq!(merged.noise_token_len, Some(2));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            output: Some(OutputConfig { indent: Some(8) }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.output.unwrap().indent, Some(8));
    }

    #[test]
    fn load_from_path_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        assert!(load_from_path(&path).is_none());
        assert!(load_from_path(&dir.path().join("missing.toml")).is_none());
    }

    #[test]
    fn written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = ConfigFile {
            extraction: Some(ExtractionConfig {
                extra_ignore_words: Some(vec!["figure".into(), "table".into()]),
                ..Default::default()
            }),
            output: Some(OutputConfig { indent: Some(2) }),
        };
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(load_from_path(&path), Some(config));
    }
}
