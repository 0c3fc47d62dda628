use thiserror::Error;

/// Default number of header lines skipped before looking for a title.
pub const DEFAULT_HEADER_LINES: usize = 3;

/// Default token length treated as noise (OCR debris, abbreviations).
pub const DEFAULT_NOISE_TOKEN_LEN: usize = 2;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("noise token length must be at least 1")]
    ZeroNoiseLength,
}

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListOverride<T> {
    /// Use the defaults as-is.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

/// Configuration for the page-to-node pipeline.
///
/// Use [`ParsingConfigBuilder`] to construct a validated non-default config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingConfig {
    // ── title.rs ──
    /// Lines skipped unconditionally at the top of every page (default: 3).
    pub(crate) header_lines: usize,

    // ── stopwords.rs ──
    /// Tokens of exactly this many characters are dropped (default: 2).
    pub(crate) noise_token_len: usize,
    /// Adjustments applied to the ignore list loaded from disk.
    pub(crate) ignore_words: ListOverride<String>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            header_lines: DEFAULT_HEADER_LINES,
            noise_token_len: DEFAULT_NOISE_TOKEN_LEN,
            ignore_words: ListOverride::Default,
        }
    }
}

impl ParsingConfig {
    pub fn header_lines(&self) -> usize {
        self.header_lines
    }

    pub fn noise_token_len(&self) -> usize {
        self.noise_token_len
    }

    pub fn ignore_words(&self) -> &ListOverride<String> {
        &self.ignore_words
    }
}

/// Builder for [`ParsingConfig`].
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    header_lines: Option<usize>,
    noise_token_len: Option<usize>,
    ignore_words: ListOverride<String>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header_lines(mut self, n: usize) -> Self {
        self.header_lines = Some(n);
        self
    }

    pub fn noise_token_len(mut self, n: usize) -> Self {
        self.noise_token_len = Some(n);
        self
    }

    /// Ignore only these words, discarding whatever was loaded from disk.
    pub fn set_ignore_words(mut self, words: Vec<String>) -> Self {
        self.ignore_words = ListOverride::Replace(words);
        self
    }

    pub fn add_ignore_word(mut self, word: String) -> Self {
        match &mut self.ignore_words {
            ListOverride::Extend(v) | ListOverride::Replace(v) => v.push(word),
            ListOverride::Default => self.ignore_words = ListOverride::Extend(vec![word]),
        }
        self
    }

    pub fn build(self) -> Result<ParsingConfig, ConfigError> {
        let noise_token_len = self.noise_token_len.unwrap_or(DEFAULT_NOISE_TOKEN_LEN);
        if noise_token_len == 0 {
            return Err(ConfigError::ZeroNoiseLength);
        }
        Ok(ParsingConfig {
            header_lines: self.header_lines.unwrap_or(DEFAULT_HEADER_LINES),
            noise_token_len,
            ignore_words: self.ignore_words,
        })
    }
}
