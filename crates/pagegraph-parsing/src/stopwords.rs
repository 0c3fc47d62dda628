use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use crate::config::{DEFAULT_NOISE_TOKEN_LEN, ListOverride};

/// Lowercase words excluded from a page's connections.
///
/// Loaded once per run and passed by reference to every filter call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    words: HashSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one word per line. Lines are trimmed and lowercased; blank lines
    /// are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut set = Self::new();
        for line in reader.lines() {
            set.insert(&line?);
        }
        Ok(set)
    }

    /// Load an ignore list from a line-oriented file.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Insert a word after trimming and lowercasing it. Returns `false` for
    /// blank input or a word already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.words.insert(word.to_lowercase())
    }

    /// Membership test. `word` is expected to be lowercase already.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Apply a config override on top of this set.
    pub fn with_override(self, adjust: &ListOverride<String>) -> Self {
        match adjust {
            ListOverride::Default => self,
            ListOverride::Replace(words) => words.iter().map(String::as_str).collect(),
            ListOverride::Extend(words) => {
                let mut set = self;
                for word in words {
                    set.insert(word);
                }
                set
            }
        }
    }
}

impl<'a> FromIterator<&'a str> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for word in iter {
            set.insert(word);
        }
        set
    }
}

/// Load the ignore list at `path`, falling back to an empty set if it can't
/// be read. A missing list degrades filtering but never aborts the run.
pub fn load_ignore_words(path: &Path) -> IgnoreSet {
    match IgnoreSet::from_path(path) {
        Ok(set) => {
            tracing::debug!(path = %path.display(), words = set.len(), "loaded ignore list");
            set
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "could not open ignore list, continuing without stop words"
            );
            IgnoreSet::new()
        }
    }
}

/// Keep a token iff it is not ignored and its length is not exactly
/// `noise_len`. Order and duplicates are preserved.
pub fn filter_with_len(tokens: Vec<String>, ignore: &IgnoreSet, noise_len: usize) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| t.chars().count() != noise_len && !ignore.contains(t))
        .collect()
}

/// [`filter_with_len`] with the default noise length of 2.
pub fn filter(tokens: Vec<String>, ignore: &IgnoreSet) -> Vec<String> {
    filter_with_len(tokens, ignore, DEFAULT_NOISE_TOKEN_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_drops_ignored_and_two_letter_tokens() {
        let ignore: IgnoreSet = ["the", "and"].into_iter().collect();
        let out = filter(words(&["the", "cat", "and", "dog", "at"]), &ignore);
        assert_eq!(out, words(&["cat", "dog"]));
    }

    #[test]
    fn test_filter_keeps_order_and_duplicates() {
        let ignore = IgnoreSet::new();
        let out = filter(words(&["dog", "a", "cat", "dog", "of"]), &ignore);
        assert_eq!(out, words(&["dog", "a", "cat", "dog"]));
    }

    #[test]
    fn test_filter_with_custom_noise_len() {
        let ignore = IgnoreSet::new();
        let out = filter_with_len(words(&["the", "cat", "at", "a"]), &ignore, 3);
        assert_eq!(out, words(&["at", "a"]));
    }

    #[test]
    fn test_from_reader_trims_and_lowercases() {
        let set = IgnoreSet::from_reader(Cursor::new("  The \nAND\n\n   \nof\n")).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("the"));
        assert!(set.contains("and"));
        assert!(set.contains("of"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let set = load_ignore_words(&dir.path().join("nope.txt"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ignore.txt");
        std::fs::write(&path, "Figure\r\ntable\r\n").unwrap();
        let set = load_ignore_words(&path);
        assert!(set.contains("figure"));
        assert!(set.contains("table"));
    }

    #[test]
    fn test_with_override() {
        let base: IgnoreSet = ["the", "and"].into_iter().collect();

        let same = base.clone().with_override(&ListOverride::Default);
        assert_eq!(same, base);

        let extended = base
            .clone()
            .with_override(&ListOverride::Extend(words(&["Figure"])));
        assert!(extended.contains("figure"));
        assert!(extended.contains("the"));

        let replaced = base.with_override(&ListOverride::Replace(words(&["table"])));
        assert_eq!(replaced.len(), 1);
        assert!(!replaced.contains("the"));
    }
}
