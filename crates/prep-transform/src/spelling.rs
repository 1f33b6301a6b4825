//! Dictionary-based spelling correction.
//!
//! A [`SpellChecker`] is built once per run and handed to the cleaner; it
//! holds no global state. Candidates are ranked by edit distance (an
//! adjacent transposition counts as one edit), then by word frequency, then
//! lexically.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rapidfuzz::distance::osa;
use tracing::debug;

use prep_model::SpellingOptions;
use prep_model::options::DEFAULT_MAX_EDIT_DISTANCE;

use crate::error::{Result, TransformError};

const ENGLISH_WORDS: &str = include_str!("../data/words.txt");

/// Tokens shorter than this are never corrected.
const MIN_CORRECTABLE_LEN: usize = 4;

/// Tokens shorter than this only accept single-edit corrections.
const SHORT_TOKEN_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CasePattern {
    Lower,
    Capitalized,
    Upper,
}

impl CasePattern {
    fn of(token: &str) -> Self {
        let mut letters = token.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            return Self::Lower;
        };
        let rest: Vec<char> = letters.collect();
        if first.is_uppercase() && !rest.is_empty() && rest.iter().all(|c| c.is_uppercase()) {
            Self::Upper
        } else if first.is_uppercase() {
            Self::Capitalized
        } else {
            Self::Lower
        }
    }

    fn apply(self, word: &str) -> String {
        match self {
            Self::Lower => word.to_string(),
            Self::Upper => word.to_uppercase(),
            Self::Capitalized => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Word-frequency spell checker.
#[derive(Debug, Clone)]
pub struct SpellChecker {
    frequencies: HashMap<String, u64>,
    max_distance: usize,
}

impl Default for SpellChecker {
    fn default() -> Self {
        Self::english()
    }
}

impl SpellChecker {
    /// Checker backed by the built-in English word list.
    pub fn english() -> Self {
        // The embedded list is well formed; a bad line would only drop a word.
        let mut checker = Self::empty();
        for line in ENGLISH_WORDS.lines() {
            if let Ok(Some((word, count))) = parse_line(line, 0) {
                checker.insert(&word, count);
            }
        }
        checker
    }

    /// Checker that never suggests anything.
    pub fn disabled() -> Self {
        Self::empty()
    }

    fn empty() -> Self {
        Self {
            frequencies: HashMap::new(),
            max_distance: DEFAULT_MAX_EDIT_DISTANCE,
        }
    }

    /// Loads a dictionary file: one `word [count]` per line, `#` comments.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| TransformError::DictionaryRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file)).map_err(|err| match err {
            TransformError::DictionaryRead { source, .. } => TransformError::DictionaryRead {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Reads a dictionary in the same format as [`SpellChecker::from_path`].
    ///
    /// Only purely alphabetic words are kept; counts default to 1.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut checker = Self::empty();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| TransformError::DictionaryRead {
                path: "<reader>".into(),
                source,
            })?;
            if let Some((word, count)) = parse_line(&line, idx + 1)? {
                checker.insert(&word, count);
            }
        }
        debug!(words = checker.len(), "loaded spelling dictionary");
        Ok(checker)
    }

    /// Builds the checker described by the run options.
    pub fn from_options(options: &SpellingOptions) -> Result<Self> {
        let checker = if !options.enabled {
            Self::disabled()
        } else if let Some(path) = &options.dictionary {
            Self::from_path(path)?
        } else {
            Self::english()
        };
        Ok(checker.with_max_distance(options.max_distance))
    }

    #[must_use]
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    fn insert(&mut self, word: &str, count: u64) {
        *self.frequencies.entry(word.to_lowercase()).or_insert(0) += count;
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Case-insensitive dictionary lookup.
    pub fn is_known(&self, word: &str) -> bool {
        self.frequencies.contains_key(&word.to_lowercase())
    }

    fn budget(&self, token_len: usize) -> usize {
        if token_len < SHORT_TOKEN_LEN {
            self.max_distance.min(1)
        } else {
            self.max_distance
        }
    }

    /// Suggests a replacement for `token`, or `None` when it should be kept.
    ///
    /// Only the ASCII letters of the token are compared, so surrounding
    /// punctuation does not count towards the edit distance. Tokens with a
    /// digit, and tokens with fewer than four letters, are never corrected.
    ///
    /// # Examples
    ///
    /// ```
    /// use prep_transform::SpellChecker;
    ///
    /// let checker = SpellChecker::english();
    /// assert_eq!(checker.correction("Wrld").as_deref(), Some("World"));
    /// assert_eq!(checker.correction("world"), None);
    /// assert_eq!(checker.correction("A123"), None);
    /// assert_eq!(checker.correction("Ann"), None);
    /// ```
    pub fn correction(&self, token: &str) -> Option<String> {
        if self.is_empty() || token.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        let core: String = token
            .chars()
            .filter(char::is_ascii_alphabetic)
            .collect();
        if core.len() < MIN_CORRECTABLE_LEN || self.is_known(&core) {
            return None;
        }

        let lowered = core.to_lowercase();
        let budget = self.budget(lowered.len());
        let mut best: Option<(usize, u64, &str)> = None;
        for (word, &count) in &self.frequencies {
            // Words are ASCII, so byte length is the letter count.
            if word.len().abs_diff(lowered.len()) > budget {
                continue;
            }
            let distance = osa::distance(lowered.chars(), word.chars());
            if distance > budget {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_distance, best_count, best_word)) => {
                    (distance, std::cmp::Reverse(count), word.as_str())
                        < (best_distance, std::cmp::Reverse(best_count), best_word)
                }
            };
            if better {
                best = Some((distance, count, word.as_str()));
            }
        }

        best.map(|(_, _, word)| CasePattern::of(&core).apply(word))
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<Option<(String, u64)>> {
    let content = line.split('#').next().unwrap_or_default().trim();
    let mut parts = content.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let count = match parts.next() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| TransformError::InvalidDictionaryEntry {
                line: line_number,
                entry: line.to_string(),
            })?,
        None => 1,
    };
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Ok(None);
    }
    Ok(Some((word.to_lowercase(), count)))
}
