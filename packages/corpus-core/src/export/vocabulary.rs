//! Target vocabulary matching with stopword removal and stemming.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::CorpusError;
use crate::io_utils::io_error;

/// Reduces a word to the form vocabulary entries are compared in.
pub trait Stemmer {
    fn stem(&self, word: &str) -> String;
}

/// Lowercases and trims; no suffix stripping.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseStemmer;

impl Stemmer for LowercaseStemmer {
    fn stem(&self, word: &str) -> String {
        word.trim().to_lowercase()
    }
}

/// A fixed vocabulary plus the stopwords ignored when matching phrases.
#[derive(Debug, Clone)]
pub struct TargetVocabulary<S = LowercaseStemmer> {
    stems: HashSet<String>,
    stopwords: HashSet<String>,
    stemmer: S,
    aside: Regex,
}

impl TargetVocabulary<LowercaseStemmer> {
    /// Loads the vocabulary and stopword files with the default stemmer.
    pub fn load(vocabulary_path: &Path, stopwords_path: &Path) -> Result<Self, CorpusError> {
        let vocabulary = fs::read_to_string(vocabulary_path)
            .map_err(|e| io_error(e, &vocabulary_path.display().to_string()))?;
        let stopwords = fs::read_to_string(stopwords_path)
            .map_err(|e| io_error(e, &stopwords_path.display().to_string()))?;
        Self::from_lists(&vocabulary, &stopwords, LowercaseStemmer)
    }
}

impl<S: Stemmer> TargetVocabulary<S> {
    /// Builds a vocabulary from file contents.
    ///
    /// `vocabulary` holds comma-separated words, any number per line;
    /// `stopwords` holds one word per line, `#` starting a comment line.
    pub fn from_lists(vocabulary: &str, stopwords: &str, stemmer: S) -> Result<Self, CorpusError> {
        let stems: HashSet<String> = vocabulary
            .lines()
            .flat_map(|line| line.split(','))
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(|word| stemmer.stem(word))
            .collect();
        if stems.is_empty() {
            return Err(CorpusError::InvalidVocabulary(
                "vocabulary contains no words".to_string(),
            ));
        }

        let stopwords = stopwords
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty() && !word.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        let aside = Regex::new(r" ?\([^)]*\)")
            .map_err(|e| CorpusError::InvalidVocabulary(e.to_string()))?;

        Ok(Self {
            stems,
            stopwords,
            stemmer,
            aside,
        })
    }

    /// Number of distinct stems.
    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.trim().to_lowercase())
    }

    /// Removes parenthesized asides such as `" (fig.)"`.
    pub fn strip_asides<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.aside.replace_all(text, "")
    }

    /// Whether `text` hits the vocabulary.
    ///
    /// A text that is itself a stopword matches. Otherwise its stopwords are
    /// dropped and it matches when any remaining word stems to a vocabulary
    /// entry.
    pub fn matches(&self, text: &str) -> bool {
        let text = self.strip_asides(text);
        if self.is_stopword(&text) {
            return true;
        }
        text.split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| !word.is_empty() && !self.is_stopword(word))
            .any(|word| self.stems.contains(&self.stemmer.stem(word)))
    }
}
