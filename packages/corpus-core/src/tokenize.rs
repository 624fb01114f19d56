//! Orthographic tokenization of wordlist counterparts.
//!
//! Counterparts are passed through an [`OrthographyParser`]; strings that do
//! not parse are collected on a side channel instead of aborting the run.

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::CorpusError;
use crate::reader::WordlistReader;

/// Counterparts that mark a missing form and are never tokenized.
pub const PLACEHOLDERS: &[&str] = &["?", "NONE"];

/// Grapheme emitted between words.
pub const WORD_BOUNDARY: &str = "#";

/// Splits a raw string into orthographic units.
pub trait OrthographyParser {
    /// Parses `raw`, or explains why it cannot be parsed.
    fn parse(&self, raw: &str) -> Result<Vec<String>, String>;
}

/// Parser producing Unicode extended grapheme clusters of the NFD form.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphemeParser;

impl OrthographyParser for GraphemeParser {
    fn parse(&self, raw: &str) -> Result<Vec<String>, String> {
        if raw.trim().is_empty() {
            return Err("empty string".to_string());
        }
        if let Some(c) = raw.chars().find(|c| c.is_control()) {
            return Err(format!("control character U+{:04X}", c as u32));
        }

        let normalized: String = raw.nfd().collect();
        let mut graphemes = Vec::new();
        for word in normalized.split_whitespace() {
            if !graphemes.is_empty() {
                graphemes.push(WORD_BOUNDARY.to_string());
            }
            graphemes.extend(word.graphemes(true).map(str::to_string));
        }
        Ok(graphemes)
    }
}

/// One tokenized counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenizedCounterpart {
    pub counterpart: String,
    /// Graphemes joined by single spaces; the counterpart itself for
    /// placeholders
    pub ortho_parse: String,
    pub graphemes: Vec<String>,
    pub concept: String,
    pub language: String,
}

/// A counterpart the parser rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unparsable {
    pub counterpart: String,
    pub concept: String,
    pub reason: String,
}

/// Tokenized counterparts of a run plus the rejected ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenizeOutcome {
    pub rows: Vec<TokenizedCounterpart>,
    pub unparsable: Vec<Unparsable>,
}

impl TokenizeOutcome {
    /// Appends another outcome, keeping order.
    pub fn extend(&mut self, other: TokenizeOutcome) {
        self.rows.extend(other.rows);
        self.unparsable.extend(other.unparsable);
    }
}

/// Tokenizes every `(concept, counterpart)` pair of a wordlist section.
///
/// The language column is the section's language as named in the book,
/// falling back to its ISO code.
pub fn tokenize_section<P: OrthographyParser>(
    reader: &WordlistReader,
    section_id: &str,
    parser: &P,
) -> Result<TokenizeOutcome, CorpusError> {
    let language = match reader.language_bookname(section_id)? {
        "" => reader.language_code(section_id)?.to_string(),
        name => name.to_string(),
    };

    let mut outcome = TokenizeOutcome::default();
    for (concept, counterpart) in reader.concept_counterpart_pairs(section_id) {
        if PLACEHOLDERS.contains(&counterpart) {
            outcome.rows.push(TokenizedCounterpart {
                counterpart: counterpart.to_string(),
                ortho_parse: counterpart.to_string(),
                graphemes: Vec::new(),
                concept: concept.to_string(),
                language: language.clone(),
            });
            continue;
        }
        match parser.parse(counterpart) {
            Ok(graphemes) => outcome.rows.push(TokenizedCounterpart {
                counterpart: counterpart.to_string(),
                ortho_parse: graphemes.join(" "),
                graphemes,
                concept: concept.to_string(),
                language: language.clone(),
            }),
            Err(reason) => {
                tracing::debug!("Unparsable counterpart {:?}: {}", counterpart, reason);
                outcome.unparsable.push(Unparsable {
                    counterpart: counterpart.to_string(),
                    concept: concept.to_string(),
                    reason,
                });
            }
        }
    }
    Ok(outcome)
}
