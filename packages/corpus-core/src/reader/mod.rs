//! Corpus readers: the query surface over the loaded tables.
//!
//! [`DictionaryReader`] covers dictionary sections (head/translation
//! entries), [`WordlistReader`] covers wordlist sections
//! (concept/counterpart entries). Both load everything eagerly on
//! construction and are immutable afterwards, so a constructed reader can be
//! shared across threads for reading.

mod catalog;
mod dictionary;
mod pairs;
mod sections;
mod wordlist;

use std::fmt;

use serde::Serialize;

pub use dictionary::DictionaryReader;
pub use pairs::{CrossJoin, EntryIds, Pairs};
pub use wordlist::WordlistReader;

/// Language of a section as an ISO code, or the explicit marker for a link
/// whose language could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum LanguageCode {
    Iso(String),
    Unresolved,
}

impl LanguageCode {
    /// The ISO code, if resolved.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LanguageCode::Iso(code) => Some(code),
            LanguageCode::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, LanguageCode::Iso(_))
    }

    /// True when `codes` is exactly one link resolving to `code`.
    pub fn is_only(codes: &[LanguageCode], code: &str) -> bool {
        matches!(codes, [LanguageCode::Iso(only)] if only == code)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageCode::Iso(code) => f.write_str(code),
            LanguageCode::Unresolved => f.write_str("-"),
        }
    }
}
