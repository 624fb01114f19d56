//! Filtered corpus export.
//!
//! Selects entries whose translations (or counterparts) hit a target
//! vocabulary such as a Swadesh list, and writes copies of the entry and
//! annotation tables that keep only those rows.

mod filter;
mod swadesh;
mod vocabulary;

pub use filter::{FilterCounts, TableFilter, STATIC_TABLES};
pub use swadesh::{
    export_swadesh, select_dictionary_entries, select_wordlist_entries, ExportSummary,
};
pub use vocabulary::{LowercaseStemmer, Stemmer, TargetVocabulary};
