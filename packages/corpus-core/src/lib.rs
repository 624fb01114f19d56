//! In-memory read model for the dictionary and wordlist corpus.
//!
//! Loads the tab-separated corpus tables, builds section string IDs and the
//! per-entry annotation cache, and answers the fixed set of join queries
//! (sections by book or component, language codes, head/translation and
//! concept/counterpart pairs).

pub mod annotation_cache;
pub mod config;
pub mod error;
pub mod export;
pub mod io_utils;
pub mod reader;
pub mod report;
pub mod section_ids;
pub mod table;
pub mod tokenize;

pub use config::{ExportConfig, ReaderConfig};
pub use error::CorpusError;
pub use reader::{DictionaryReader, LanguageCode, WordlistReader};
pub use report::LoadReport;
