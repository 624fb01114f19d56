//! Swadesh-corpus export: selects the entries whose translation (or whose
//! concept's counterpart) hits the target vocabulary and writes the filtered
//! dictionary and wordlist tables.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::config::{ExportConfig, ReaderConfig};
use crate::error::CorpusError;
use crate::reader::{DictionaryReader, LanguageCode, WordlistReader};
use crate::section_ids::bibtex_key_of;
use crate::table::schema;

use super::filter::{FilterCounts, TableFilter};
use super::vocabulary::{Stemmer, TargetVocabulary};

/// Result of one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub dictionary_entries_selected: usize,
    pub dictionary: FilterCounts,
    pub wordlist_entries_selected: usize,
    pub wordlist: FilterCounts,
    pub copied_tables: Vec<String>,
    /// Dictionary language links (source and target) without an ISO code
    pub unresolved_dictionary_links: usize,
    /// Wordlist sections without an ISO code
    pub unresolved_wordlist_sections: usize,
}

/// Dictionary entries with a translation in `language` that hits the
/// vocabulary.
///
/// Only sections whose source or target language is exactly `language` are
/// considered. When the source side is `language`, heads and translations
/// swap roles so the vocabulary is always matched against `language` text.
pub fn select_dictionary_entries<S: Stemmer>(
    reader: &DictionaryReader,
    vocabulary: &TargetVocabulary<S>,
    language: &str,
) -> IndexSet<String> {
    let mut selected = IndexSet::new();
    for section_id in reader.section_ids() {
        let sources = reader.source_language_codes(section_id);
        let targets = reader.target_language_codes(section_id);
        let source_is_language = LanguageCode::is_only(&sources, language);
        if !source_is_language && !LanguageCode::is_only(&targets, language) {
            continue;
        }

        for (entry_id, head, translation) in reader.ids_with_head_translation_pairs(section_id) {
            let text = if source_is_language { head } else { translation };
            if vocabulary.matches(text) {
                selected.insert(entry_id.to_string());
            }
        }
    }
    tracing::debug!("Selected {} dictionary entries", selected.len());
    selected
}

/// Wordlist entries whose concept is attested, in the same book, by a
/// `language` counterpart that hits the vocabulary.
///
/// Per book (bibtex key), the concepts are collected from the sections in
/// `language`; then every entry of that book's sections with one of those
/// concepts is selected, whatever its section's language.
pub fn select_wordlist_entries<S: Stemmer>(
    reader: &WordlistReader,
    vocabulary: &TargetVocabulary<S>,
    language: &str,
) -> Result<IndexSet<String>, CorpusError> {
    let mut books: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for (section_id, string_id) in reader.section_string_ids() {
        books
            .entry(bibtex_key_of(string_id))
            .or_default()
            .push(section_id);
    }

    let mut selected = IndexSet::new();
    for (bibtex_key, section_ids) in &books {
        let mut concepts: HashSet<&str> = HashSet::new();
        for &section_id in section_ids {
            if reader.language_code(section_id)?.as_str() != Some(language) {
                continue;
            }
            for (_, concept, counterpart) in reader.ids_with_concept_counterpart_pairs(section_id) {
                if vocabulary.matches(counterpart) {
                    concepts.insert(concept);
                }
            }
        }
        if concepts.is_empty() {
            continue;
        }

        tracing::debug!("{}: {} matching concepts", bibtex_key, concepts.len());
        for &section_id in section_ids {
            for entry_id in reader.entry_ids_for_section(section_id) {
                if concepts.contains(reader.concept_for_entry(entry_id)?) {
                    selected.insert(entry_id.to_string());
                }
            }
        }
    }
    tracing::debug!("Selected {} wordlist entries", selected.len());
    Ok(selected)
}

/// Runs the full export: static tables copied, entry and annotation tables of
/// both corpus families filtered to the selected entries.
pub fn export_swadesh<S: Stemmer>(
    dictionary: &DictionaryReader,
    wordlist: &WordlistReader,
    input: &ReaderConfig,
    export: &ExportConfig,
    vocabulary: &TargetVocabulary<S>,
) -> Result<ExportSummary, CorpusError> {
    let filter = TableFilter::new(input, &export.output_dir)?;
    let copied_tables = filter.copy_static_tables()?;

    let dictionary_entries: HashSet<String> =
        select_dictionary_entries(dictionary, vocabulary, &export.language)
            .into_iter()
            .collect();
    let dictionary_counts =
        filter.filter(schema::ENTRY, schema::ANNOTATION, &dictionary_entries)?;

    let wordlist_entries: HashSet<String> =
        select_wordlist_entries(wordlist, vocabulary, &export.language)?
            .into_iter()
            .collect();
    let wordlist_counts = filter.filter(
        schema::WORDLISTENTRY,
        schema::WORDLISTANNOTATION,
        &wordlist_entries,
    )?;

    let unresolved_dictionary_links = dictionary
        .section_ids()
        .map(|section_id| dictionary.unresolved_link_count(section_id))
        .sum();
    let mut unresolved_wordlist_sections = 0;
    for section_id in wordlist.section_ids() {
        if !wordlist.language_code(section_id)?.is_resolved() {
            unresolved_wordlist_sections += 1;
        }
    }

    let summary = ExportSummary {
        dictionary_entries_selected: dictionary_entries.len(),
        dictionary: dictionary_counts,
        wordlist_entries_selected: wordlist_entries.len(),
        wordlist: wordlist_counts,
        copied_tables,
        unresolved_dictionary_links,
        unresolved_wordlist_sections,
    };
    tracing::info!(
        "Export to {} done: {} dictionary entries, {} wordlist entries",
        export.output_dir.display(),
        summary.dictionary.entries,
        summary.wordlist.entries
    );
    Ok(summary)
}
