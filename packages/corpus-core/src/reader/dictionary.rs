//! Reader for dictionary sections ("dictdata").

use std::path::Path;

use crate::annotation_cache::{AnnotationCache, AnnotationValues};
use crate::config::ReaderConfig;
use crate::error::CorpusError;
use crate::report::LoadReport;
use crate::table::schema::{self, entry, language_link};
use crate::table::{ForeignKeyIndex, Table, TableLoader};

use super::catalog::Catalog;
use super::pairs::{CrossJoin, EntryIds, JoinLeft, Pairs};
use super::sections::Sections;
use super::LanguageCode;

/// Annotation kind holding the headword.
pub const HEAD: &str = "head";
/// Annotation kind holding a translation of the headword.
pub const TRANSLATION: &str = "translation";

/// Read model over the dictionary tables.
///
/// Loads `component`, `book`, `dictdata`, `entry`, `annotation`,
/// `language_iso`, `language_src` and `language_tgt` on construction. All
/// queries are read-only.
#[derive(Debug, Clone)]
pub struct DictionaryReader {
    catalog: Catalog,
    sections: Sections,
    entries: Table,
    annotations: Table,
    sources: Table,
    targets: Table,
    section_entries: ForeignKeyIndex,
    source_links: ForeignKeyIndex,
    target_links: ForeignKeyIndex,
    cache: AnnotationCache,
    report: LoadReport,
}

impl DictionaryReader {
    /// Loads the dictionary tables from `config.data_dir`.
    ///
    /// # Returns
    /// The ready reader, or the first load error (`MissingFile`,
    /// `TooManyMalformedRows`, a section whose book does not resolve, I/O).
    pub fn open(config: &ReaderConfig) -> Result<Self, CorpusError> {
        let loader = TableLoader::from_config(config);
        let mut report = LoadReport::default();

        let catalog = Catalog::load(&loader, config, &mut report)?;
        let dictdata = loader.load_from(config, schema::DICTDATA)?;
        report.record(&dictdata);
        let entries = loader.load_from(config, schema::ENTRY)?;
        report.record(&entries);
        let annotations = loader.load_from(config, schema::ANNOTATION)?;
        report.record(&annotations);
        let sources = loader.load_from(config, schema::LANGUAGE_SRC)?;
        report.record(&sources);
        let targets = loader.load_from(config, schema::LANGUAGE_TGT)?;
        report.record(&targets);

        let sections = Sections::build(dictdata, &catalog.books, schema::DICTDATA_SECTION)?;
        let cache = AnnotationCache::build(&entries, &annotations);
        report.orphan_annotations = cache.orphan_count();

        let section_entries = ForeignKeyIndex::build(&entries, entry::DICTDATA_ID);
        let source_links = ForeignKeyIndex::build(&sources, language_link::DICTDATA_ID);
        let target_links = ForeignKeyIndex::build(&targets, language_link::DICTDATA_ID);

        tracing::info!("Dictionary corpus loaded from {}: {}", config.data_dir.display(), report);

        Ok(Self {
            catalog,
            sections,
            entries,
            annotations,
            sources,
            targets,
            section_entries,
            source_links,
            target_links,
            cache,
            report,
        })
    }

    /// Loads the dictionary tables from `data_dir` with default limits.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, CorpusError> {
        Self::open(&ReaderConfig::new(data_dir.as_ref()))
    }

    /// What construction loaded and skipped.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Every loaded section ID, in table order.
    pub fn section_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.ids()
    }

    /// Composite ID (`{bibtex_key}_{startpage}_{endpage}`) of a section.
    ///
    /// # Returns
    /// `DanglingReference` when `section_id` is not a loaded section.
    pub fn section_string_id(&self, section_id: &str) -> Result<&str, CorpusError> {
        self.sections.string_ids.string_id(section_id)
    }

    /// `(section_id, composite_id)` for every section, in table order.
    pub fn section_string_ids(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.sections
            .string_ids
            .iter()
            .map(|(id, key)| (id, key.string_id.as_str()))
    }

    /// Sections of the book with bibtex key `key` (exact, case-sensitive).
    pub fn sections_for_book_key(&self, key: &str) -> Vec<&str> {
        self.sections.for_book_key(key)
    }

    /// Sections assigned to the component named `name`.
    pub fn sections_for_component(&self, name: &str) -> Result<Vec<&str>, CorpusError> {
        self.sections.for_component(&self.catalog.components, name)
    }

    /// Sections of the book with bibtex key `key`, falling back to the
    /// component named `key`. A key matching neither gives an empty list.
    pub fn sections_for_key(&self, key: &str) -> Result<Vec<&str>, CorpusError> {
        self.sections.for_key(&self.catalog.components, key)
    }

    /// One code per source-language link of the section.
    pub fn source_language_codes(&self, section_id: &str) -> Vec<LanguageCode> {
        self.language_codes(&self.sources, &self.source_links, section_id)
    }

    /// One code per target-language link of the section.
    pub fn target_language_codes(&self, section_id: &str) -> Vec<LanguageCode> {
        self.language_codes(&self.targets, &self.target_links, section_id)
    }

    /// Language links of the section, source and target, that did not
    /// resolve to an ISO code.
    pub fn unresolved_link_count(&self, section_id: &str) -> usize {
        self.source_language_codes(section_id)
            .iter()
            .chain(self.target_language_codes(section_id).iter())
            .filter(|code| !code.is_resolved())
            .count()
    }

    fn language_codes(
        &self,
        links: &Table,
        index: &ForeignKeyIndex,
        section_id: &str,
    ) -> Vec<LanguageCode> {
        index
            .get(section_id)
            .iter()
            .filter_map(|link_id| links.field(link_id, language_link::LANGUAGE_ISO_ID))
            .map(|iso_id| self.catalog.langcode(iso_id, links.name()))
            .collect()
    }

    /// Entries of a section, in entry table order. Empty for unknown sections.
    pub fn entry_ids_for_section(&self, section_id: &str) -> EntryIds<'_> {
        EntryIds::new(self.section_entries.get(section_id))
    }

    /// Distinct values of annotation kind `kind` recorded for an entry.
    ///
    /// # Returns
    /// `DanglingReference` when `entry_id` is not a loaded entry.
    pub fn annotation_values(&self, entry_id: &str, kind: &str) -> Result<AnnotationValues<'_>, CorpusError> {
        self.cache.values(entry_id, kind)
    }

    /// Headword of an entry as stored in the entry table.
    pub fn entry_head(&self, entry_id: &str) -> Result<&str, CorpusError> {
        self.entries
            .field(entry_id, entry::HEAD)
            .ok_or_else(|| CorpusError::dangling(self.entries.name(), "id", entry_id))
    }

    /// Lazy `(head, translation)` pairs: every head of every entry of the
    /// section crossed with every translation of the same entry.
    pub fn head_translation_pairs(&self, section_id: &str) -> Pairs<'_> {
        self.ids_with_head_translation_pairs(section_id).pairs()
    }

    /// Like [`head_translation_pairs`](Self::head_translation_pairs), with the
    /// originating entry ID first.
    pub fn ids_with_head_translation_pairs(&self, section_id: &str) -> CrossJoin<'_> {
        CrossJoin::new(
            self.section_entries.get(section_id),
            &self.cache,
            JoinLeft::Annotation(HEAD),
            TRANSLATION,
        )
    }

    /// Alias of [`head_translation_pairs`](Self::head_translation_pairs).
    pub fn data(&self, section_id: &str) -> Pairs<'_> {
        self.head_translation_pairs(section_id)
    }

    /// Number of loaded annotation rows (orphans included).
    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }
}
