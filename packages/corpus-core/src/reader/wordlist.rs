//! Reader for wordlist sections ("wordlistdata").

use std::path::Path;

use indexmap::IndexMap;

use crate::annotation_cache::{AnnotationCache, AnnotationValues};
use crate::config::ReaderConfig;
use crate::error::CorpusError;
use crate::report::LoadReport;
use crate::table::schema::{self, language_bookname, wordlistconcept, wordlistdata, wordlistentry};
use crate::table::{ForeignKeyIndex, Table, TableLoader};

use super::catalog::Catalog;
use super::pairs::{CrossJoin, EntryIds, JoinLeft, Pairs};
use super::sections::Sections;
use super::LanguageCode;

/// Annotation kind holding a counterpart (the word in the section's language).
pub const COUNTERPART: &str = "counterpart";

/// Read model over the wordlist tables.
///
/// Loads `component`, `book`, `wordlistdata`, `wordlistentry`,
/// `wordlistannotation`, `language_iso`, `language_bookname` and
/// `wordlistconcept` on construction.
#[derive(Debug, Clone)]
pub struct WordlistReader {
    catalog: Catalog,
    language_booknames: Table,
    sections: Sections,
    entries: Table,
    annotations: Table,
    concepts: Table,
    section_entries: ForeignKeyIndex,
    entry_concepts: IndexMap<String, String>,
    cache: AnnotationCache,
    report: LoadReport,
}

impl WordlistReader {
    /// Loads the wordlist tables from `config.data_dir`.
    ///
    /// Every entry's concept is resolved here; an entry whose `concept_id`
    /// does not resolve fails construction with `DanglingReference`.
    pub fn open(config: &ReaderConfig) -> Result<Self, CorpusError> {
        let loader = TableLoader::from_config(config);
        let mut report = LoadReport::default();

        let catalog = Catalog::load(&loader, config, &mut report)?;
        let wordlistdata = loader.load_from(config, schema::WORDLISTDATA)?;
        report.record(&wordlistdata);
        let entries = loader.load_from(config, schema::WORDLISTENTRY)?;
        report.record(&entries);
        let annotations = loader.load_from(config, schema::WORDLISTANNOTATION)?;
        report.record(&annotations);
        let language_booknames = loader.load_from(config, schema::LANGUAGE_BOOKNAME)?;
        report.record(&language_booknames);
        let concepts = loader.load_from(config, schema::WORDLISTCONCEPT)?;
        report.record(&concepts);

        let sections = Sections::build(wordlistdata, &catalog.books, schema::WORDLISTDATA_SECTION)?;
        let entry_concepts = resolve_concepts(&entries, &concepts)?;
        let cache = AnnotationCache::build(&entries, &annotations);
        report.orphan_annotations = cache.orphan_count();
        let section_entries = ForeignKeyIndex::build(&entries, wordlistentry::WORDLISTDATA_ID);

        tracing::info!("Wordlist corpus loaded from {}: {}", config.data_dir.display(), report);

        Ok(Self {
            catalog,
            language_booknames,
            sections,
            entries,
            annotations,
            concepts,
            section_entries,
            entry_concepts,
            cache,
            report,
        })
    }

    /// Loads the wordlist tables from `data_dir` with default limits.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, CorpusError> {
        Self::open(&ReaderConfig::new(data_dir.as_ref()))
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Every loaded section ID, in table order.
    pub fn section_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.ids()
    }

    /// Composite ID (`{bibtex_key}_{startpage}_{endpage}`) of a section.
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

    pub fn sections_for_book_key(&self, key: &str) -> Vec<&str> {
        self.sections.for_book_key(key)
    }

    /// Sections assigned to the component named `name`; sections without a
    /// component never match.
    pub fn sections_for_component(&self, name: &str) -> Result<Vec<&str>, CorpusError> {
        self.sections.for_component(&self.catalog.components, name)
    }

    /// Sections of the book with bibtex key `key`, falling back to the
    /// component named `key`. A key matching neither gives an empty list.
    pub fn sections_for_key(&self, key: &str) -> Result<Vec<&str>, CorpusError> {
        self.sections.for_key(&self.catalog.components, key)
    }

    /// The language name as printed in the book, or `""` when the section
    /// has none.
    pub fn language_bookname(&self, section_id: &str) -> Result<&str, CorpusError> {
        let bookname_id = &self.sections.row(section_id)?[wordlistdata::LANGUAGE_BOOKNAME_ID];
        if bookname_id.is_empty() {
            return Ok("");
        }
        let row = self.language_booknames.resolve(
            bookname_id,
            self.sections.table.name(),
            "language_bookname_id",
        )?;
        Ok(row[language_bookname::NAME].as_str())
    }

    /// ISO code assigned to the section.
    pub fn language_code(&self, section_id: &str) -> Result<LanguageCode, CorpusError> {
        let iso_id = &self.sections.row(section_id)?[wordlistdata::LANGUAGE_ISO_ID];
        Ok(self.catalog.langcode(iso_id, self.sections.table.name()))
    }

    /// Entries of a section, in entry table order. Empty for unknown sections.
    pub fn entry_ids_for_section(&self, section_id: &str) -> EntryIds<'_> {
        EntryIds::new(self.section_entries.get(section_id))
    }

    pub fn annotation_values(&self, entry_id: &str, kind: &str) -> Result<AnnotationValues<'_>, CorpusError> {
        self.cache.values(entry_id, kind)
    }

    /// The concept an entry stands for.
    pub fn concept_for_entry(&self, entry_id: &str) -> Result<&str, CorpusError> {
        self.entry_concepts
            .get(entry_id)
            .map(String::as_str)
            .ok_or_else(|| CorpusError::dangling(self.entries.name(), "id", entry_id))
    }

    /// Lazy concepts of a section, one per entry.
    pub fn concepts_for_section(&self, section_id: &str) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entry_ids_for_section(section_id)
            .filter_map(|entry_id| self.entry_concepts.get(entry_id).map(String::as_str))
    }

    /// Lazy counterparts of every entry of a section.
    pub fn counterparts_for_section(&self, section_id: &str) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entry_ids_for_section(section_id)
            .flat_map(|entry_id| AnnotationValues::new(self.cache.set_or_empty(entry_id, COUNTERPART)))
    }

    /// Lazy `(concept, counterpart)` pairs: each entry's concept crossed with
    /// every counterpart of that entry.
    pub fn concept_counterpart_pairs(&self, section_id: &str) -> Pairs<'_> {
        self.ids_with_concept_counterpart_pairs(section_id).pairs()
    }

    /// Like [`concept_counterpart_pairs`](Self::concept_counterpart_pairs),
    /// with the originating entry ID first.
    pub fn ids_with_concept_counterpart_pairs(&self, section_id: &str) -> CrossJoin<'_> {
        CrossJoin::new(
            self.section_entries.get(section_id),
            &self.cache,
            JoinLeft::Concept(&self.entry_concepts),
            COUNTERPART,
        )
    }

    /// Alias of [`concept_counterpart_pairs`](Self::concept_counterpart_pairs).
    pub fn data(&self, section_id: &str) -> Pairs<'_> {
        self.concept_counterpart_pairs(section_id)
    }

    /// Number of loaded concepts.
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Number of loaded annotation rows (orphans included).
    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }
}

/// Maps every wordlist entry to its concept text.
fn resolve_concepts(entries: &Table, concepts: &Table) -> Result<IndexMap<String, String>, CorpusError> {
    let mut resolved = IndexMap::with_capacity(entries.len());
    for (entry_id, fields) in entries.iter() {
        let concept_id = &fields[wordlistentry::CONCEPT_ID];
        let concept = concepts.resolve(concept_id, entries.name(), "concept_id")?;
        resolved.insert(entry_id.to_string(), concept[wordlistconcept::CONCEPT].clone());
    }
    Ok(resolved)
}
