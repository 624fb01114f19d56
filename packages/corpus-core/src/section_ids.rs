//! Composite string identifiers for dictionary and wordlist sections.
//!
//! A section is known externally as `{bibtex_key}_{startpage}_{endpage}`,
//! e.g. `thiesen1998_10_244`. The index is built once, for every loaded
//! section, when the reader is constructed.

use indexmap::IndexMap;

use crate::error::CorpusError;
use crate::table::schema::book;
use crate::table::{SectionColumns, Table};

/// Separator between the parts of a composite section ID.
pub const SECTION_ID_SEPARATOR: char = '_';

/// Resolved identity of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionKey {
    /// Owning book row ID
    pub book_id: String,
    /// The owning book's bibtex key
    pub bibtex_key: String,
    /// Composite external ID
    pub string_id: String,
}

/// Section ID to composite string ID, in section table order.
#[derive(Debug, Clone, Default)]
pub struct SectionIdIndex {
    section_table: &'static str,
    keys: IndexMap<String, SectionKey>,
}

/// Formats a composite section ID.
pub fn compose_section_id(bibtex_key: &str, startpage: &str, endpage: &str) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        bibtex_key,
        startpage,
        endpage,
        sep = SECTION_ID_SEPARATOR
    )
}

/// Returns the bibtex key part of a composite section ID.
///
/// Bibtex keys in the corpus never contain the separator, so the key is
/// everything before the first one.
pub fn bibtex_key_of(string_id: &str) -> &str {
    string_id
        .split(SECTION_ID_SEPARATOR)
        .next()
        .unwrap_or(string_id)
}

impl SectionIdIndex {
    /// Builds the index for every row of `sections`.
    ///
    /// # Returns
    /// `DanglingReference` if any section's `book_id` is not a loaded book.
    pub fn build(
        sections: &Table,
        books: &Table,
        columns: SectionColumns,
    ) -> Result<Self, CorpusError> {
        let section_table = sections.name();
        let book_column = sections.schema.column_name(columns.book_id);
        let mut keys = IndexMap::with_capacity(sections.len());

        for (section_id, fields) in sections.iter() {
            let book_id = fields[columns.book_id].as_str();
            let book_row = books.resolve(book_id, section_table, book_column)?;
            let bibtex_key = book_row[book::BIBTEX_KEY].clone();
            let string_id = compose_section_id(
                &bibtex_key,
                &fields[columns.startpage],
                &fields[columns.endpage],
            );
            keys.insert(
                section_id.to_string(),
                SectionKey {
                    book_id: book_id.to_string(),
                    bibtex_key,
                    string_id,
                },
            );
        }

        tracing::debug!("Built {} section string ids for {}", keys.len(), section_table);
        Ok(Self {
            section_table,
            keys,
        })
    }

    /// Composite ID of `section_id`.
    ///
    /// # Returns
    /// `DanglingReference` when the section was never loaded.
    pub fn string_id(&self, section_id: &str) -> Result<&str, CorpusError> {
        self.key(section_id).map(|key| key.string_id.as_str())
    }

    /// Resolved identity of `section_id`.
    pub fn key(&self, section_id: &str) -> Result<&SectionKey, CorpusError> {
        self.keys
            .get(section_id)
            .ok_or_else(|| CorpusError::dangling(self.section_table, "id", section_id))
    }

    /// Iterates `(section_id, key)` in section table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionKey)> + '_ {
        self.keys.iter().map(|(id, key)| (id.as_str(), key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
