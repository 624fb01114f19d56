//! Tables shared by both readers: components, books and ISO languages.

use crate::config::ReaderConfig;
use crate::error::CorpusError;
use crate::report::LoadReport;
use crate::table::schema::{self, language_iso};
use crate::table::{Table, TableLoader};

use super::LanguageCode;

#[derive(Debug, Clone)]
pub(crate) struct Catalog {
    pub components: Table,
    pub books: Table,
    pub languages_iso: Table,
}

impl Catalog {
    pub fn load(
        loader: &TableLoader,
        config: &ReaderConfig,
        report: &mut LoadReport,
    ) -> Result<Self, CorpusError> {
        let components = loader.load_from(config, schema::COMPONENT)?;
        report.record(&components);
        let books = loader.load_from(config, schema::BOOK)?;
        report.record(&books);
        let languages_iso = loader.load_from(config, schema::LANGUAGE_ISO)?;
        report.record(&languages_iso);
        Ok(Self {
            components,
            books,
            languages_iso,
        })
    }

    /// Resolves a `language_iso_id` foreign key.
    ///
    /// An empty key is an unassigned language; a key with no matching row is
    /// logged and degrades to the same marker.
    pub fn langcode(&self, language_iso_id: &str, referencing_table: &str) -> LanguageCode {
        if language_iso_id.is_empty() {
            return LanguageCode::Unresolved;
        }
        match self
            .languages_iso
            .field(language_iso_id, language_iso::LANGCODE)
        {
            Some(code) => LanguageCode::Iso(code.to_string()),
            None => {
                tracing::warn!(
                    "{}.language_iso_id '{}' does not resolve; treating language as unresolved",
                    referencing_table,
                    language_iso_id
                );
                LanguageCode::Unresolved
            }
        }
    }
}
