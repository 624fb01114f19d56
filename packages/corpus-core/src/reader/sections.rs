//! Section table plus its string-ID index and book/component lookups.

use crate::error::CorpusError;
use crate::section_ids::SectionIdIndex;
use crate::table::schema::component;
use crate::table::{SectionColumns, Table};

#[derive(Debug, Clone)]
pub(crate) struct Sections {
    pub table: Table,
    pub columns: SectionColumns,
    pub string_ids: SectionIdIndex,
}

impl Sections {
    pub fn build(table: Table, books: &Table, columns: SectionColumns) -> Result<Self, CorpusError> {
        let string_ids = SectionIdIndex::build(&table, books, columns)?;
        Ok(Self {
            table,
            columns,
            string_ids,
        })
    }

    /// Sections whose book has bibtex key `key`, in table order.
    pub fn for_book_key(&self, key: &str) -> Vec<&str> {
        self.string_ids
            .iter()
            .filter(|(_, section)| section.bibtex_key == key)
            .map(|(id, _)| id)
            .collect()
    }

    /// Sections assigned to the component named `name`, in table order.
    ///
    /// Sections without a component never match; a component ID that does
    /// not resolve fails the whole lookup.
    pub fn for_component<'a>(
        &'a self,
        components: &Table,
        name: &str,
    ) -> Result<Vec<&'a str>, CorpusError> {
        let component_column = self.table.schema.column_name(self.columns.component_id);
        let mut matches = Vec::new();
        for (section_id, fields) in self.table.iter() {
            let component_id = fields[self.columns.component_id].as_str();
            if component_id.is_empty() {
                continue;
            }
            let component_row =
                components.resolve(component_id, self.table.name(), component_column)?;
            if component_row[component::NAME] == name {
                matches.push(section_id);
            }
        }
        Ok(matches)
    }

    /// Sections of book `key`, or of component `key` when no book matches.
    pub fn for_key<'a>(&'a self, components: &Table, key: &str) -> Result<Vec<&'a str>, CorpusError> {
        let sections = self.for_book_key(key);
        if !sections.is_empty() {
            return Ok(sections);
        }
        self.for_component(components, key)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.ids()
    }

    /// Fields of `section_id`, or `DanglingReference` when it is not loaded.
    pub fn row(&self, section_id: &str) -> Result<&[String], CorpusError> {
        self.table
            .get(section_id)
            .ok_or_else(|| CorpusError::dangling(self.table.name(), "id", section_id))
    }
}
