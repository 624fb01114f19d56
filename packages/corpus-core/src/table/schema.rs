//! Fixed column layouts of the corpus tables.
//!
//! Column indices count from the first field after the row ID. The header
//! line of a table file is never consulted; these layouts are authoritative.

/// Column layout of one table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name, also the file stem
    pub name: &'static str,
    /// Column names after the row ID, in file order
    pub columns: &'static [&'static str],
    /// Whether quoted free-text fields are unescaped at load time
    pub unescape_quotes: bool,
}

impl TableSchema {
    /// Number of tab-separated fields a row must have, row ID included.
    pub const fn field_count(&self) -> usize {
        self.columns.len() + 1
    }

    /// Returns the column name at `index`, or `"?"` when out of range.
    pub fn column_name(&self, index: usize) -> &'static str {
        self.columns.get(index).copied().unwrap_or("?")
    }
}

/// Columns shared by the two section tables (dictdata and wordlistdata).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionColumns {
    pub startpage: usize,
    pub endpage: usize,
    pub book_id: usize,
    pub component_id: usize,
}

pub mod component {
    pub const NAME: usize = 0;
    pub const DESCRIPTION: usize = 1;
}

pub mod book {
    pub const TITLE: usize = 0;
    pub const AUTHOR: usize = 1;
    pub const YEAR: usize = 2;
    pub const ISBN: usize = 3;
    pub const BIBTEX_KEY: usize = 4;
    pub const PAGES: usize = 6;
    pub const TYPE: usize = 8;
}

pub mod dictdata {
    pub const STARTPAGE: usize = 0;
    pub const ENDPAGE: usize = 1;
    pub const STARTLETTERS: usize = 2;
    pub const BOOK_ID: usize = 3;
    pub const COMPONENT_ID: usize = 4;
}

pub mod wordlistdata {
    pub const STARTPAGE: usize = 0;
    pub const ENDPAGE: usize = 1;
    pub const LANGUAGE_BOOKNAME_ID: usize = 2;
    pub const LANGUAGE_ISO_ID: usize = 3;
    pub const BOOK_ID: usize = 4;
    pub const COMPONENT_ID: usize = 5;
}

pub mod language_iso {
    pub const NAME: usize = 0;
    pub const LANGCODE: usize = 1;
    pub const DESCRIPTION: usize = 2;
    pub const URL: usize = 3;
}

pub mod language_bookname {
    pub const NAME: usize = 0;
}

/// Shared by `language_src` and `language_tgt`.
pub mod language_link {
    pub const DICTDATA_ID: usize = 0;
    pub const LANGUAGE_ISO_ID: usize = 1;
    pub const LANGUAGE_BOOKNAME_ID: usize = 2;
}

pub mod entry {
    pub const HEAD: usize = 0;
    pub const FULLENTRY: usize = 1;
    pub const IS_SUBENTRY: usize = 2;
    pub const IS_SUBENTRY_OF_ENTRY_ID: usize = 3;
    pub const DICTDATA_ID: usize = 4;
    pub const BOOK_ID: usize = 5;
}

pub mod wordlistentry {
    pub const FULLENTRY: usize = 0;
    pub const CONCEPT_ID: usize = 6;
    pub const WORDLISTDATA_ID: usize = 7;
}

pub mod wordlistconcept {
    pub const CONCEPT: usize = 0;
}

/// Shared by `annotation` and `wordlistannotation`.
pub mod annotation {
    pub const ENTRY_ID: usize = 0;
    pub const ANNOTATIONTYPE_ID: usize = 1;
    pub const START: usize = 2;
    pub const END: usize = 3;
    /// The annotation kind ("head", "translation", "counterpart", ...)
    pub const VALUE: usize = 4;
    /// The annotation payload
    pub const STRING: usize = 5;
}

pub const COMPONENT: TableSchema = TableSchema {
    name: "component",
    columns: &["name", "description"],
    unescape_quotes: false,
};

pub const BOOK: TableSchema = TableSchema {
    name: "book",
    columns: &[
        "title",
        "author",
        "year",
        "isbn",
        "bibtex_key",
        "columns",
        "pages",
        "origfilepath",
        "type",
        "is_ready",
        "has_changed",
    ],
    unescape_quotes: false,
};

pub const DICTDATA: TableSchema = TableSchema {
    name: "dictdata",
    columns: &["startpage", "endpage", "startletters", "book_id", "component_id"],
    unescape_quotes: false,
};

pub const WORDLISTDATA: TableSchema = TableSchema {
    name: "wordlistdata",
    columns: &[
        "startpage",
        "endpage",
        "language_bookname_id",
        "language_iso_id",
        "book_id",
        "component_id",
    ],
    unescape_quotes: false,
};

pub const LANGUAGE_ISO: TableSchema = TableSchema {
    name: "language_iso",
    columns: &["name", "langcode", "description", "url"],
    unescape_quotes: false,
};

pub const LANGUAGE_BOOKNAME: TableSchema = TableSchema {
    name: "language_bookname",
    columns: &["name"],
    unescape_quotes: false,
};

pub const LANGUAGE_SRC: TableSchema = TableSchema {
    name: "language_src",
    columns: &["dictdata_id", "language_iso_id", "language_bookname_id"],
    unescape_quotes: false,
};

pub const LANGUAGE_TGT: TableSchema = TableSchema {
    name: "language_tgt",
    columns: &["dictdata_id", "language_iso_id", "language_bookname_id"],
    unescape_quotes: false,
};

pub const ENTRY: TableSchema = TableSchema {
    name: "entry",
    columns: &[
        "head",
        "fullentry",
        "is_subentry",
        "is_subentry_of_entry_id",
        "dictdata_id",
        "book_id",
        "startpage",
        "endpage",
        "startcolumn",
        "endcolumn",
        "pos_on_page",
        "has_manual_annotations",
        "volume",
    ],
    unescape_quotes: true,
};

pub const ANNOTATION: TableSchema = TableSchema {
    name: "annotation",
    columns: &["entry_id", "annotationtype_id", "start", "end", "value", "string"],
    unescape_quotes: true,
};

pub const WORDLISTENTRY: TableSchema = TableSchema {
    name: "wordlistentry",
    columns: &[
        "fullentry",
        "startpage",
        "endpage",
        "startcolumn",
        "endcolumn",
        "pos_on_page",
        "concept_id",
        "wordlistdata_id",
        "has_manual_annotations",
        "volume",
    ],
    unescape_quotes: true,
};

pub const WORDLISTANNOTATION: TableSchema = TableSchema {
    name: "wordlistannotation",
    columns: &["entry_id", "annotationtype_id", "start", "end", "value", "string"],
    unescape_quotes: true,
};

pub const WORDLISTCONCEPT: TableSchema = TableSchema {
    name: "wordlistconcept",
    columns: &["concept"],
    unescape_quotes: false,
};

pub const DICTDATA_SECTION: SectionColumns = SectionColumns {
    startpage: dictdata::STARTPAGE,
    endpage: dictdata::ENDPAGE,
    book_id: dictdata::BOOK_ID,
    component_id: dictdata::COMPONENT_ID,
};

pub const WORDLISTDATA_SECTION: SectionColumns = SectionColumns {
    startpage: wordlistdata::STARTPAGE,
    endpage: wordlistdata::ENDPAGE,
    book_id: wordlistdata::BOOK_ID,
    component_id: wordlistdata::COMPONENT_ID,
};
