//! Fixture corpus written into a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{tempdir, TempDir};

pub const ENTRY_HEADER: &str = "id\thead\tfullentry\tis_subentry\tis_subentry_of_entry_id\tdictdata_id\tbook_id\tstartpage\tendpage\tstartcolumn\tendcolumn\tpos_on_page\thas_manual_annotations\tvolume";
pub const ANNOTATION_HEADER: &str = "id\tentry_id\tannotationtype_id\tstart\tend\tvalue\tstring";
pub const WORDLISTENTRY_HEADER: &str = "id\tfullentry\tstartpage\tendpage\tstartcolumn\tendcolumn\tpos_on_page\tconcept_id\twordlistdata_id\thas_manual_annotations\tvolume";

/// A corpus directory that lives as long as the fixture.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.path.join(format!("{table}.csv"))
    }

    /// Replaces a table file with `header` and `rows`.
    pub fn write(&self, table: &str, header: &str, rows: &[String]) {
        write_table(&self.path, table, header, rows);
    }

    pub fn remove(&self, table: &str) {
        fs::remove_file(self.table_path(table)).unwrap();
    }
}

pub fn write_table(dir: &Path, table: &str, header: &str, rows: &[String]) {
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(dir.join(format!("{table}.csv")), content).unwrap();
}

pub fn row(fields: &[&str]) -> String {
    fields.join("\t")
}

pub fn book(id: &str, bibtex_key: &str) -> String {
    row(&[
        id, "Title", "Author", "1998", "", bibtex_key, "1", "300", "books/x.pdf", "dictionary", "1", "0",
    ])
}

pub fn entry(id: &str, head: &str, dictdata_id: &str) -> String {
    row(&[
        id, head, head, "0", "", dictdata_id, "1", "10", "10", "1", "1", "1", "0", "1",
    ])
}

pub fn annotation(id: &str, entry_id: &str, kind: &str, value: &str) -> String {
    row(&[id, entry_id, "1", "0", "4", kind, value])
}

pub fn wordlist_entry(id: &str, concept_id: &str, wordlistdata_id: &str) -> String {
    row(&[
        id, "full", "10", "10", "1", "1", "1", concept_id, wordlistdata_id, "0", "1",
    ])
}

/// Writes the full fixture corpus (dictionary and wordlist tables).
///
/// Dictionary sections:
/// - `10` thiesen1998_10_244, component Tupi, oym -> spa
/// - `11` thiesen1998_245_300, no component, unassigned -> spa
/// - `12` shell2008_1_50, component Pano, spa -> [oym, dangling iso id]
///
/// Wordlist sections:
/// - `20` huber1992_10_392, component Pano, spa ("Castellano")
/// - `21` huber1992_393_400, no component, oym ("Guayapi")
/// - `22` shell2008_1_5, no component, no language
pub fn corpus() -> Fixture {
    let dir = tempdir().unwrap();
    let path = dir.path().to_path_buf();

    write_table(
        &path,
        "component",
        "id\tname\tdescription",
        &[row(&["1", "Tupi", "Tupi languages"]), row(&["2", "Pano", "Pano languages"])],
    );
    write_table(
        &path,
        "book",
        "id\ttitle\tauthor\tyear\tisbn\tbibtex_key\tcolumns\tpages\torigfilepath\ttype\tis_ready\thas_changed",
        &[book("1", "thiesen1998"), book("2", "huber1992"), book("3", "shell2008")],
    );
    write_table(
        &path,
        "language_iso",
        "id\tname\tlangcode\tdescription\turl",
        &[
            row(&["1", "Spanish", "spa", "", ""]),
            row(&["2", "Wayampi", "oym", "", ""]),
        ],
    );

    // dictionary tables
    write_table(
        &path,
        "dictdata",
        "id\tstartpage\tendpage\tstartletters\tbook_id\tcomponent_id",
        &[
            row(&["10", "10", "244", "a-z", "1", "1"]),
            row(&["11", "245", "300", "", "1", ""]),
            row(&["12", "1", "50", "", "3", "2"]),
        ],
    );
    write_table(
        &path,
        "language_src",
        "id\tdictdata_id\tlanguage_iso_id\tlanguage_bookname_id",
        &[
            row(&["100", "10", "2", ""]),
            row(&["101", "11", "", ""]),
            row(&["102", "12", "1", ""]),
        ],
    );
    write_table(
        &path,
        "language_tgt",
        "id\tdictdata_id\tlanguage_iso_id\tlanguage_bookname_id",
        &[
            row(&["200", "10", "1", ""]),
            row(&["201", "11", "1", ""]),
            row(&["202", "12", "2", ""]),
            row(&["203", "12", "99", ""]),
        ],
    );
    write_table(
        &path,
        "entry",
        ENTRY_HEADER,
        &[
            entry("1000", "y", "10"),
            entry("1001", "\"Juan \"\"el rojo\"\"\"", "10"),
            entry("1002", "gato", "11"),
            entry("1003", "agua", "12"),
            entry("1004", "ka", "10"),
        ],
    );
    write_table(
        &path,
        "annotation",
        ANNOTATION_HEADER,
        &[
            annotation("1", "1000", "head", "y"),
            annotation("2", "1000", "head", "yy"),
            annotation("3", "1000", "translation", "agua"),
            annotation("4", "1000", "translation", "agua (fig.)"),
            annotation("5", "1000", "translation", "río"),
            annotation("6", "1001", "head", "\"Juan \"\"el rojo\"\"\""),
            annotation("7", "1001", "translation", "fuego"),
            annotation("8", "1002", "head", "gato"),
            annotation("9", "1002", "head", "gata"),
            annotation("10", "1002", "head", "gato"),
            annotation("11", "1002", "translation", "cat"),
            annotation("12", "1003", "head", "agua"),
            annotation("13", "1003", "translation", "ɨ"),
            annotation("14", "9999", "head", "orphan"),
            row(&["15", "1000"]),
        ],
    );

    // wordlist tables
    write_table(
        &path,
        "wordlistdata",
        "id\tstartpage\tendpage\tlanguage_bookname_id\tlanguage_iso_id\tbook_id\tcomponent_id",
        &[
            row(&["20", "10", "392", "1", "1", "2", "2"]),
            row(&["21", "393", "400", "2", "2", "2", ""]),
            row(&["22", "1", "5", "", "", "3", ""]),
        ],
    );
    write_table(
        &path,
        "language_bookname",
        "id\tname",
        &[row(&["1", "Castellano"]), row(&["2", "Guayapi"])],
    );
    write_table(
        &path,
        "wordlistconcept",
        "id\tconcept",
        &[row(&["1", "water"]), row(&["2", "fire"]), row(&["3", "dog"])],
    );
    write_table(
        &path,
        "wordlistentry",
        WORDLISTENTRY_HEADER,
        &[
            wordlist_entry("3000", "1", "20"),
            wordlist_entry("3001", "2", "20"),
            wordlist_entry("3002", "3", "20"),
            wordlist_entry("3003", "1", "21"),
            wordlist_entry("3004", "3", "21"),
            wordlist_entry("3005", "2", "22"),
        ],
    );
    write_table(
        &path,
        "wordlistannotation",
        ANNOTATION_HEADER,
        &[
            annotation("1", "3000", "counterpart", "agua"),
            annotation("2", "3001", "counterpart", "fuego"),
            annotation("3", "3001", "counterpart", "lumbre"),
            annotation("4", "3002", "counterpart", "perro"),
            annotation("5", "3003", "counterpart", "ɨ"),
            annotation("6", "3003", "counterpart", "ɨɨ"),
            annotation("7", "3004", "counterpart", "jawa"),
            annotation("8", "3005", "counterpart", "?"),
        ],
    );

    Fixture { _dir: dir, path }
}
