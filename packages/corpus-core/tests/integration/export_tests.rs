use std::collections::HashSet;
use std::fs;

use corpus_core::export::{
    export_swadesh, select_dictionary_entries, select_wordlist_entries, FilterCounts, LowercaseStemmer,
    TableFilter, TargetVocabulary,
};
use corpus_core::table::schema;
use corpus_core::{CorpusError, DictionaryReader, ExportConfig, ReaderConfig, WordlistReader};
use ntest::timeout;
use tempfile::tempdir;

use super::helpers::{annotation, corpus, entry, ANNOTATION_HEADER, ENTRY_HEADER};

fn vocabulary() -> TargetVocabulary {
    TargetVocabulary::from_lists("agua, fuego\n", "el\nla\n", LowercaseStemmer).unwrap()
}

fn lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
#[timeout(10000)]
fn test_select_dictionary_entries() {
    let fixture = corpus();
    let reader = DictionaryReader::from_dir(&fixture.path).unwrap();

    let selected = select_dictionary_entries(&reader, &vocabulary(), "spa");
    let selected: Vec<&str> = selected.iter().map(String::as_str).collect();
    // 1002 translates into "cat"; 1003 matches on its head since its source is spa
    assert_eq!(selected, vec!["1000", "1001", "1003"]);

    assert!(select_dictionary_entries(&reader, &vocabulary(), "deu").is_empty());
}

#[test]
#[timeout(10000)]
fn test_select_wordlist_entries_by_book_concepts() {
    let fixture = corpus();
    let reader = WordlistReader::from_dir(&fixture.path).unwrap();

    let selected = select_wordlist_entries(&reader, &vocabulary(), "spa").unwrap();
    let selected: Vec<&str> = selected.iter().map(String::as_str).collect();
    assert_eq!(selected, vec!["3000", "3001", "3003"]);
}

#[test]
#[timeout(10000)]
fn test_export_swadesh() {
    let fixture = corpus();
    let output = tempdir().unwrap();
    let input = ReaderConfig::new(&fixture.path);
    let export = ExportConfig {
        output_dir: output.path().join("swadesh"),
        ..ExportConfig::default()
    };
    let dictionary = DictionaryReader::open(&input).unwrap();
    let wordlist = WordlistReader::open(&input).unwrap();

    let summary = export_swadesh(&dictionary, &wordlist, &input, &export, &vocabulary()).unwrap();

    assert_eq!(summary.dictionary_entries_selected, 3);
    // the short annotation row travels with entry 1000
    assert_eq!(
        summary.dictionary,
        FilterCounts {
            entries: 3,
            annotations: 10
        }
    );
    assert_eq!(summary.wordlist_entries_selected, 3);
    assert_eq!(
        summary.wordlist,
        FilterCounts {
            entries: 3,
            annotations: 5
        }
    );
    assert_eq!(
        summary.copied_tables,
        vec![
            "book",
            "component",
            "dictdata",
            "language_iso",
            "language_bookname",
            "language_src",
            "language_tgt",
            "wordlistdata",
            "wordlistconcept",
        ]
    );

    // section 11 source, section 12 second target; section 22 has no language
    assert_eq!(summary.unresolved_dictionary_links, 2);
    assert_eq!(summary.unresolved_wordlist_sections, 1);

    let input_entries = lines(&fixture.table_path("entry"));
    let output_entries = lines(&export.output_dir.join("entry.csv"));
    assert_eq!(
        output_entries,
        vec![
            input_entries[0].clone(),
            input_entries[1].clone(),
            input_entries[2].clone(),
            input_entries[4].clone(),
        ]
    );
    assert_eq!(
        fs::read(export.output_dir.join("book.csv")).unwrap(),
        fs::read(fixture.table_path("book")).unwrap()
    );
}

#[test]
#[timeout(10000)]
fn test_export_output_loads() {
    let fixture = corpus();
    let output = tempdir().unwrap();
    let input = ReaderConfig::new(&fixture.path);
    let export = ExportConfig {
        output_dir: output.path().to_path_buf(),
        ..ExportConfig::default()
    };
    let dictionary = DictionaryReader::open(&input).unwrap();
    let wordlist = WordlistReader::open(&input).unwrap();
    export_swadesh(&dictionary, &wordlist, &input, &export, &vocabulary()).unwrap();

    let filtered = DictionaryReader::from_dir(output.path()).unwrap();
    let ids: Vec<&str> = filtered.entry_ids_for_section("10").collect();
    assert_eq!(ids, vec!["1000", "1001"]);
    assert_eq!(filtered.entry_head("1001").unwrap(), "Juan \"el rojo\"");
    assert_eq!(filtered.report().table("annotation").unwrap().malformed, 1);
    assert_eq!(filtered.head_translation_pairs("10").count(), 7);

    let filtered = WordlistReader::from_dir(output.path()).unwrap();
    let pairs: Vec<(&str, &str)> = filtered.concept_counterpart_pairs("21").collect();
    assert_eq!(pairs, vec![("water", "ɨ"), ("water", "ɨɨ")]);
}

#[test]
#[timeout(10000)]
fn test_filter_groups_annotations_under_entries() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    // annotation file order differs from entry order; last line has no terminator
    fs::write(
        input.path().join("entry.csv"),
        format!("{ENTRY_HEADER}\n{}\n{}\n", entry("2", "b", "1"), entry("1", "a", "1")),
    )
    .unwrap();
    fs::write(
        input.path().join("annotation.csv"),
        format!(
            "{ANNOTATION_HEADER}\n{}\n{}\n{}",
            annotation("10", "1", "head", "a"),
            annotation("11", "2", "head", "b"),
            annotation("12", "1", "translation", "x"),
        ),
    )
    .unwrap();

    let filter = TableFilter::new(&ReaderConfig::new(input.path()), output.path()).unwrap();
    let selected: HashSet<String> = ["1", "2"].iter().map(|id| id.to_string()).collect();
    let counts = filter
        .filter(schema::ENTRY, schema::ANNOTATION, &selected)
        .unwrap();
    assert_eq!(counts, FilterCounts { entries: 2, annotations: 3 });

    let written = fs::read_to_string(output.path().join("annotation.csv")).unwrap();
    assert_eq!(
        written,
        format!(
            "{ANNOTATION_HEADER}\n{}\n{}\n{}\n",
            annotation("11", "2", "head", "b"),
            annotation("10", "1", "head", "a"),
            annotation("12", "1", "translation", "x"),
        )
    );
}

#[test]
#[timeout(10000)]
fn test_export_into_input_directory_is_rejected() {
    let fixture = corpus();
    let input = ReaderConfig::new(&fixture.path);
    let dictionary = DictionaryReader::open(&input).unwrap();
    let wordlist = WordlistReader::open(&input).unwrap();
    let tables = ["book", "entry", "annotation", "wordlistentry", "wordlistannotation"];
    let before: Vec<Vec<u8>> = tables
        .iter()
        .map(|table| fs::read(fixture.table_path(table)).unwrap())
        .collect();

    // same directory spelled differently
    let export = ExportConfig {
        output_dir: fixture.path.join(".").join("..").join(fixture.path.file_name().unwrap()),
        ..ExportConfig::default()
    };
    let result = export_swadesh(&dictionary, &wordlist, &input, &export, &vocabulary());
    assert!(matches!(result, Err(CorpusError::IoError(_))));

    let after: Vec<Vec<u8>> = tables
        .iter()
        .map(|table| fs::read(fixture.table_path(table)).unwrap())
        .collect();
    assert_eq!(before, after);
    assert!(DictionaryReader::from_dir(&fixture.path).is_ok());
}

#[test]
#[timeout(10000)]
fn test_filter_matches_quoted_ids() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let quoted_entry = entry("\"2\"", "b", "1");
    let quoted_annotation = annotation("11", "\"2\"", "head", "b");
    fs::write(
        input.path().join("entry.csv"),
        format!("{ENTRY_HEADER}\n{}\n{}\n", entry("1", "a", "1"), quoted_entry),
    )
    .unwrap();
    fs::write(
        input.path().join("annotation.csv"),
        format!("{ANNOTATION_HEADER}\n{}\n{}\n", annotation("10", "1", "head", "a"), quoted_annotation),
    )
    .unwrap();

    let filter = TableFilter::new(&ReaderConfig::new(input.path()), output.path()).unwrap();
    let selected: HashSet<String> = HashSet::from(["2".to_string()]);
    let counts = filter
        .filter(schema::ENTRY, schema::ANNOTATION, &selected)
        .unwrap();
    assert_eq!(counts, FilterCounts { entries: 1, annotations: 1 });

    assert_eq!(
        fs::read_to_string(output.path().join("entry.csv")).unwrap(),
        format!("{ENTRY_HEADER}\n{quoted_entry}\n")
    );
    assert_eq!(
        fs::read_to_string(output.path().join("annotation.csv")).unwrap(),
        format!("{ANNOTATION_HEADER}\n{quoted_annotation}\n")
    );
}

#[test]
#[timeout(10000)]
fn test_vocabulary_from_files() {
    let dir = tempdir().unwrap();
    let vocabulary_path = dir.path().join("spa.txt");
    let stopwords_path = dir.path().join("stop.txt");
    fs::write(&vocabulary_path, "agua,fuego\ntierra\n").unwrap();
    fs::write(&stopwords_path, "# spanish\nde\n").unwrap();

    let vocabulary = TargetVocabulary::load(&vocabulary_path, &stopwords_path).unwrap();
    assert_eq!(vocabulary.len(), 3);
    assert!(vocabulary.matches("la tierra"));
    assert!(vocabulary.is_stopword("de"));

    assert!(TargetVocabulary::load(&dir.path().join("absent.txt"), &stopwords_path).is_err());
}
