use corpus_core::tokenize::{tokenize_section, GraphemeParser, OrthographyParser, TokenizeOutcome};
use corpus_core::{CorpusError, LanguageCode, WordlistReader};
use ntest::timeout;

use super::helpers::{corpus, wordlist_entry, Fixture, WORDLISTENTRY_HEADER};

fn open(fixture: &Fixture) -> WordlistReader {
    WordlistReader::from_dir(&fixture.path).unwrap()
}

#[test]
#[timeout(10000)]
fn test_load_report() {
    let fixture = corpus();
    let reader = open(&fixture);
    let report = reader.report();

    assert_eq!(report.malformed_total(), 0);
    assert_eq!(report.orphan_annotations, 0);
    assert_eq!(report.table("wordlistentry").unwrap().rows, 6);
    assert_eq!(reader.annotation_count(), 8);
    assert_eq!(reader.concept_count(), 3);
    assert!(report.table("annotation").is_none());
}

#[test]
#[timeout(10000)]
fn test_dangling_concept_fails_construction() {
    let fixture = corpus();
    fixture.write(
        "wordlistentry",
        WORDLISTENTRY_HEADER,
        &[wordlist_entry("3000", "1", "20"), wordlist_entry("3001", "9", "20")],
    );

    match WordlistReader::from_dir(&fixture.path) {
        Err(CorpusError::DanglingReference { table, column, id }) => {
            assert_eq!(table, "wordlistentry");
            assert_eq!(column, "concept_id");
            assert_eq!(id, "9");
        }
        other => panic!("expected DanglingReference, got {:?}", other.map(|_| ())),
    }
}

#[test]
#[timeout(10000)]
fn test_sections() {
    let fixture = corpus();
    let reader = open(&fixture);

    assert_eq!(reader.sections_for_book_key("huber1992"), vec!["20", "21"]);
    assert_eq!(reader.section_string_id("21").unwrap(), "huber1992_393_400");
    assert_eq!(reader.section_string_id("22").unwrap(), "shell2008_1_5");
    assert_eq!(reader.sections_for_component("Pano").unwrap(), vec!["20"]);
    assert!(reader.sections_for_component("Tupi").unwrap().is_empty());

    assert_eq!(reader.sections_for_key("shell2008").unwrap(), vec!["22"]);
    assert_eq!(reader.sections_for_key("Pano").unwrap(), vec!["20"]);
    assert!(reader.sections_for_key("Arawak").unwrap().is_empty());
}

#[test]
#[timeout(10000)]
fn test_language_of_section() {
    let fixture = corpus();
    let reader = open(&fixture);

    assert_eq!(reader.language_bookname("20").unwrap(), "Castellano");
    assert_eq!(reader.language_bookname("21").unwrap(), "Guayapi");
    assert_eq!(reader.language_bookname("22").unwrap(), "");

    assert_eq!(reader.language_code("20").unwrap(), LanguageCode::Iso("spa".to_string()));
    assert_eq!(reader.language_code("21").unwrap(), LanguageCode::Iso("oym".to_string()));
    assert_eq!(reader.language_code("22").unwrap(), LanguageCode::Unresolved);

    assert!(matches!(
        reader.language_code("99"),
        Err(CorpusError::DanglingReference { .. })
    ));
}

#[test]
#[timeout(10000)]
fn test_concepts() {
    let fixture = corpus();
    let reader = open(&fixture);

    assert_eq!(reader.concept_for_entry("3003").unwrap(), "water");
    assert!(reader.concept_for_entry("1000").is_err());

    let concepts: Vec<&str> = reader.concepts_for_section("20").collect();
    assert_eq!(concepts, vec!["water", "fire", "dog"]);
    assert_eq!(reader.concepts_for_section("99").count(), 0);
}

#[test]
#[timeout(10000)]
fn test_counterparts_for_section() {
    let fixture = corpus();
    let reader = open(&fixture);

    let counterparts: Vec<&str> = reader.counterparts_for_section("20").collect();
    assert_eq!(counterparts, vec!["agua", "fuego", "lumbre", "perro"]);
}

#[test]
#[timeout(10000)]
fn test_concept_counterpart_pairs() {
    let fixture = corpus();
    let reader = open(&fixture);

    let pairs: Vec<(&str, &str)> = reader.concept_counterpart_pairs("21").collect();
    assert_eq!(pairs, vec![("water", "ɨ"), ("water", "ɨɨ"), ("dog", "jawa")]);

    let triples: Vec<(&str, &str, &str)> = reader.ids_with_concept_counterpart_pairs("20").collect();
    assert_eq!(
        triples,
        vec![
            ("3000", "water", "agua"),
            ("3001", "fire", "fuego"),
            ("3001", "fire", "lumbre"),
            ("3002", "dog", "perro"),
        ]
    );

    assert_eq!(reader.data("20").count(), 4);
}

#[test]
#[timeout(10000)]
fn test_tokenize_section() {
    let fixture = corpus();
    let reader = open(&fixture);

    let outcome = tokenize_section(&reader, "21", &GraphemeParser).unwrap();
    assert!(outcome.unparsable.is_empty());
    let parses: Vec<(&str, &str)> = outcome
        .rows
        .iter()
        .map(|row| (row.counterpart.as_str(), row.ortho_parse.as_str()))
        .collect();
    assert_eq!(parses, vec![("ɨ", "ɨ"), ("ɨɨ", "ɨ ɨ"), ("jawa", "j a w a")]);
    assert!(outcome.rows.iter().all(|row| row.language == "Guayapi"));
}

#[test]
#[timeout(10000)]
fn test_tokenize_placeholder_and_language_fallback() {
    let fixture = corpus();
    let reader = open(&fixture);

    let outcome = tokenize_section(&reader, "22", &GraphemeParser).unwrap();
    assert_eq!(outcome.rows.len(), 1);
    let row = &outcome.rows[0];
    assert_eq!(row.ortho_parse, "?");
    assert!(row.graphemes.is_empty());
    assert_eq!(row.concept, "fire");
    assert_eq!(row.language, "-");
}

#[test]
#[timeout(10000)]
fn test_tokenize_collects_unparsable() {
    struct NoW;
    impl OrthographyParser for NoW {
        fn parse(&self, raw: &str) -> Result<Vec<String>, String> {
            if raw.contains('w') {
                Err("unknown grapheme w".to_string())
            } else {
                GraphemeParser.parse(raw)
            }
        }
    }

    let fixture = corpus();
    let reader = open(&fixture);

    let mut outcome = TokenizeOutcome::default();
    for section_id in reader.sections_for_book_key("huber1992") {
        outcome.extend(tokenize_section(&reader, section_id, &NoW).unwrap());
    }
    assert_eq!(outcome.rows.len(), 6);
    assert_eq!(outcome.unparsable.len(), 1);
    assert_eq!(outcome.unparsable[0].counterpart, "jawa");
    assert_eq!(outcome.unparsable[0].concept, "dog");
}
