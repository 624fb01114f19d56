//! Command-line front end for the corpus reader.
//!
//! Looks up sections by book or component, dumps language codes and pairs,
//! runs the Swadesh export and tokenizes wordlist counterparts.

mod cli;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use corpus_core::export::{export_swadesh, TargetVocabulary};
use corpus_core::tokenize::{tokenize_section, GraphemeParser, TokenizeOutcome};
use corpus_core::{DictionaryReader, ExportConfig, LanguageCode, ReaderConfig, WordlistReader};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ReaderConfig {
        max_malformed_rows: cli.max_malformed,
        ..ReaderConfig::new(&cli.data_dir)
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let reports = match cli.command {
        Commands::Sections { key, wordlist } => {
            if wordlist {
                let reader = open_wordlist(&config)?;
                let sections = reader.sections_for_key(&key)?;
                note_if_empty(&sections, "wordlist", &key);
                for section_id in sections {
                    let string_id = reader.section_string_id(section_id)?;
                    print_section(&mut out, cli.json, section_id, string_id)?;
                }
                vec![("wordlist", reader.report().clone())]
            } else {
                let reader = open_dictionary(&config)?;
                let sections = reader.sections_for_key(&key)?;
                note_if_empty(&sections, "dictionary", &key);
                for section_id in sections {
                    let string_id = reader.section_string_id(section_id)?;
                    print_section(&mut out, cli.json, section_id, string_id)?;
                }
                vec![("dictionary", reader.report().clone())]
            }
        }

        Commands::Languages { key } => {
            let reader = open_dictionary(&config)?;
            let sections = reader.sections_for_key(&key)?;
            note_if_empty(&sections, "dictionary", &key);
            let mut unresolved = 0usize;
            for section_id in sections {
                let sources = reader.source_language_codes(section_id);
                let targets = reader.target_language_codes(section_id);
                unresolved += reader.unresolved_link_count(section_id);

                let string_id = reader.section_string_id(section_id)?;
                if cli.json {
                    let line = json!({"section": string_id, "source": sources, "target": targets});
                    writeln!(out, "{}", line)?;
                } else {
                    writeln!(out, "{}\t{}\t{}", string_id, join_codes(&sources), join_codes(&targets))?;
                }
            }
            if cli.json {
                writeln!(out, "{}", json!({ "unresolved": unresolved }))?;
            } else {
                writeln!(out, "unresolved language links: {}", unresolved)?;
            }
            vec![("dictionary", reader.report().clone())]
        }

        Commands::Pairs {
            key,
            with_ids,
            wordlist,
        } => {
            if wordlist {
                let reader = open_wordlist(&config)?;
                let sections = reader.sections_for_key(&key)?;
                note_if_empty(&sections, "wordlist", &key);
                for section_id in sections {
                    let string_id = reader.section_string_id(section_id)?;
                    let pairs = reader.ids_with_concept_counterpart_pairs(section_id);
                    for (entry_id, concept, counterpart) in pairs {
                        let left = ("concept", concept);
                        let right = ("counterpart", counterpart);
                        print_pair(&mut out, cli.json, with_ids, string_id, entry_id, left, right)?;
                    }
                }
                vec![("wordlist", reader.report().clone())]
            } else {
                let reader = open_dictionary(&config)?;
                let sections = reader.sections_for_key(&key)?;
                note_if_empty(&sections, "dictionary", &key);
                for section_id in sections {
                    let string_id = reader.section_string_id(section_id)?;
                    let pairs = reader.ids_with_head_translation_pairs(section_id);
                    for (entry_id, head, translation) in pairs {
                        let left = ("head", head);
                        let right = ("translation", translation);
                        print_pair(&mut out, cli.json, with_ids, string_id, entry_id, left, right)?;
                    }
                }
                vec![("dictionary", reader.report().clone())]
            }
        }

        Commands::ExportSwadesh {
            output,
            vocabulary,
            stopwords,
            language,
        } => {
            let export = ExportConfig {
                output_dir: output,
                vocabulary_path: vocabulary,
                stopwords_path: stopwords,
                language,
            };
            let target = TargetVocabulary::load(&export.vocabulary_path, &export.stopwords_path)
                .context("Failed to load target vocabulary")?;
            let dictionary = open_dictionary(&config)?;
            let wordlist = open_wordlist(&config)?;
            let summary = export_swadesh(&dictionary, &wordlist, &config, &export, &target)
                .with_context(|| format!("Export to {} failed", export.output_dir.display()))?;

            if cli.json {
                writeln!(out, "{}", serde_json::to_string(&summary)?)?;
            } else {
                writeln!(out, "copied tables: {}", summary.copied_tables.join(", "))?;
                writeln!(
                    out,
                    "dictionary: {} entries, {} annotations",
                    summary.dictionary.entries, summary.dictionary.annotations
                )?;
                writeln!(
                    out,
                    "wordlist: {} entries, {} annotations",
                    summary.wordlist.entries, summary.wordlist.annotations
                )?;
                writeln!(
                    out,
                    "unresolved languages: {} dictionary links, {} wordlist sections",
                    summary.unresolved_dictionary_links, summary.unresolved_wordlist_sections
                )?;
            }
            vec![
                ("dictionary", dictionary.report().clone()),
                ("wordlist", wordlist.report().clone()),
            ]
        }

        Commands::Tokenize { key, unparsable } => {
            let reader = open_wordlist(&config)?;
            let mut outcome = TokenizeOutcome::default();
            let sections = reader.sections_for_key(&key)?;
            note_if_empty(&sections, "wordlist", &key);
            for section_id in sections {
                outcome.extend(tokenize_section(&reader, section_id, &GraphemeParser)?);
            }

            if cli.json {
                for row in &outcome.rows {
                    writeln!(out, "{}", serde_json::to_string(row)?)?;
                }
            } else {
                writeln!(out, "COUNTERPART\tORTHO_PARSE\tCONCEPT\tLANGUAGE")?;
                for row in &outcome.rows {
                    writeln!(out, "{}\t{}\t{}\t{}", row.counterpart, row.ortho_parse, row.concept, row.language)?;
                }
            }

            match unparsable {
                Some(path) => write_unparsable(&path, &outcome)?,
                None if !outcome.unparsable.is_empty() => {
                    tracing::warn!(
                        "{} counterparts could not be parsed; pass --unparsable to keep them",
                        outcome.unparsable.len()
                    );
                }
                None => {}
            }
            vec![("wordlist", reader.report().clone())]
        }
    };

    out.flush()?;
    for (label, report) in reports {
        eprintln!("{}: {}", label, report);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_dictionary(config: &ReaderConfig) -> Result<DictionaryReader> {
    DictionaryReader::open(config)
        .with_context(|| format!("Failed to load dictionary tables from {}", config.data_dir.display()))
}

fn open_wordlist(config: &ReaderConfig) -> Result<WordlistReader> {
    WordlistReader::open(config)
        .with_context(|| format!("Failed to load wordlist tables from {}", config.data_dir.display()))
}

/// Notes on stderr when a key selects nothing; an unknown key is not an error.
fn note_if_empty(sections: &[&str], kind: &str, key: &str) {
    if sections.is_empty() {
        tracing::warn!("No {} sections for book or component '{}'", kind, key);
    }
}

fn join_codes(codes: &[LanguageCode]) -> String {
    codes
        .iter()
        .map(LanguageCode::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn print_section(out: &mut impl Write, json: bool, section_id: &str, string_id: &str) -> io::Result<()> {
    if json {
        writeln!(out, "{}", json!({"id": section_id, "section": string_id}))
    } else {
        writeln!(out, "{}\t{}", section_id, string_id)
    }
}

fn print_pair(
    out: &mut impl Write,
    json: bool,
    with_ids: bool,
    section: &str,
    entry_id: &str,
    (left_name, left): (&str, &str),
    (right_name, right): (&str, &str),
) -> io::Result<()> {
    match (json, with_ids) {
        (true, true) => {
            let line = json!({"section": section, "entry_id": entry_id, left_name: left, right_name: right});
            writeln!(out, "{}", line)
        }
        (true, false) => {
            let line = json!({"section": section, left_name: left, right_name: right});
            writeln!(out, "{}", line)
        }
        (false, true) => writeln!(out, "{}\t{}\t{}\t{}", section, entry_id, left, right),
        (false, false) => writeln!(out, "{}\t{}\t{}", section, left, right),
    }
}

fn write_unparsable(path: &Path, outcome: &TokenizeOutcome) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for item in &outcome.unparsable {
        writeln!(writer, "{}\t{}\t{}", item.counterpart, item.concept, item.reason)?;
    }
    writer.flush()?;
    tracing::info!(
        "Wrote {} unparsable counterparts to {}",
        outcome.unparsable.len(),
        path.display()
    );
    Ok(())
}
