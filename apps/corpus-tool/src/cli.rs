use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the corpus table files
    #[arg(long, global = true, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Malformed rows tolerated per table before loading aborts
    #[arg(long, global = true, default_value_t = 1000)]
    pub max_malformed: usize,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON lines instead of tab-separated text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the sections of a book (bibtex key) or component
    Sections {
        /// Bibtex key, or component name when no book matches
        key: String,

        /// Look up wordlist sections instead of dictionary sections
        #[arg(long)]
        wordlist: bool,
    },

    /// Print source and target languages of dictionary sections
    Languages {
        /// Bibtex key, or component name when no book matches
        key: String,
    },

    /// Dump head/translation (or concept/counterpart) pairs
    Pairs {
        /// Bibtex key, or component name when no book matches
        key: String,

        /// Prefix each pair with its entry ID
        #[arg(long)]
        with_ids: bool,

        /// Dump concept/counterpart pairs of wordlist sections
        #[arg(long)]
        wordlist: bool,
    },

    /// Write the corpus filtered to the target vocabulary
    ExportSwadesh {
        /// Output directory
        output: PathBuf,

        /// Vocabulary file (comma-separated words per line)
        #[arg(long)]
        vocabulary: PathBuf,

        /// Stopword file (one word per line)
        #[arg(long)]
        stopwords: PathBuf,

        /// ISO code of the vocabulary language
        #[arg(long, default_value = "spa")]
        language: String,
    },

    /// Tokenize the wordlist counterparts of a book or component
    Tokenize {
        /// Bibtex key, or component name when no book matches
        key: String,

        /// File receiving the counterparts that could not be parsed
        #[arg(long)]
        unparsable: Option<PathBuf>,
    },
}
