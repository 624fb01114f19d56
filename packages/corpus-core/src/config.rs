//! Reader configuration.

use std::path::PathBuf;

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Directory holding the tab-separated table files
    pub data_dir: PathBuf,
    /// Malformed rows tolerated per table before construction aborts
    pub max_malformed_rows: usize,
    /// File extension of the table files (without the dot)
    pub table_extension: String,
}

impl ReaderConfig {
    /// Creates a configuration for the given data directory with default limits.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Returns the path of the file backing `table`.
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", table, self.table_extension))
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            max_malformed_rows: 1000,
            table_extension: "csv".to_string(),
        }
    }
}

/// Swadesh export configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory receiving the filtered and copied tables
    pub output_dir: PathBuf,
    /// Target vocabulary, comma-separated words per line
    pub vocabulary_path: PathBuf,
    /// Stopwords, one per line
    pub stopwords_path: PathBuf,
    /// ISO code of the language the vocabulary is written in
    pub language: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./swadeshcorpus"),
            vocabulary_path: PathBuf::from("./data/swadesh/spa.txt"),
            stopwords_path: PathBuf::from("./data/stopwords/spa.txt"),
            language: "spa".to_string(),
        }
    }
}
