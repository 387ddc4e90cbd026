//! Table readers for the supported file formats.
//!
//! CSV and TSV share one implementation parameterised by delimiter. Parquet is a
//! named capability whose read path is not implemented.

pub mod delimited;
pub mod estimate;
pub mod parquet;

use std::path::Path;

use crate::config::SamplingConfig;
use crate::error::{Error, Result};
use crate::model::TableStats;

pub use delimited::DelimitedReader;
pub use parquet::ParquetReader;

/// Trait for table format readers.
///
/// Implement this trait to add support for a new file format.
pub trait TableReader {
    /// Analyzes the file at `path`, reading it entirely or sampling it
    /// according to `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the file cannot be
    /// opened, is empty, or its header cannot be read.
    fn read_table(&mut self, path: &Path, config: &SamplingConfig) -> Result<TableStats>;

    /// Human-readable format name.
    fn format_name(&self) -> &'static str;
}

/// Supported table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// Apache Parquet (not implemented).
    Parquet,
}

impl TableFormat {
    /// Selects the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "parquet" => Ok(Self::Parquet),
            _ => Err(Error::UnsupportedFormat(format!(
                "cannot auto-detect delimiter for '.{ext}', unsupported file type"
            ))),
        }
    }

    /// Field delimiter, for the delimited formats.
    #[must_use]
    pub const fn delimiter(&self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Parquet => None,
        }
    }

    /// Format name as shown in reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Tsv => "TSV",
            Self::Parquet => "Parquet",
        }
    }
}

/// Create a reader for `format`. A `seed` makes position selection deterministic.
#[must_use]
pub fn create_reader(format: TableFormat, seed: Option<u64>) -> Box<dyn TableReader> {
    let delimited = match format {
        TableFormat::Csv => DelimitedReader::csv(),
        TableFormat::Tsv => DelimitedReader::tsv(),
        TableFormat::Parquet => return Box::new(ParquetReader::new()),
    };

    match seed {
        Some(seed) => Box::new(delimited.seeded(seed)),
        None => Box::new(delimited),
    }
}

/// Runs a reader with a fixed, validated sampling configuration.
pub struct StatsGenerator {
    reader: Box<dyn TableReader>,
    config: SamplingConfig,
}

impl StatsGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid; no I/O is
    /// attempted in that case.
    pub fn new(reader: Box<dyn TableReader>, config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { reader, config })
    }

    /// Creates a generator whose reader is chosen by the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration or unsupported extension.
    pub fn for_path(path: &Path, config: SamplingConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let format = TableFormat::from_path(path)?;
        Self::new(create_reader(format, seed), config)
    }

    /// Replaces the reader strategy.
    pub fn set_reader(&mut self, reader: Box<dyn TableReader>) {
        self.reader = reader;
    }

    /// Format name of the current reader.
    #[must_use]
    pub fn format_name(&self) -> &'static str {
        self.reader.format_name()
    }

    /// Sampling configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Analyzes the file at `path` with the current reader.
    ///
    /// # Errors
    ///
    /// Propagates the reader's error.
    pub fn generate_stats(&mut self, path: &Path) -> Result<TableStats> {
        self.reader.read_table(path, &self.config)
    }
}
