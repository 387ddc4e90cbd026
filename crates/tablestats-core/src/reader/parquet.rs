//! Parquet reader placeholder.

use std::path::Path;

use crate::config::SamplingConfig;
use crate::error::{Error, Result};
use crate::model::TableStats;
use crate::reader::TableReader;

/// Parquet format entry point. Reading is not implemented and always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParquetReader;

impl ParquetReader {
    /// Creates the reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TableReader for ParquetReader {
    fn read_table(&mut self, _path: &Path, _config: &SamplingConfig) -> Result<TableStats> {
        Err(Error::UnsupportedFormat(
            "parquet reader not implemented".to_string(),
        ))
    }

    fn format_name(&self) -> &'static str {
        "Parquet"
    }
}
