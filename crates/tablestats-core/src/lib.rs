//! # `tablestats` Core
//!
//! Statistics engine for delimited tabular files (CSV, TSV).
//!
//! Small files are scanned end to end. Files above a configurable size cutoff are
//! sampled by seeking to random byte offsets and reading a bounded batch of rows
//! from each, and the total row count is extrapolated from the bytes consumed.
//!
//! ## Features
//!
//! - **Type inference**: per-column `int64` / `float64` / `string` with one-way widening
//! - **Null accounting**: empty, whitespace, `NULL` and `null` fields, plus short rows
//! - **Aggregates**: mean, median, population variance, interpolated percentiles
//! - **Row estimate**: point estimate with a confidence interval for sampled reads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tablestats_core::{SamplingConfig, StatsGenerator};
//! use std::path::Path;
//!
//! let path = Path::new("data.csv");
//! let mut generator = StatsGenerator::for_path(path, SamplingConfig::default(), Some(42))?;
//! let stats = generator.generate_stats(path)?;
//!
//! println!("{} rows (~{} estimated)", stats.row_count, stats.estimated_rows);
//! for column in &stats.columns {
//!     println!("{}: {} ({:.1}% null)", column.name, column.column_type, column.null_percentage);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]

pub mod aggregate;
pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod reader;

pub use aggregate::{calculate_aggregates, calculate_percentile, PERCENTILE_RANKS};
pub use analyzer::{analyze_column, analyze_columns};
pub use config::{ConfigError, LoggingConfig, ReaderConfig, SamplingConfig, TableStatsConfig};
pub use error::{Error, Result};
pub use model::{
    AggregateStats, ColumnStats, ColumnType, ColumnValue, Record, RowEstimate, TableStats,
    SAMPLE_PREVIEW_ROWS,
};
pub use reader::{
    create_reader, DelimitedReader, ParquetReader, StatsGenerator, TableFormat, TableReader,
};
