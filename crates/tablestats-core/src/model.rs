//! Result types produced by a table analysis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::SamplingConfig;

/// Number of leading rows kept verbatim for display.
pub const SAMPLE_PREVIEW_ROWS: usize = 5;

/// One parsed row: raw field strings, no type conversion applied.
pub type Record = Vec<String>;

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// At least one value failed to parse as a number.
    String,
    /// Every accepted value parsed and none carried a decimal point.
    Int64,
    /// Every accepted value parsed and at least one carried a decimal point.
    Float64,
}

impl ColumnType {
    /// Returns the canonical type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
        }
    }

    /// Returns true for `int64` and `float64`.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column minimum or maximum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ColumnValue {
    /// No comparable value was observed.
    #[default]
    Absent,
    /// Bound of a numeric column.
    Numeric(f64),
    /// Bound of a string column, compared lexicographically.
    Text(String),
}

impl ColumnValue {
    /// Returns true if no value was observed.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the numeric bound, if any.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text bound, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("-"),
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Summary statistics over a numeric value collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of values.
    pub count: u64,
    /// Sum of all values.
    pub sum: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// 50th percentile.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Population variance.
    pub variance: f64,
    /// Percentile rank -> interpolated value.
    pub percentiles: BTreeMap<u32, f64>,
}

impl AggregateStats {
    /// Returns the value at a computed percentile rank.
    #[must_use]
    pub fn percentile(&self, rank: u32) -> Option<f64> {
        self.percentiles.get(&rank).copied()
    }
}

/// Statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Header name.
    pub name: String,
    /// Inferred type.
    pub column_type: ColumnType,
    /// Null or missing values.
    pub null_count: u64,
    /// `null_count / row_count * 100`.
    pub null_percentage: f64,
    /// Smallest observed value.
    pub min_value: ColumnValue,
    /// Largest observed value.
    pub max_value: ColumnValue,
    /// Present only for numeric columns with at least one value.
    pub aggregates: Option<AggregateStats>,
}

/// Extrapolated population row count with its confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowEstimate {
    /// Point estimate.
    pub point: u64,
    /// Lower bound of the interval.
    pub lower: u64,
    /// Upper bound of the interval.
    pub upper: u64,
    /// Confidence level the interval was computed for.
    pub confidence: f64,
}

/// Result of analysing one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    /// Format name of the reader that produced this result.
    pub format: String,
    /// Size of the file in bytes.
    pub file_size: u64,
    /// Whether random-position sampling was used.
    pub sampled: bool,
    /// Rows actually examined.
    pub row_count: u64,
    /// Extrapolated population size; equals `row_count` for a full read.
    pub estimated_rows: u64,
    /// Interval around `estimated_rows`, only for sampled reads.
    pub row_estimate: Option<RowEstimate>,
    /// Number of header columns.
    pub column_count: usize,
    /// Header names in file order.
    pub column_names: Vec<String>,
    /// Per-column statistics in header order.
    pub columns: Vec<ColumnStats>,
    /// First rows of the examined set, verbatim.
    pub sample_data: Vec<Record>,
    /// Configuration used for the analysis.
    pub sampling_config: SamplingConfig,
}

impl TableStats {
    /// Looks up a column by header name (first match for duplicated names).
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterates over the numeric columns.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnStats> {
        self.columns.iter().filter(|c| c.column_type.is_numeric())
    }
}
