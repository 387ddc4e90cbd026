//! Column analysis over the in-memory row matrix.
//!
//! One pass per column: null counting, type inference and min/max tracking happen
//! together. Numeric values are accumulated for the aggregate calculator until the
//! column is demoted to `string`, at which point the accumulator is dropped.
//!
//! When a column is demoted, the numeric bounds found so far are carried over as
//! their original (trimmed) source text and compared lexicographically from then on.

use tracing::debug;

use crate::aggregate::calculate_aggregates;
use crate::classifier::{Observation, TypeClassifier};
use crate::model::{ColumnStats, ColumnValue, Record};

/// Running min/max of a column, borrowing from the row matrix.
#[derive(Debug, Clone, Copy, Default)]
enum Bounds<'a> {
    #[default]
    Empty,
    Numeric {
        min: (f64, &'a str),
        max: (f64, &'a str),
    },
    Text {
        min: &'a str,
        max: &'a str,
    },
}

impl<'a> Bounds<'a> {
    fn update_numeric(&mut self, value: f64, source: &'a str) {
        match self {
            Self::Empty => {
                *self = Self::Numeric {
                    min: (value, source),
                    max: (value, source),
                };
            }
            Self::Numeric { min, max } => {
                if value < min.0 {
                    *min = (value, source);
                }
                if value > max.0 {
                    *max = (value, source);
                }
            }
            // The classifier never yields a number after demotion.
            Self::Text { .. } => self.update_text(source),
        }
    }

    /// Switches to lexicographic comparison, keeping numeric bounds as source text.
    fn demote(&mut self) {
        if let Self::Numeric { min, max } = *self {
            *self = Self::Text {
                min: min.1,
                max: max.1,
            };
        }
    }

    fn update_text(&mut self, value: &'a str) {
        self.demote();
        match self {
            Self::Text { min, max } => {
                if value < *min {
                    *min = value;
                }
                if value > *max {
                    *max = value;
                }
            }
            _ => {
                *self = Self::Text {
                    min: value,
                    max: value,
                };
            }
        }
    }

    fn into_values(self) -> (ColumnValue, ColumnValue) {
        match self {
            Self::Empty => (ColumnValue::Absent, ColumnValue::Absent),
            Self::Numeric { min, max } => (ColumnValue::Numeric(min.0), ColumnValue::Numeric(max.0)),
            Self::Text { min, max } => (
                ColumnValue::Text(min.to_string()),
                ColumnValue::Text(max.to_string()),
            ),
        }
    }
}

/// Analyzes column `col_idx` across every record.
///
/// Records shorter than `col_idx + 1` count as null for this column. The null
/// percentage is taken over all records, not over non-null values; with no
/// records it is 0.
#[must_use]
pub fn analyze_column(records: &[Record], col_idx: usize, name: &str) -> ColumnStats {
    let mut classifier = TypeClassifier::new();
    let mut bounds = Bounds::default();
    let mut numeric_values: Vec<f64> = Vec::new();
    let mut null_count: u64 = 0;

    for record in records {
        let field = record.get(col_idx).map(String::as_str);
        match classifier.observe(field) {
            Observation::Null => null_count += 1,
            Observation::Numeric(value, source) => {
                numeric_values.push(value);
                bounds.update_numeric(value, source);
            }
            Observation::Demoted(source) => {
                numeric_values = Vec::new();
                bounds.update_text(source);
            }
            Observation::Text(source) => bounds.update_text(source),
        }
    }

    let column_type = classifier.column_type();
    let aggregates = (column_type.is_numeric() && !numeric_values.is_empty())
        .then(|| calculate_aggregates(&numeric_values));

    let null_percentage = if records.is_empty() {
        0.0
    } else {
        null_count as f64 / records.len() as f64 * 100.0
    };

    let (min_value, max_value) = bounds.into_values();

    debug!(
        column = name,
        %column_type,
        null_count,
        "column analyzed"
    );

    ColumnStats {
        name: name.to_string(),
        column_type,
        null_count,
        null_percentage,
        min_value,
        max_value,
        aggregates,
    }
}

/// Analyzes every header column in order.
#[must_use]
pub fn analyze_columns(records: &[Record], column_names: &[String]) -> Vec<ColumnStats> {
    column_names
        .iter()
        .enumerate()
        .map(|(idx, name)| analyze_column(records, idx, name))
        .collect()
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
