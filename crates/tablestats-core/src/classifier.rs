//! Incremental per-value type and null detection for a single column.
//!
//! The classifier starts from the hypothesis that a column is numeric and widens
//! it to `string` on the first value that fails to parse. The widening is
//! permanent: later values are reported as text even when they look numeric.

use crate::model::ColumnType;

/// Literal tokens treated as null after trimming (exact, case-sensitive).
pub const NULL_TOKENS: [&str; 2] = ["NULL", "null"];

/// Returns true if a raw field is null: empty after trimming, or a null token.
#[must_use]
pub fn is_null(raw: &str) -> bool {
    let value = raw.trim();
    value.is_empty() || NULL_TOKENS.contains(&value)
}

/// Outcome of feeding one raw field to the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation<'a> {
    /// Null or missing value.
    Null,
    /// Parsed number, with the trimmed source text.
    Numeric(f64, &'a str),
    /// The first unparseable value; the column just became `string`.
    Demoted(&'a str),
    /// Any value seen after the column became `string`.
    Text(&'a str),
}

/// Tracks the type hypothesis of one column.
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    still_numeric: bool,
    saw_decimal: bool,
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeClassifier {
    /// Creates a classifier holding the numeric hypothesis.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            still_numeric: true,
            saw_decimal: false,
        }
    }

    /// Classifies one raw field value, updating the column hypothesis.
    ///
    /// `None` stands for a field missing from a short record.
    pub fn observe<'a>(&mut self, raw: Option<&'a str>) -> Observation<'a> {
        let Some(raw) = raw else {
            return Observation::Null;
        };
        let value = raw.trim();
        if is_null(value) {
            return Observation::Null;
        }

        if !self.still_numeric {
            return Observation::Text(value);
        }

        match value.parse::<f64>() {
            Ok(parsed) => {
                if value.contains('.') {
                    self.saw_decimal = true;
                }
                Observation::Numeric(parsed, value)
            }
            Err(_) => {
                self.still_numeric = false;
                self.saw_decimal = false;
                Observation::Demoted(value)
            }
        }
    }

    /// Returns true while every non-null value so far parsed as a number.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.still_numeric
    }

    /// Final type given the values observed so far.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        match (self.still_numeric, self.saw_decimal) {
            (false, _) => ColumnType::String,
            (true, true) => ColumnType::Float64,
            (true, false) => ColumnType::Int64,
        }
    }
}
